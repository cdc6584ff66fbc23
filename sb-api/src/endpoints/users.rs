//! User endpoints.

use sb_models::{User, UserProfile};

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        let resp = self.get_json(&format!("/users/{id}")).await?;
        super::single(resp, "user")
    }

    /// Update the profile of a user.
    pub async fn update_user(&self, id: i64, profile: &UserProfile) -> ApiResult<User> {
        let resp = self.put_json(&format!("/user/{id}"), profile).await?;
        super::single(resp, "user")
    }
}
