//! Province endpoints.

use sb_models::Province;

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_provinces(&self) -> ApiResult<Vec<Province>> {
        let resp = self.get_json("/provinces").await?;
        Ok(super::list(resp))
    }

    pub async fn get_province(&self, id: i64) -> ApiResult<Province> {
        let resp = self.get_json(&format!("/provinces/{id}")).await?;
        super::single(resp, "province")
    }
}
