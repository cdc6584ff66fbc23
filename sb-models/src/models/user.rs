//! User profile models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::session::Identity;

/// User as returned by `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<bool>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Identity {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

/// Body of the profile update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub gender: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
}
