//! Authenticated session and the auth payload it is decoded from.

use serde::{Deserialize, Serialize};

/// Snapshot of the signed-in user's identity, cached alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Bearer token plus the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Identity,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Identity) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Id of the signed-in user.
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Whether a session currently exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// `data` payload of the login and register endpoints.
///
/// Two backend generations answer with different shapes
/// (`token/id/fullName/email/avatar/phoneNumber` and
/// `accessToken` or `token/type/id/email/firstName/lastName`); both decode here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(alias = "accessToken")]
    pub token: Option<String>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    pub id: Option<i64>,
    #[serde(alias = "name")]
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    #[serde(alias = "phone")]
    pub phone_number: Option<String>,
}

impl AuthPayload {
    /// Whether the payload carries a usable token.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Display name, composed from first/last name when no full name is sent.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a session. Returns `None` without a token or user id.
    ///
    /// `fallback_email` is used when the payload omits the email, which
    /// happens on the unified login response.
    pub fn into_session(self, fallback_email: &str) -> Option<Session> {
        if !self.has_token() {
            return None;
        }
        let id = self.id?;
        let full_name = self.display_name();
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback_email.trim().to_string());
        let token = self.token?.trim().to_string();

        Some(Session::new(
            token,
            Identity {
                id,
                full_name,
                email,
                avatar: self.avatar.filter(|a| !a.is_empty()),
                phone_number: self.phone_number.filter(|p| !p.is_empty()),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_payload() {
        let payload: AuthPayload = serde_json::from_value(serde_json::json!({
            "token": "t1", "id": 7, "fullName": "A"
        }))
        .unwrap();
        let session = payload.into_session("a@b.com").unwrap();
        assert_eq!(session.token, "t1");
        assert_eq!(session.user_id(), 7);
        assert_eq!(session.user.full_name, "A");
        assert_eq!(session.user.email, "a@b.com");
    }

    #[test]
    fn test_access_token_payload() {
        let payload: AuthPayload = serde_json::from_value(serde_json::json!({
            "accessToken": "jwt", "id": 3, "fullName": "Lan Tran",
            "email": "lan@example.com", "avatar": "https://cdn/x.png",
            "phoneNumber": "0901234567"
        }))
        .unwrap();
        let session = payload.into_session("ignored@example.com").unwrap();
        assert_eq!(session.token, "jwt");
        assert_eq!(session.user.email, "lan@example.com");
        assert_eq!(session.user.phone_number.as_deref(), Some("0901234567"));
    }

    #[test]
    fn test_first_last_name_payload() {
        let payload: AuthPayload = serde_json::from_value(serde_json::json!({
            "token": "t", "type": "Bearer", "id": 1,
            "email": "x@y.io", "firstName": "Minh", "lastName": "Nguyen Van"
        }))
        .unwrap();
        assert_eq!(payload.token_type.as_deref(), Some("Bearer"));
        let session = payload.into_session("").unwrap();
        assert_eq!(session.user.full_name, "Minh Nguyen Van");
    }

    #[test]
    fn test_payload_without_token_is_not_a_session() {
        let payload: AuthPayload =
            serde_json::from_value(serde_json::json!({ "id": 4, "name": "B" })).unwrap();
        assert!(!payload.has_token());
        assert!(payload.into_session("b@c.de").is_none());

        let blank: AuthPayload =
            serde_json::from_value(serde_json::json!({ "token": "  ", "id": 4 })).unwrap();
        assert!(blank.into_session("b@c.de").is_none());
    }

    #[test]
    fn test_identity_json_shape() {
        let identity = Identity {
            id: 7,
            full_name: "A".into(),
            email: "a@b.com".into(),
            avatar: None,
            phone_number: Some("1".into()),
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["fullName"], "A");
        assert_eq!(json["phoneNumber"], "1");
        assert!(json.get("avatar").is_none());
    }
}
