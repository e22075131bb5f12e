use super::users::Role;
use crate::domain::a001_office::OfficeRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Signed-in user; role and office decide which requisitions and actions are visible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub office: Option<OfficeRef>,
}

impl UserInfo {
    /// Full name when known, username otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }

    pub fn office_id(&self) -> Option<i64> {
        self.office.as_ref().map(|o| o.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_role() {
        let json = r#"{"id":1,"username":"admin","role":"ADMIN","office":{"id":4,"name":"Registrar"}}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert!(user.role.is_admin());
        assert_eq!(user.office_id(), Some(4));
        assert_eq!(user.display_name(), "admin");

        let json = r#"{"id":2,"username":"clerk"}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.office_id(), None);
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let json = r#"{"id":3,"username":"rahim","name":"Rahim Uddin"}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "Rahim Uddin");
    }
}
