use serde::{Deserialize, Serialize};

/// Role assigned to a user by administrators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

/// User as embedded in item requests (requested / approved / confirmed by)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserRef {
    /// Full name when known, username otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_display_name() {
        let json = r#"{"id":11,"username":"rahim"}"#;
        let user: UserRef = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "rahim");

        let json = r#"{"id":21,"username":"karim","name":"Karim Uddin"}"#;
        let user: UserRef = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "Karim Uddin");
        assert!(!Role::default().is_admin());
    }
}
