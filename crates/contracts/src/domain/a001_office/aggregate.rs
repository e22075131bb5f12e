use serde::{Deserialize, Serialize};

/// Organizational unit that owns inventory and exchanges requisitions.
///
/// Offices form a parent/child hierarchy; `parent` is only populated when
/// the backend embeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub name_bn: Option<String>,
    #[serde(rename = "type", default)]
    pub office_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub parent: Option<Box<Office>>,
}

fn default_active() -> bool {
    true
}

/// Office as embedded in other records (requesting / parent office).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfficeRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Offices a requisition can be addressed to: every office except the
/// viewer's own, in the order the backend returned them.
pub fn available_target_offices(offices: &[Office], own_office_id: Option<i64>) -> Vec<&Office> {
    offices
        .iter()
        .filter(|office| Some(office.id) != own_office_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office(id: i64, name: &str) -> Office {
        Office {
            id,
            name: name.to_string(),
            name_bn: None,
            office_type: "DEPARTMENT".to_string(),
            code: None,
            description: None,
            order: None,
            is_active: true,
            parent: None,
        }
    }

    #[test]
    fn test_own_office_is_not_a_target() {
        let offices = vec![office(1, "Registrar"), office(2, "Store"), office(3, "CSE")];
        let targets: Vec<i64> = available_target_offices(&offices, Some(2))
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(targets, vec![1, 3]);
    }

    #[test]
    fn test_unknown_own_office_keeps_all() {
        let offices = vec![office(1, "Registrar"), office(2, "Store")];
        assert_eq!(available_target_offices(&offices, None).len(), 2);
    }

    #[test]
    fn test_deserialize_with_parent() {
        let json = r#"{
            "id": 5,
            "name": "Physics",
            "type": "DEPARTMENT",
            "isActive": true,
            "parent": { "id": 1, "name": "Faculty of Science", "type": "FACULTY", "isActive": true }
        }"#;
        let parsed: Office = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.parent.as_ref().map(|p| p.id), Some(1));
        assert_eq!(parsed.parent.as_ref().map(|p| p.name.as_str()), Some("Faculty of Science"));
    }
}
