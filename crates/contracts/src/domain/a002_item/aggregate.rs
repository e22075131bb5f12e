use serde::{Deserialize, Serialize};

/// Catalogue item that can be requested between offices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

impl Item {
    /// Looks up an item name in an already loaded list.
    pub fn find_name(items: &[Item], id: i64) -> Option<&str> {
        items.iter().find(|i| i.id == id).map(|i| i.name.as_str())
    }
}

/// Item as embedded in an item request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: i64,
    pub name: String,
}
