use contracts::domain::a002_item::Item;

use crate::shared::http::{HttpMethod, HttpTransport};

pub async fn fetch_items<T: HttpTransport>(transport: &T) -> Result<Vec<Item>, String> {
    let value = transport
        .send(HttpMethod::Get, "/items", None)
        .await
        .map_err(|e| format!("Failed to load items: {}", e))?;
    serde_json::from_value(value).map_err(|e| format!("Failed to parse items: {}", e))
}
