use contracts::domain::a001_office::Office;

use crate::shared::http::{HttpMethod, HttpTransport};

/// Every office, in backend order
pub async fn fetch_offices<T: HttpTransport>(transport: &T) -> Result<Vec<Office>, String> {
    let value = transport
        .send(HttpMethod::Get, "/offices", None)
        .await
        .map_err(|e| format!("Failed to load offices: {}", e))?;
    serde_json::from_value(value).map_err(|e| format!("Failed to parse offices: {}", e))
}
