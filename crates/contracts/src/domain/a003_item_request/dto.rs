use serde::{Deserialize, Serialize};

/// Reference to an existing record by id only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// Body of `POST /item-requests` (one line per call)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequestDto {
    pub item: IdRef,
    pub requested_quantity: f64,
    pub parent_office: IdRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CreateItemRequestDto {
    pub fn new(item_id: i64, quantity: f64, parent_office_id: i64, reason: &str) -> Self {
        let reason = reason.trim();
        Self {
            item: IdRef { id: item_id },
            requested_quantity: quantity,
            parent_office: IdRef {
                id: parent_office_id,
            },
            reason: (!reason.is_empty()).then(|| reason.to_string()),
        }
    }
}

/// Body of `PUT /item-requests/{id}/approve`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDto {
    pub approved_quantity: f64,
}

/// Body of `PUT /item-requests/{id}/reject`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionDto {
    pub remarks: String,
}

/// Body of `PUT /item-requests/{id}/fulfill`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentDto {
    pub quantity: i64,
}

/// Body of `PUT /item-requests/{id}/confirm`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfirmationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
