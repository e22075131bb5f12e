//! Test records shaped like backend responses.

use contracts::domain::a001_office::OfficeRef;
use contracts::domain::a002_item::ItemRef;
use contracts::domain::a003_item_request::{ItemRequest, ItemRequestStatus};
use contracts::system::users::UserRef;
use serde_json::Value;

/// Request from office 7 (Physics) to office 1 (Central Store), 10 units requested.
pub fn sample_request(id: i64, status: ItemRequestStatus) -> ItemRequest {
    ItemRequest {
        id,
        requested_date: "2024-05-01T09:00:00".to_string(),
        requested_quantity: 10.0,
        approved_quantity: None,
        fulfilled_quantity: None,
        status: status.code().to_string(),
        reason: None,
        remarks: None,
        confirmation_remarks: None,
        approved_date: None,
        rejected_date: None,
        fulfilled_date: None,
        confirmed_date: None,
        requesting_office: OfficeRef {
            id: 7,
            name: "Physics".to_string(),
            code: None,
        },
        parent_office: OfficeRef {
            id: 1,
            name: "Central Store".to_string(),
            code: Some("CS".to_string()),
        },
        item: ItemRef {
            id: 3,
            name: "Whiteboard Marker".to_string(),
        },
        requested_by: UserRef {
            id: 21,
            username: "karim".to_string(),
            name: Some("Karim Uddin".to_string()),
        },
        approved_by: None,
        confirmed_by: None,
    }
}

pub fn approved_request(id: i64, approved: f64, fulfilled: Option<f64>) -> ItemRequest {
    let mut request = sample_request(
        id,
        if fulfilled.is_some() {
            ItemRequestStatus::PartiallyFulfilled
        } else {
            ItemRequestStatus::Approved
        },
    );
    request.approved_quantity = Some(approved);
    request.fulfilled_quantity = fulfilled;
    request
}

pub fn json(request: &ItemRequest) -> Value {
    serde_json::to_value(request).expect("fixture serializes")
}
