use super::status::ItemRequestStatus;
use crate::domain::a001_office::OfficeRef;
use crate::domain::a002_item::ItemRef;
use crate::system::users::UserRef;
use serde::{Deserialize, Serialize};

/// Request by `requesting_office` to `parent_office` for a quantity of `item`.
///
/// The backend owns this record; the frontend only caches what it reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub id: i64,
    pub requested_date: String,
    pub requested_quantity: f64,
    /// Set at approval
    #[serde(default)]
    pub approved_quantity: Option<f64>,
    /// Accumulates over one or more fulfillments
    #[serde(default)]
    pub fulfilled_quantity: Option<f64>,
    /// Raw status code; see [`ItemRequest::known_status`]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub confirmation_remarks: Option<String>,
    #[serde(default)]
    pub approved_date: Option<String>,
    #[serde(default)]
    pub rejected_date: Option<String>,
    #[serde(default)]
    pub fulfilled_date: Option<String>,
    #[serde(default)]
    pub confirmed_date: Option<String>,
    pub requesting_office: OfficeRef,
    pub parent_office: OfficeRef,
    pub item: ItemRef,
    pub requested_by: UserRef,
    #[serde(default)]
    pub approved_by: Option<UserRef>,
    #[serde(default)]
    pub confirmed_by: Option<UserRef>,
}

impl ItemRequest {
    /// `approved - fulfilled`, with missing quantities counted as zero.
    pub fn remaining_quantity(&self) -> f64 {
        self.approved_quantity.unwrap_or(0.0) - self.fulfilled_quantity.unwrap_or(0.0)
    }

    /// Whole units still to be fulfilled, used to seed the fulfill dialog.
    pub fn remaining_whole_units(&self) -> i64 {
        self.remaining_quantity().floor() as i64
    }

    /// Lifecycle status, or `None` for a code this client does not know.
    pub fn known_status(&self) -> Option<ItemRequestStatus> {
        ItemRequestStatus::from_code(&self.status)
    }

    /// Requester or addressee is `office_id`.
    pub fn touches_office(&self, office_id: i64) -> bool {
        self.requesting_office.id == office_id || self.parent_office.id == office_id
    }

    /// Quantity and status invariants this record breaks, if any.
    pub fn consistency_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.requested_quantity <= 0.0 {
            violations.push(format!(
                "requested quantity {} is not positive",
                self.requested_quantity
            ));
        }
        if let Some(approved) = self.approved_quantity {
            if approved > self.requested_quantity {
                violations.push(format!(
                    "approved quantity {} exceeds requested {}",
                    approved, self.requested_quantity
                ));
            }
        }
        if let (Some(approved), Some(fulfilled)) = (self.approved_quantity, self.fulfilled_quantity)
        {
            if fulfilled > approved {
                violations.push(format!(
                    "fulfilled quantity {} exceeds approved {}",
                    fulfilled, approved
                ));
            }
        }
        let status = self.known_status();
        if status == Some(ItemRequestStatus::Approved) && self.approved_quantity.is_none() {
            violations.push("APPROVED without approved quantity".to_string());
        }
        if status.is_some_and(|s| s.is_fulfilled()) && self.fulfilled_quantity.is_none() {
            violations.push(format!("{} without fulfilled quantity", self.status));
        }

        violations
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample(id: i64, status: ItemRequestStatus) -> ItemRequest {
        ItemRequest {
            id,
            requested_date: "2024-03-15T10:00:00".to_string(),
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
                name: "A4 Paper".to_string(),
            },
            requested_by: UserRef {
                id: 11,
                username: "rahim".to_string(),
                name: None,
            },
            approved_by: None,
            confirmed_by: None,
        }
    }

    #[test]
    fn test_remaining_quantity() {
        let mut request = sample(1, ItemRequestStatus::PartiallyFulfilled);
        request.approved_quantity = Some(10.0);
        request.fulfilled_quantity = Some(3.7);
        assert!((request.remaining_quantity() - 6.3).abs() < 1e-9);
        assert_eq!(request.remaining_whole_units(), 6);

        let pending = sample(2, ItemRequestStatus::Pending);
        assert_eq!(pending.remaining_quantity(), 0.0);
    }

    #[test]
    fn test_consistency_violations() {
        let mut request = sample(1, ItemRequestStatus::Approved);
        assert_eq!(request.consistency_violations().len(), 1);

        request.approved_quantity = Some(12.0);
        assert!(request.consistency_violations()[0].contains("exceeds requested"));

        request.approved_quantity = Some(8.0);
        request.fulfilled_quantity = Some(9.0);
        request.status = ItemRequestStatus::PartiallyFulfilled.code().to_string();
        let violations = request.consistency_violations();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("exceeds approved"));

        request.fulfilled_quantity = Some(8.0);
        assert!(request.consistency_violations().is_empty());
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": 42,
            "requestedDate": "2024-05-02T09:30:00",
            "requestedQuantity": 10,
            "approvedQuantity": 8,
            "status": "APPROVED",
            "reason": "Lab session",
            "requestingOffice": { "id": 7, "name": "Physics" },
            "parentOffice": { "id": 1, "name": "Central Store", "code": "CS" },
            "item": { "id": 3, "name": "A4 Paper" },
            "requestedBy": { "id": 11, "username": "rahim" },
            "approvedBy": { "id": 2, "username": "admin", "name": "Store Admin" }
        }"#;
        let request: ItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.known_status(), Some(ItemRequestStatus::Approved));
        assert_eq!(request.approved_quantity, Some(8.0));
        assert_eq!(request.fulfilled_quantity, None);
        assert!(request.touches_office(7) && request.touches_office(1));
        assert!(!request.touches_office(9));
    }

    #[test]
    fn test_unknown_status_code_still_decodes() {
        let json = r#"{
            "id": 43,
            "requestedDate": "2024-05-02T09:30:00",
            "requestedQuantity": 4,
            "status": "IN_TRANSIT",
            "requestingOffice": { "id": 7, "name": "Physics" },
            "parentOffice": { "id": 1, "name": "Central Store" },
            "item": { "id": 3, "name": "A4 Paper" },
            "requestedBy": { "id": 11, "username": "rahim" }
        }"#;
        let request: ItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, "IN_TRANSIT");
        assert_eq!(request.known_status(), None);
        assert!(request.consistency_violations().is_empty());
    }
}
