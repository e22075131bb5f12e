//! Draft state behind the five requisition dialogs.
//!
//! Every action follows the same cycle: `prepare_*` seeds the draft from the
//! selected record, setters edit it, `submit_*` validates and calls the
//! lifecycle client, and `reset_*` discards the draft. A successful submit
//! resets the draft; a failed one leaves it untouched for correction.

use contracts::domain::a002_item::Item;
use contracts::domain::a003_item_request::ItemRequest;

use super::error::RequisitionError;
use super::model::ItemRequestClient;
use crate::shared::http::HttpTransport;

pub const CREATE_INVALID: &str = "Please add at least one item and select an office";
pub const APPROVE_INVALID: &str = "Please enter approved quantity";
pub const REJECT_INVALID: &str = "Please enter rejection reason";
pub const FULFILL_INVALID: &str = "Please enter valid fulfillment quantity";
pub const NOTHING_SELECTED: &str = "No request selected";
pub const LINE_INVALID: &str = "Please select an item and enter a quantity";

/// One line of a multi-line create; the same item may appear on several lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRequestLine {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateDraft {
    pub lines: Vec<ItemRequestLine>,
    pub parent_office_id: Option<i64>,
    pub reason: String,
}

impl CreateDraft {
    pub fn is_valid(&self) -> bool {
        !self.lines.is_empty()
            && self.parent_office_id.is_some()
            && self.lines.iter().all(|line| line.quantity > 0.0)
    }
}

/// Quantities shown in the fulfill dialog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FulfillmentBalance {
    pub approved: f64,
    pub fulfilled: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequisitionForm {
    create: CreateDraft,
    selected: Option<ItemRequest>,
    approved_quantity: f64,
    rejection_remarks: String,
    fulfillment_quantity: i64,
    confirmation_remarks: String,
}

impl RequisitionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&ItemRequest> {
        self.selected.as_ref()
    }

    /// Id of the selected record, or a validation error carrying `missing`.
    fn selected_id(&self, missing: &str) -> Result<i64, RequisitionError> {
        self.selected
            .as_ref()
            .map(|r| r.id)
            .ok_or_else(|| RequisitionError::validation(missing))
    }

    // ---- create ----

    pub fn create_draft(&self) -> &CreateDraft {
        &self.create
    }

    pub fn add_item(&mut self, item_id: i64, item_name: impl Into<String>, quantity: f64) {
        self.create.lines.push(ItemRequestLine {
            item_id,
            item_name: item_name.into(),
            quantity,
        });
    }

    /// Adds a line from the item picker, resolving the name from `items`.
    pub fn add_picked_item(
        &mut self,
        items: &[Item],
        item_id: Option<i64>,
        quantity: f64,
    ) -> Result<(), RequisitionError> {
        let item_id = match item_id {
            Some(id) if quantity > 0.0 => id,
            _ => return Err(RequisitionError::validation(LINE_INVALID)),
        };
        let name = Item::find_name(items, item_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Item #{}", item_id));
        self.add_item(item_id, name, quantity);
        Ok(())
    }

    /// Out-of-range indices are ignored.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.create.lines.len() {
            self.create.lines.remove(index);
        }
    }

    pub fn update_item_quantity(&mut self, index: usize, quantity: f64) {
        if let Some(line) = self.create.lines.get_mut(index) {
            line.quantity = quantity;
        }
    }

    pub fn set_parent_office(&mut self, office_id: Option<i64>) {
        self.create.parent_office_id = office_id;
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.create.reason = reason.into();
    }

    pub fn validate_create(&self) -> Result<i64, RequisitionError> {
        match self.create.parent_office_id {
            Some(office_id) if self.create.is_valid() => Ok(office_id),
            _ => Err(RequisitionError::validation(CREATE_INVALID)),
        }
    }

    pub async fn submit_create<T: HttpTransport>(
        &mut self,
        client: &ItemRequestClient<T>,
    ) -> Result<Vec<ItemRequest>, RequisitionError> {
        let office_id = self.validate_create()?;
        let created = client
            .create(&self.create.lines, office_id, &self.create.reason)
            .await?;
        self.reset_create();
        Ok(created)
    }

    pub fn reset_create(&mut self) {
        self.create = CreateDraft::default();
    }

    // ---- approve ----

    pub fn prepare_approval(&mut self, request: &ItemRequest) {
        self.approved_quantity = request.requested_quantity;
        self.selected = Some(request.clone());
    }

    pub fn approved_quantity(&self) -> f64 {
        self.approved_quantity
    }

    pub fn set_approved_quantity(&mut self, quantity: f64) {
        self.approved_quantity = quantity;
    }

    /// Input bounds for the approve dialog: `[0, requested]`.
    pub fn approval_range(&self) -> Option<(f64, f64)> {
        self.selected
            .as_ref()
            .map(|r| (0.0, r.requested_quantity))
    }

    pub fn validate_approval(&self) -> Result<(i64, f64), RequisitionError> {
        let id = self.selected_id(APPROVE_INVALID)?;
        if self.approved_quantity.is_nan() || self.approved_quantity <= 0.0 {
            return Err(RequisitionError::validation(APPROVE_INVALID));
        }
        Ok((id, self.approved_quantity))
    }

    pub async fn submit_approval<T: HttpTransport>(
        &mut self,
        client: &ItemRequestClient<T>,
    ) -> Result<ItemRequest, RequisitionError> {
        let (id, quantity) = self.validate_approval()?;
        let updated = client.approve(id, quantity).await?;
        self.reset_approval();
        Ok(updated)
    }

    pub fn reset_approval(&mut self) {
        self.approved_quantity = 0.0;
        self.selected = None;
    }

    // ---- reject ----

    pub fn prepare_rejection(&mut self, request: &ItemRequest) {
        self.rejection_remarks.clear();
        self.selected = Some(request.clone());
    }

    pub fn rejection_remarks(&self) -> &str {
        &self.rejection_remarks
    }

    pub fn set_rejection_remarks(&mut self, remarks: impl Into<String>) {
        self.rejection_remarks = remarks.into();
    }

    pub fn validate_rejection(&self) -> Result<(i64, String), RequisitionError> {
        let id = self.selected_id(REJECT_INVALID)?;
        let remarks = self.rejection_remarks.trim();
        if remarks.is_empty() {
            return Err(RequisitionError::validation(REJECT_INVALID));
        }
        Ok((id, remarks.to_string()))
    }

    pub async fn submit_rejection<T: HttpTransport>(
        &mut self,
        client: &ItemRequestClient<T>,
    ) -> Result<ItemRequest, RequisitionError> {
        let (id, remarks) = self.validate_rejection()?;
        let updated = client.reject(id, &remarks).await?;
        self.reset_rejection();
        Ok(updated)
    }

    pub fn reset_rejection(&mut self) {
        self.rejection_remarks.clear();
        self.selected = None;
    }

    // ---- fulfill ----

    /// Seeds the quantity with the whole units still owed.
    pub fn prepare_fulfillment(&mut self, request: &ItemRequest) {
        self.fulfillment_quantity = request.remaining_whole_units();
        self.selected = Some(request.clone());
    }

    pub fn fulfillment_quantity(&self) -> i64 {
        self.fulfillment_quantity
    }

    pub fn set_fulfillment_quantity(&mut self, quantity: i64) {
        self.fulfillment_quantity = quantity;
    }

    pub fn fulfillment_balance(&self) -> Option<FulfillmentBalance> {
        self.selected.as_ref().map(|r| FulfillmentBalance {
            approved: r.approved_quantity.unwrap_or(0.0),
            fulfilled: r.fulfilled_quantity.unwrap_or(0.0),
            remaining: r.remaining_quantity(),
        })
    }

    pub fn validate_fulfillment(&self) -> Result<(i64, i64), RequisitionError> {
        let request = self
            .selected
            .as_ref()
            .ok_or_else(|| RequisitionError::validation(FULFILL_INVALID))?;
        let quantity = self.fulfillment_quantity;
        if quantity <= 0 || quantity as f64 > request.remaining_quantity() {
            return Err(RequisitionError::validation(FULFILL_INVALID));
        }
        Ok((request.id, quantity))
    }

    pub async fn submit_fulfillment<T: HttpTransport>(
        &mut self,
        client: &ItemRequestClient<T>,
    ) -> Result<ItemRequest, RequisitionError> {
        let (id, quantity) = self.validate_fulfillment()?;
        let updated = client.fulfill(id, quantity).await?;
        self.reset_fulfillment();
        Ok(updated)
    }

    pub fn reset_fulfillment(&mut self) {
        self.fulfillment_quantity = 0;
        self.selected = None;
    }

    // ---- confirm ----

    pub fn prepare_confirmation(&mut self, request: &ItemRequest) {
        self.confirmation_remarks.clear();
        self.selected = Some(request.clone());
    }

    pub fn confirmation_remarks(&self) -> &str {
        &self.confirmation_remarks
    }

    pub fn set_confirmation_remarks(&mut self, remarks: impl Into<String>) {
        self.confirmation_remarks = remarks.into();
    }

    pub fn validate_confirmation(&self) -> Result<i64, RequisitionError> {
        self.selected_id(NOTHING_SELECTED)
    }

    pub async fn submit_confirmation<T: HttpTransport>(
        &mut self,
        client: &ItemRequestClient<T>,
    ) -> Result<ItemRequest, RequisitionError> {
        let id = self.validate_confirmation()?;
        let updated = client
            .confirm(id, Some(self.confirmation_remarks.as_str()))
            .await?;
        self.reset_confirmation();
        Ok(updated)
    }

    pub fn reset_confirmation(&mut self) {
        self.confirmation_remarks.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_item_request::cache::RequisitionCache;
    use crate::domain::a003_item_request::fixtures::{approved_request, json, sample_request};
    use crate::shared::http::testing::RecordingTransport;
    use crate::shared::http::HttpMethod;
    use contracts::domain::a003_item_request::ItemRequestStatus;
    use futures::executor::block_on;
    use serde_json::json;

    fn client() -> ItemRequestClient<RecordingTransport> {
        ItemRequestClient::new(RecordingTransport::new(), RequisitionCache::new())
    }

    fn filled_create_form() -> RequisitionForm {
        let mut form = RequisitionForm::new();
        form.add_item(1, "A4 Paper", 5.0);
        form.add_item(2, "Stapler", 3.0);
        form.set_parent_office(Some(7));
        form
    }

    #[test]
    fn test_line_editing() {
        let mut form = RequisitionForm::new();
        form.add_item(1, "A4 Paper", 5.0);
        form.add_item(1, "A4 Paper", 2.0);
        form.add_item(4, "Toner", 1.0);
        assert_eq!(form.create_draft().lines.len(), 3);

        form.update_item_quantity(2, 6.0);
        form.remove_item(0);
        form.remove_item(10);

        let lines = &form.create_draft().lines;
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].item_id, lines[0].quantity), (1, 2.0));
        assert_eq!((lines[1].item_id, lines[1].quantity), (4, 6.0));
    }

    #[test]
    fn test_add_picked_item() {
        let items = vec![Item {
            id: 4,
            name: "Toner".to_string(),
            description: None,
            category_name: None,
            unit_name: None,
        }];
        let mut form = RequisitionForm::new();

        assert!(form.add_picked_item(&items, None, 1.0).is_err());
        assert!(form.add_picked_item(&items, Some(4), 0.0).is_err());
        form.add_picked_item(&items, Some(4), 2.0).unwrap();
        form.add_picked_item(&items, Some(9), 1.0).unwrap();

        let names: Vec<&str> = form
            .create_draft()
            .lines
            .iter()
            .map(|l| l.item_name.as_str())
            .collect();
        assert_eq!(names, vec!["Toner", "Item #9"]);
    }

    #[test]
    fn test_invalid_create_makes_no_request() {
        let client = client();

        let mut empty = RequisitionForm::new();
        empty.set_parent_office(Some(7));
        let mut no_office = filled_create_form();
        no_office.set_parent_office(None);
        let mut zero_quantity = filled_create_form();
        zero_quantity.update_item_quantity(1, 0.0);

        for mut form in [empty, no_office, zero_quantity] {
            let before = form.clone();
            let err = block_on(form.submit_create(&client)).unwrap_err();
            assert_eq!(err, RequisitionError::validation(CREATE_INVALID));
            assert_eq!(form, before);
        }
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn test_submit_on_empty_form_reports_action_message() {
        let client = client();
        let mut form = RequisitionForm::new();

        let create = block_on(form.submit_create(&client)).unwrap_err();
        let approve = block_on(form.submit_approval(&client)).unwrap_err();
        let reject = block_on(form.submit_rejection(&client)).unwrap_err();
        let fulfill = block_on(form.submit_fulfillment(&client)).unwrap_err();
        let confirm = block_on(form.submit_confirmation(&client)).unwrap_err();

        assert_eq!(create.message(), CREATE_INVALID);
        assert_eq!(approve.message(), APPROVE_INVALID);
        assert_eq!(reject.message(), REJECT_INVALID);
        assert_eq!(fulfill.message(), FULFILL_INVALID);
        assert_eq!(confirm.message(), NOTHING_SELECTED);
        for err in [create, approve, reject, fulfill, confirm] {
            assert!(err.is_validation());
        }
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn test_create_resets_only_on_full_success() {
        let client = client();
        client
            .transport()
            .reply_ok(json(&sample_request(100, ItemRequestStatus::Pending)))
            .reply_status(500, "Stock ledger locked");

        let mut form = filled_create_form();
        let err = block_on(form.submit_create(&client)).unwrap_err();
        assert!(err.may_have_committed());
        assert_eq!(err.message(), "Stock ledger locked");
        assert_eq!(form.create_draft().lines.len(), 2);

        client
            .transport()
            .reply_ok(json(&sample_request(101, ItemRequestStatus::Pending)))
            .reply_ok(json(&sample_request(102, ItemRequestStatus::Pending)));
        let created = block_on(form.submit_create(&client)).unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(form.create_draft(), &CreateDraft::default());
        assert_eq!(client.transport().request_count(), 4);
    }

    #[test]
    fn test_approval_seed_and_validation() {
        let mut form = RequisitionForm::new();
        assert_eq!(
            form.validate_approval(),
            Err(RequisitionError::validation(APPROVE_INVALID))
        );

        form.prepare_approval(&sample_request(42, ItemRequestStatus::Pending));
        assert_eq!(form.approved_quantity(), 10.0);
        assert_eq!(form.approval_range(), Some((0.0, 10.0)));

        form.set_approved_quantity(0.0);
        assert_eq!(
            form.validate_approval(),
            Err(RequisitionError::validation(APPROVE_INVALID))
        );
        form.set_approved_quantity(8.0);
        assert_eq!(form.validate_approval(), Ok((42, 8.0)));
    }

    #[test]
    fn test_submit_approval() {
        let client = client();
        client
            .transport()
            .reply_ok(json(&approved_request(42, 8.0, None)));

        let mut form = RequisitionForm::new();
        form.prepare_approval(&sample_request(42, ItemRequestStatus::Pending));
        form.set_approved_quantity(8.0);
        block_on(form.submit_approval(&client)).unwrap();

        assert!(form.selected().is_none());
        let request = &client.transport().requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body, Some(json!({ "approvedQuantity": 8.0 })));
    }

    #[test]
    fn test_rejection_requires_remarks() {
        let client = client();
        let mut form = RequisitionForm::new();
        form.prepare_rejection(&sample_request(3, ItemRequestStatus::Pending));
        form.set_rejection_remarks("   ");

        let err = block_on(form.submit_rejection(&client)).unwrap_err();
        assert_eq!(err.message(), REJECT_INVALID);
        assert_eq!(client.transport().request_count(), 0);
        assert!(form.selected().is_some());
    }

    #[test]
    fn test_failed_rejection_retains_draft() {
        let client = client();
        client
            .transport()
            .reply_status(409, r#"{"message":"Request is no longer pending"}"#);

        let mut form = RequisitionForm::new();
        form.prepare_rejection(&sample_request(3, ItemRequestStatus::Pending));
        form.set_rejection_remarks("Out of budget");
        let err = block_on(form.submit_rejection(&client)).unwrap_err();

        assert_eq!(err.message(), "Request is no longer pending");
        assert_eq!(form.rejection_remarks(), "Out of budget");
        assert_eq!(form.selected().map(|r| r.id), Some(3));
    }

    #[test]
    fn test_fulfillment_seed_is_floor_of_remaining() {
        let mut form = RequisitionForm::new();
        form.prepare_fulfillment(&approved_request(5, 10.0, Some(3.7)));
        assert_eq!(form.fulfillment_quantity(), 6);

        let balance = form.fulfillment_balance().unwrap();
        assert_eq!(balance.approved, 10.0);
        assert_eq!(balance.fulfilled, 3.7);
        assert!((balance.remaining - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_fulfillment_never_exceeds_remaining() {
        let mut form = RequisitionForm::new();
        form.prepare_fulfillment(&approved_request(5, 10.0, Some(3.7)));

        for quantity in [-1, 0, 7, 100] {
            form.set_fulfillment_quantity(quantity);
            assert_eq!(
                form.validate_fulfillment(),
                Err(RequisitionError::validation(FULFILL_INVALID)),
                "quantity {}",
                quantity
            );
        }
        for quantity in 1..=6 {
            form.set_fulfillment_quantity(quantity);
            assert_eq!(form.validate_fulfillment(), Ok((5, quantity)));
        }
    }

    #[test]
    fn test_fulfillment_without_approval_is_invalid() {
        let mut form = RequisitionForm::new();
        form.prepare_fulfillment(&sample_request(5, ItemRequestStatus::Approved));
        assert_eq!(form.fulfillment_quantity(), 0);
        form.set_fulfillment_quantity(1);
        assert!(form.validate_fulfillment().is_err());
    }

    #[test]
    fn test_confirmation_flow() {
        let client = client();
        client
            .transport()
            .reply_ok(json(&sample_request(8, ItemRequestStatus::Confirmed)));

        let mut form = RequisitionForm::new();
        assert_eq!(
            block_on(form.submit_confirmation(&client)).unwrap_err(),
            RequisitionError::validation(NOTHING_SELECTED)
        );

        form.prepare_confirmation(&approved_request(8, 10.0, Some(10.0)));
        form.set_confirmation_remarks("Received in good condition");
        let updated = block_on(form.submit_confirmation(&client)).unwrap();

        assert_eq!(updated.known_status(), Some(ItemRequestStatus::Confirmed));
        assert_eq!(form.confirmation_remarks(), "");
        assert_eq!(
            client.transport().requests()[0].body,
            Some(json!({ "remarks": "Received in good condition" }))
        );
    }
}
