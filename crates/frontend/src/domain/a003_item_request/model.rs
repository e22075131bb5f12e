//! Requisition lifecycle client: REST calls plus read-cache reconciliation.

use contracts::domain::a003_item_request::{
    ApprovalDto, ConfirmationDto, CreateItemRequestDto, FulfillmentDto, ItemRequest,
    RejectionDto, RequisitionAction, RequisitionView,
};
use futures::future::join_all;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::cache::{QueryKey, RequisitionCache};
use super::error::RequisitionError;
use super::form::ItemRequestLine;
use crate::shared::http::{HttpError, HttpMethod, HttpTransport};

const ITEM_REQUESTS_PATH: &str = "/item-requests";
const LOAD_FAILED: &str = "Failed to load requisitions";

#[derive(Debug, Clone)]
pub struct ItemRequestClient<T> {
    transport: T,
    cache: RequisitionCache,
}

impl<T: HttpTransport> ItemRequestClient<T> {
    pub fn new(transport: T, cache: RequisitionCache) -> Self {
        Self { transport, cache }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &RequisitionCache {
        &self.cache
    }

    async fn fetch<R: DeserializeOwned>(&self, path: &str) -> Result<R, HttpError> {
        let value = self.transport.send(HttpMethod::Get, path, None).await?;
        serde_json::from_value(value).map_err(|e| HttpError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<R, HttpError> {
        let body = serde_json::to_value(body).map_err(|e| HttpError::Serialize(e.to_string()))?;
        let value = self.transport.send(method, path, Some(body)).await?;
        serde_json::from_value(value).map_err(|e| HttpError::Decode(e.to_string()))
    }

    async fn load_list(&self, key: QueryKey, path: &str) -> Result<Vec<ItemRequest>, RequisitionError> {
        if let Some(items) = self.cache.fresh_list(key) {
            return Ok(items);
        }
        let generation = self.cache.generation();
        let items: Vec<ItemRequest> = self.fetch(path).await.map_err(|err| {
            warn!("GET {} failed: {}", path, err);
            RequisitionError::from_http(err, LOAD_FAILED)
        })?;
        self.cache.store_list(key, items.clone(), generation);
        Ok(items)
    }

    /// All requests visible to the current user's office
    pub async fn list_all(&self) -> Result<Vec<ItemRequest>, RequisitionError> {
        self.load_list(QueryKey::All, ITEM_REQUESTS_PATH).await
    }

    pub async fn list_by_office(&self, office_id: i64) -> Result<Vec<ItemRequest>, RequisitionError> {
        let path = format!("{}/office/{}", ITEM_REQUESTS_PATH, office_id);
        self.load_list(QueryKey::ByOffice(office_id), &path).await
    }

    /// Relationship-filtered list, e.g. `GET /item-requests/incoming`
    pub async fn list_view(&self, view: RequisitionView) -> Result<Vec<ItemRequest>, RequisitionError> {
        let path = format!("{}/{}", ITEM_REQUESTS_PATH, view.slug());
        self.load_list(QueryKey::View(view), &path).await
    }

    pub async fn get(&self, id: i64) -> Result<ItemRequest, RequisitionError> {
        if let Some(item) = self.cache.fresh_one(id) {
            return Ok(item);
        }
        let path = format!("{}/{}", ITEM_REQUESTS_PATH, id);
        let generation = self.cache.generation();
        let item: ItemRequest = self.fetch(&path).await.map_err(|err| {
            warn!("GET {} failed: {}", path, err);
            RequisitionError::from_http(err, LOAD_FAILED)
        })?;
        self.cache.store_one(item.clone(), generation);
        Ok(item)
    }

    /// One `POST /item-requests` per line, all in flight at once.
    ///
    /// Lines that succeed are not rolled back when another fails. The
    /// reported error is the first failing line in line order.
    pub async fn create(
        &self,
        lines: &[ItemRequestLine],
        parent_office_id: i64,
        reason: &str,
    ) -> Result<Vec<ItemRequest>, RequisitionError> {
        debug!(
            "creating {} requisition line(s) for office {}",
            lines.len(),
            parent_office_id
        );

        let calls = lines.iter().map(|line| {
            let dto = CreateItemRequestDto::new(line.item_id, line.quantity, parent_office_id, reason);
            async move {
                self.send_json::<_, ItemRequest>(HttpMethod::Post, ITEM_REQUESTS_PATH, &dto)
                    .await
            }
        });
        let results = join_all(calls).await;

        let mut created = Vec::with_capacity(results.len());
        let mut first_failure = None;
        let mut failed = 0;
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(item) => created.push(item),
                Err(err) => {
                    warn!("requisition line {} failed: {}", index + 1, err);
                    failed += 1;
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }

        let Some(err) = first_failure else {
            self.after_mutation(&created);
            return Ok(created);
        };

        let err = RequisitionError::from_http(err, RequisitionAction::Create.failure_message());
        if created.is_empty() {
            return Err(err);
        }

        // some lines exist server-side now
        self.cache.invalidate_all();
        Err(RequisitionError::PartialCreate {
            submitted: created.len(),
            failed,
            message: err.message(),
        })
    }

    pub async fn approve(&self, id: i64, approved_quantity: f64) -> Result<ItemRequest, RequisitionError> {
        let body = ApprovalDto { approved_quantity };
        self.transition(RequisitionAction::Approve, id, &body).await
    }

    pub async fn reject(&self, id: i64, remarks: &str) -> Result<ItemRequest, RequisitionError> {
        let body = RejectionDto {
            remarks: remarks.to_string(),
        };
        self.transition(RequisitionAction::Reject, id, &body).await
    }

    pub async fn fulfill(&self, id: i64, quantity: i64) -> Result<ItemRequest, RequisitionError> {
        let body = FulfillmentDto { quantity };
        self.transition(RequisitionAction::Fulfill, id, &body).await
    }

    pub async fn confirm(&self, id: i64, remarks: Option<&str>) -> Result<ItemRequest, RequisitionError> {
        let body = ConfirmationDto {
            remarks: remarks
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        };
        self.transition(RequisitionAction::Confirm, id, &body).await
    }

    /// Single-record `PUT /item-requests/{id}/{action}`
    async fn transition<B: Serialize>(
        &self,
        action: RequisitionAction,
        id: i64,
        body: &B,
    ) -> Result<ItemRequest, RequisitionError> {
        let path = format!("{}/{}/{}", ITEM_REQUESTS_PATH, id, action_segment(action));
        debug!("PUT {}", path);

        match self.send_json::<_, ItemRequest>(HttpMethod::Put, &path, body).await {
            Ok(updated) => {
                self.after_mutation(std::slice::from_ref(&updated));
                Ok(updated)
            }
            Err(err) => {
                warn!("PUT {} failed: {}", path, err);
                Err(RequisitionError::from_http(err, action.failure_message()))
            }
        }
    }

    fn after_mutation(&self, changed: &[ItemRequest]) {
        for item in changed {
            let violations = item.consistency_violations();
            if !violations.is_empty() {
                warn!("item request {} is inconsistent: {}", item.id, violations.join("; "));
            }
        }
        debug!("invalidating item request cache");
        self.cache.invalidate_all();
    }
}

fn action_segment(action: RequisitionAction) -> &'static str {
    match action {
        RequisitionAction::Create => "",
        RequisitionAction::Approve => "approve",
        RequisitionAction::Reject => "reject",
        RequisitionAction::Fulfill => "fulfill",
        RequisitionAction::Confirm => "confirm",
    }
}
