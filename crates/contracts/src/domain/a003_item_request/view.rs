use super::aggregate::ItemRequest;
use super::status::ItemRequestStatus;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Relationship-filtered list of item requests, as seen from the viewer's office.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RequisitionView {
    #[default]
    MyRequests,
    Incoming,
    Approved,
    Fulfilled,
    History,
}

impl RequisitionView {
    pub fn all() -> [RequisitionView; 5] {
        [
            RequisitionView::MyRequests,
            RequisitionView::Incoming,
            RequisitionView::Approved,
            RequisitionView::Fulfilled,
            RequisitionView::History,
        ]
    }

    /// Tab key and endpoint suffix (`/item-requests/{slug}`)
    pub fn slug(&self) -> &'static str {
        match self {
            RequisitionView::MyRequests => "my-requests",
            RequisitionView::Incoming => "incoming",
            RequisitionView::Approved => "approved",
            RequisitionView::Fulfilled => "fulfilled",
            RequisitionView::History => "history",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|v| v.slug() == slug)
            .ok_or_else(|| anyhow!("unknown requisition view: {}", slug))
    }

    pub fn title(&self) -> &'static str {
        match self {
            RequisitionView::MyRequests => "My Requests",
            RequisitionView::Incoming => "Incoming",
            RequisitionView::Approved => "Approved",
            RequisitionView::Fulfilled => "Fulfilled",
            RequisitionView::History => "History",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            RequisitionView::MyRequests => {
                "No requisitions found. Create a new requisition to request items from other offices."
            }
            RequisitionView::Incoming => {
                "No incoming requisitions. Requests from other offices will appear here."
            }
            RequisitionView::Approved => {
                "No approved requisitions. Approved requests that need fulfillment will appear here."
            }
            RequisitionView::Fulfilled => {
                "No fulfilled requisitions. Completed requisitions will appear here."
            }
            RequisitionView::History => {
                "No requisition history found. All past and present requisitions will appear here."
            }
        }
    }

    /// Office columns shown between "Item" and "Quantity".
    pub fn counterpart_columns(&self) -> &'static [CounterpartColumn] {
        match self {
            RequisitionView::History => &[CounterpartColumn::From, CounterpartColumn::To],
            RequisitionView::MyRequests | RequisitionView::Approved | RequisitionView::Fulfilled => {
                &[CounterpartColumn::RequestedTo]
            }
            RequisitionView::Incoming => &[CounterpartColumn::RequestedBy],
        }
    }

    /// Whether `request` belongs in this view for a viewer in `office_id`.
    pub fn matches(&self, request: &ItemRequest, office_id: i64) -> bool {
        let addressed_to_me = request.parent_office.id == office_id;
        let status = request.known_status();
        match self {
            RequisitionView::MyRequests => request.requesting_office.id == office_id,
            RequisitionView::Incoming => {
                addressed_to_me && status == Some(ItemRequestStatus::Pending)
            }
            RequisitionView::Approved => {
                addressed_to_me && status.is_some_and(|s| s.awaits_fulfillment())
            }
            RequisitionView::Fulfilled => {
                addressed_to_me && status.is_some_and(|s| s.is_fulfilled())
            }
            RequisitionView::History => request.touches_office(office_id),
        }
    }

    /// Keeps the requests of `requests` that belong in this view.
    pub fn filter<'a>(&self, requests: &'a [ItemRequest], office_id: i64) -> Vec<&'a ItemRequest> {
        requests
            .iter()
            .filter(|r| self.matches(r, office_id))
            .collect()
    }
}

/// Office column of the requisition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartColumn {
    From,
    To,
    RequestedTo,
    RequestedBy,
}

impl CounterpartColumn {
    pub fn header(&self) -> &'static str {
        match self {
            CounterpartColumn::From => "From",
            CounterpartColumn::To => "To",
            CounterpartColumn::RequestedTo => "Requested To",
            CounterpartColumn::RequestedBy => "Requested By",
        }
    }

    pub fn office_name<'a>(&self, request: &'a ItemRequest) -> &'a str {
        match self {
            CounterpartColumn::From | CounterpartColumn::RequestedTo => &request.parent_office.name,
            CounterpartColumn::To | CounterpartColumn::RequestedBy => {
                &request.requesting_office.name
            }
        }
    }
}

/// "Total: 1 requisition" / "Total: 3 requisitions"
pub fn total_caption(count: usize) -> String {
    format!(
        "Total: {} requisition{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}
