use super::status::ItemRequestStatus;
use super::view::RequisitionView;
use crate::system::users::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User action on item requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisitionAction {
    Create,
    Approve,
    Reject,
    Fulfill,
    Confirm,
}

impl RequisitionAction {
    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            RequisitionAction::Create => "New Requisition",
            RequisitionAction::Approve => "Approve",
            RequisitionAction::Reject => "Reject",
            RequisitionAction::Fulfill => "Fulfill",
            RequisitionAction::Confirm => "Confirm Receipt",
        }
    }

    /// Shown when the server gives no usable error message.
    pub fn failure_message(&self) -> &'static str {
        match self {
            RequisitionAction::Create => "Failed to create requisition",
            RequisitionAction::Approve => "Failed to approve requisition",
            RequisitionAction::Reject => "Failed to reject requisition",
            RequisitionAction::Fulfill => "Failed to fulfill requisition",
            RequisitionAction::Confirm => "Failed to confirm requisition",
        }
    }
}

/// Row actions offered for a request with status code `status` in `view` to a
/// viewer with `role`.
///
/// Confirm is admin-gated on the `fulfilled` view, like approve and fulfill.
/// Unknown codes get no actions.
pub fn permitted_actions(
    view: RequisitionView,
    status: &str,
    role: Role,
) -> BTreeSet<RequisitionAction> {
    let mut actions = BTreeSet::new();
    if !role.is_admin() {
        return actions;
    }
    let Some(status) = ItemRequestStatus::from_code(status) else {
        return actions;
    };

    match view {
        RequisitionView::Incoming if status == ItemRequestStatus::Pending => {
            actions.insert(RequisitionAction::Approve);
            actions.insert(RequisitionAction::Reject);
        }
        RequisitionView::Approved if status.awaits_fulfillment() => {
            actions.insert(RequisitionAction::Fulfill);
        }
        RequisitionView::Fulfilled if status.is_fulfilled() => {
            actions.insert(RequisitionAction::Confirm);
        }
        _ => {}
    }

    actions
}

/// Only administrators may raise new requisitions.
pub fn can_create(role: Role) -> bool {
    role.is_admin()
}
