//! Item request (requisition) between offices.
//!
//! - `aggregate.rs`: wire record as returned by the backend
//! - `status.rs`: status codes, labels and badge colors
//! - `dto.rs`: request bodies for the lifecycle endpoints
//! - `view.rs`: relationship-filtered views and their presentation
//! - `capability.rs`: which row actions a viewer may take

pub mod aggregate;
pub mod capability;
pub mod dto;
pub mod status;
pub mod view;

pub use aggregate::ItemRequest;
pub use capability::{can_create, permitted_actions, RequisitionAction};
pub use dto::{
    ApprovalDto, ConfirmationDto, CreateItemRequestDto, FulfillmentDto, IdRef, RejectionDto,
};
pub use status::{format_status, status_color, ItemRequestStatus, FALLBACK_STATUS_CLASS};
pub use view::{total_caption, CounterpartColumn, RequisitionView};
