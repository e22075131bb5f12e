//! Inter-office requisitions: request, approve or reject, fulfill, confirm.
//!
//! - `model`: lifecycle client over the REST API
//! - `cache`: page-scoped read cache the client reconciles after mutations
//! - `form`: dialog drafts and their local validation
//! - `ui`: the requisitions page and its dialogs

pub mod cache;
pub mod error;
pub mod form;
pub mod model;
pub mod ui;

#[cfg(test)]
mod fixtures;
