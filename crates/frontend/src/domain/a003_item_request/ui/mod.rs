pub mod dialogs;
pub mod list;

pub use list::RequisitionsPage;
