pub mod a001_office;
pub mod a002_item;
pub mod a003_item_request;
