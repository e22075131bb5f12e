pub mod aggregate;

pub use aggregate::{available_target_offices, Office, OfficeRef};
