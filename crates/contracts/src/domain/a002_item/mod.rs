pub mod aggregate;

pub use aggregate::{Item, ItemRef};
