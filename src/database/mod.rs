pub mod fields;
pub mod manager;
pub mod models;
pub mod repository;

pub use fields::{FieldValue, Fields};
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{Repository, Resource, Scope};
