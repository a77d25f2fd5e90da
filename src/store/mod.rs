//! Store Module
//!
//! The authoritative source of Property records.

mod invalidating;
mod memory;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Property, PropertyInput};

pub use invalidating::InvalidatingStore;
pub use memory::MemoryPropertyStore;

/// Record store for properties.
///
/// The application only ever holds a store wrapped in [`InvalidatingStore`],
/// so every mutation on the shared handle clears the query cache.
#[async_trait]
pub trait PropertyStore: Send + Sync + 'static {
    /// Inserts a new record, assigning `id` and `created_at`.
    async fn insert(&self, input: PropertyInput) -> StoreResult<Property>;

    /// Replaces the writable fields of an existing record.
    async fn update(&self, id: i64, input: PropertyInput) -> StoreResult<Property>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    async fn get(&self, id: i64) -> StoreResult<Property>;

    /// All records in ascending id (insertion) order.
    async fn list_all(&self) -> StoreResult<Vec<Property>>;
}
