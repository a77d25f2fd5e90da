//! In-process property store

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::PropertyStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Property, PropertyInput};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Property>,
    next_id: i64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Table of properties keyed by id.
///
/// Ids come from a counter and are never reused, so id order is insertion order.
///
/// Not `Clone`: once handed to [`PropertyService`](crate::service::PropertyService)
/// no raw handle is left that could write around cache invalidation.
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    table: RwLock<Table>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn insert(&self, input: PropertyInput) -> StoreResult<Property> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let property = Property {
            id,
            title: input.title,
            description: input.description,
            price: input.price,
            location: input.location,
            created_at: Utc::now(),
        };
        table.rows.insert(id, property.clone());
        Ok(property)
    }

    async fn update(&self, id: i64, input: PropertyInput) -> StoreResult<Property> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        row.title = input.title;
        row.description = input.description;
        row.price = input.price;
        row.location = input.location;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn get(&self, id: i64) -> StoreResult<Property> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> StoreResult<Vec<Property>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }
}
