//! Store decorator that invalidates the query cache on writes

use async_trait::async_trait;

use super::PropertyStore;
use crate::cache::InvalidationHook;
use crate::error::StoreResult;
use crate::models::{Property, PropertyInput};

/// Wraps a store so every successful insert, update or delete runs the
/// invalidation hook before returning. Failed writes leave the cache alone.
pub struct InvalidatingStore<S> {
    inner: S,
    hook: InvalidationHook,
}

impl<S: PropertyStore> InvalidatingStore<S> {
    pub fn new(inner: S, hook: InvalidationHook) -> Self {
        Self { inner, hook }
    }
}

#[async_trait]
impl<S: PropertyStore> PropertyStore for InvalidatingStore<S> {
    async fn insert(&self, input: PropertyInput) -> StoreResult<Property> {
        let property = self.inner.insert(input).await?;
        self.hook.invalidate().await;
        Ok(property)
    }

    async fn update(&self, id: i64, input: PropertyInput) -> StoreResult<Property> {
        let property = self.inner.update(id, input).await?;
        self.hook.invalidate().await;
        Ok(property)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.inner.delete(id).await?;
        self.hook.invalidate().await;
        Ok(())
    }

    async fn get(&self, id: i64) -> StoreResult<Property> {
        self.inner.get(id).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Property>> {
        self.inner.list_all().await
    }
}
