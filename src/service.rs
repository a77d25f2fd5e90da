//! Property write path
//!
//! [`PropertyService`] takes ownership of the record store and wraps it in an
//! [`InvalidatingStore`], so every successful write clears the query cache,
//! whether it arrives through the service or through [`PropertyService::store`].

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::cache::InvalidationHook;
use crate::error::{StoreError, StoreResult};
use crate::models::{Property, PropertyInput};
use crate::store::{InvalidatingStore, PropertyStore};

#[derive(Clone)]
pub struct PropertyService {
    store: Arc<dyn PropertyStore>,
}

impl PropertyService {
    pub fn new<S: PropertyStore>(store: S, hook: InvalidationHook) -> Self {
        Self {
            store: Arc::new(InvalidatingStore::new(store, hook)),
        }
    }

    /// Shared handle to the wrapped store. Writes through it still invalidate.
    pub fn store(&self) -> Arc<dyn PropertyStore> {
        self.store.clone()
    }

    pub async fn create(&self, input: PropertyInput) -> StoreResult<Property> {
        validate(&input)?;
        let property = self.store.insert(input).await?;
        info!(id = property.id, "property created");
        Ok(property)
    }

    pub async fn update(&self, id: i64, input: PropertyInput) -> StoreResult<Property> {
        validate(&input)?;
        let property = self.store.update(id, input).await?;
        info!(id, "property updated");
        Ok(property)
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        self.store.delete(id).await?;
        info!(id, "property deleted");
        Ok(())
    }

    /// Creates every property in a JSON array file. Returns how many were created.
    pub async fn load_seed_file(&self, path: &Path) -> anyhow::Result<usize> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let inputs: Vec<PropertyInput> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing seed file {}", path.display()))?;

        let count = inputs.len();
        for input in inputs {
            self.create(input).await?;
        }
        Ok(count)
    }
}

fn validate(input: &PropertyInput) -> StoreResult<()> {
    match input.validate() {
        Some(msg) => Err(StoreError::Invalid(msg)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, MemoryBackend, QueryCache, ALL_PROPERTIES_KEY};
    use crate::store::MemoryPropertyStore;
    use std::time::Duration;

    struct Fixture {
        backend: MemoryBackend,
        service: PropertyService,
        query: QueryCache,
    }

    fn fixture() -> Fixture {
        let backend = MemoryBackend::new();
        let service = PropertyService::new(
            MemoryPropertyStore::new(),
            InvalidationHook::new(backend.shared()),
        );
        let query = QueryCache::new(backend.shared(), service.store(), Duration::from_secs(3600));
        Fixture {
            backend,
            service,
            query,
        }
    }

    fn input(title: &str, price: &str) -> PropertyInput {
        PropertyInput::new(title, "desc", price.parse().unwrap(), "NYC")
    }

    #[tokio::test]
    async fn test_every_mutation_invalidates() {
        let f = fixture();

        let created = f.service.create(input("Loft", "1200.00")).await.unwrap();
        assert_eq!(f.query.get_all_properties().await.unwrap(), vec![created.clone()]);
        assert!(f.backend.get(ALL_PROPERTIES_KEY).await.unwrap().is_some());

        let updated = f.service.update(created.id, input("Loft+", "1300")).await.unwrap();
        assert!(f.backend.get(ALL_PROPERTIES_KEY).await.unwrap().is_none());
        assert_eq!(f.query.get_all_properties().await.unwrap(), vec![updated]);

        f.service.delete(created.id).await.unwrap();
        assert!(f.backend.get(ALL_PROPERTIES_KEY).await.unwrap().is_none());
        assert!(f.query.get_all_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_through_shared_store_invalidate() {
        let f = fixture();
        let store = f.service.store();

        f.query.get_all_properties().await.unwrap();
        let created = store.insert(input("Cabin", "90000")).await.unwrap();
        assert_eq!(f.query.get_all_properties().await.unwrap(), vec![created.clone()]);

        let updated = store.update(created.id, input("Cabin+", "95000")).await.unwrap();
        assert_eq!(f.query.get_all_properties().await.unwrap(), vec![updated]);

        store.delete(created.id).await.unwrap();
        assert!(f.query.get_all_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_without_write() {
        let f = fixture();
        f.query.get_all_properties().await.unwrap();

        let err = f.service.create(input("", "1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));

        // Cached entry untouched because nothing was written
        assert!(f.backend.get(ALL_PROPERTIES_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_write_does_not_invalidate() {
        let f = fixture();
        f.query.get_all_properties().await.unwrap();

        assert!(matches!(
            f.service.delete(42).await,
            Err(StoreError::NotFound(42))
        ));
        assert!(f.backend.get(ALL_PROPERTIES_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_load_seed_file() {
        let f = fixture();
        let path = std::env::temp_dir().join(format!("property_seed_{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[
                {"title": "Loft", "description": "d", "price": "1200.00", "location": "NYC"},
                {"title": "Barn", "description": "d", "price": 85000, "location": "Ohio"}
            ]"#,
        )
        .await
        .unwrap();

        let count = f.service.load_seed_file(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(count, 2);
        let titles: Vec<String> = f
            .query
            .get_all_properties()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Loft", "Barn"]);
        assert_eq!(f.service.store().get(2).await.unwrap().price.cents(), 8_500_000);
    }

    #[tokio::test]
    async fn test_load_seed_file_missing() {
        let f = fixture();
        let err = f
            .service
            .load_seed_file(Path::new("/nonexistent/seed.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reading seed file"));
    }
}
