use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::ServiceError;
use crate::people::{Person, PersonId, PeopleRepository};
use crate::storage::json_map_store::JsonMapStore;

/// File-backed person store.
/// Keeps a map of `id -> person` persisted as one pretty-printed JSON object.
#[derive(Clone)]
pub struct PeopleStore {
    store: Arc<JsonMapStore<PersonId, Person>>,
}

impl PeopleStore {
    /// Bind the store to `path`. A missing file reads as an empty store.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<PersonId, Person>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub async fn get(&self, id: PersonId) -> Result<Person, ServiceError> {
        self.store
            .get(&id)
            .await?
            .ok_or_else(|| ServiceError::not_found(&format!("person {id}")))
    }

    /// Upsert; create and update are the same operation.
    pub async fn set(&self, id: PersonId, person: Person) -> Result<(), ServiceError> {
        self.store.insert(id, person).await?;
        debug!(%id, "person stored");
        Ok(())
    }

    pub async fn remove(&self, id: PersonId) -> Result<(), ServiceError> {
        let existed = self.store.remove(&id).await?;
        debug!(%id, existed, "person removed");
        Ok(())
    }
}

#[async_trait::async_trait]
impl PeopleRepository for PeopleStore {
    async fn get(&self, id: PersonId) -> Result<Person, ServiceError> { self.get(id).await }
    async fn set(&self, id: PersonId, person: Person) -> Result<(), ServiceError> { self.set(id, person).await }
    async fn remove(&self, id: PersonId) -> Result<(), ServiceError> { self.remove(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("people_store_{}.json", Uuid::new_v4()))
    }

    fn person(first: &str, second: &str, age: i64) -> Person {
        Person { first_name: first.into(), second_name: second.into(), age }
    }

    #[tokio::test]
    async fn set_then_get_round_trips() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = PeopleStore::new(&tmp).await?;
        let ada = person("Ada", "Lovelace", 36);

        store.set(1, ada.clone()).await?;
        assert_eq!(store.get(1).await?, ada);

        // a fresh instance sees the same data: nothing is cached
        let reopened = PeopleStore::new(&tmp).await?;
        assert_eq!(reopened.get(1).await?, ada);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_without_file_is_not_found() -> Result<(), anyhow::Error> {
        let store = PeopleStore::new(tmp_path()).await?;
        assert!(matches!(store.get(7).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn remove_is_idempotent() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = PeopleStore::new(&tmp).await?;
        store.set(3, person("Grace", "Hopper", 85)).await?;

        store.remove(3).await?;
        store.remove(3).await?;
        assert!(matches!(store.get(3).await, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "{}");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn remove_on_missing_file_writes_empty_map() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = PeopleStore::new(&tmp).await?;
        store.remove(1).await?;
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "{}");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = PeopleStore::new(&tmp).await?;
        store.set(1, person("Ada", "Byron", 17)).await?;
        store.set(1, person("Ada", "Lovelace", 36)).await?;

        assert_eq!(store.get(1).await?, person("Ada", "Lovelace", 36));
        let raw: serde_json::Value = serde_json::from_str(&tokio::fs::read_to_string(&tmp).await?)?;
        assert_eq!(raw.as_object().map(|m| m.len()), Some(1));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn keys_are_isolated() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = PeopleStore::new(&tmp).await?;
        let alan = person("Alan", "Turing", 41);
        store.set(2, alan.clone()).await?;

        store.set(1, person("Ada", "Lovelace", 36)).await?;
        assert_eq!(store.get(2).await?, alan);
        assert!(matches!(store.get(3).await, Err(ServiceError::NotFound(_))));

        store.remove(1).await?;
        assert_eq!(store.get(2).await?, alan);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_layout_matches_record_shape() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = PeopleStore::new(&tmp).await?;
        store.set(1, person("Ada", "Lovelace", 36)).await?;

        let expected = "{\n  \"1\": {\n    \"firstName\": \"Ada\",\n    \"secondName\": \"Lovelace\",\n    \"age\": 36\n  }\n}";
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, expected);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_decode_error() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, "[]").await?;
        let store = PeopleStore::new(&tmp).await?;

        assert!(matches!(store.get(1).await, Err(ServiceError::Decode { .. })));
        assert!(matches!(store.remove(1).await, Err(ServiceError::Decode { .. })));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn usable_through_trait_object() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let repo: Arc<dyn PeopleRepository> = PeopleStore::new(&tmp).await?;
        repo.set(9, person("Edsger", "Dijkstra", 72)).await?;
        assert_eq!(repo.get(9).await?.second_name, "Dijkstra");
        repo.remove(9).await?;
        assert!(repo.get(9).await.is_err());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
