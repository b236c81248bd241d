use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::people::domain::{Person, PersonId};

/// Trait abstraction for person storage.
/// Handlers only see this, so the file-backed store can be swapped out.
#[async_trait]
pub trait PeopleRepository: Send + Sync {
    /// `NotFound` when the key is absent.
    async fn get(&self, id: PersonId) -> Result<Person, ServiceError>;
    /// Insert or overwrite.
    async fn set(&self, id: PersonId, person: Person) -> Result<(), ServiceError>;
    /// Removing an absent key succeeds.
    async fn remove(&self, id: PersonId) -> Result<(), ServiceError>;
}
