//! Person records and the storage contract the HTTP layer depends on.

pub mod domain;
pub mod repository;

pub use domain::{parse_key, Person, PersonId};
pub use repository::PeopleRepository;
