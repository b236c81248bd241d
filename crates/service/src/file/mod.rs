//! File-backed implementations of the repository traits.

pub mod people_store;
