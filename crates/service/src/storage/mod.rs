//! Storage abstractions for service layer
//!
//! Contains the file-backed map every repository in this crate persists through.

pub mod json_map_store;
