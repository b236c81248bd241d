//! Shared building blocks for the people service crates.
//!
//! - `types`: small response types shared by handlers.
//! - `utils::logging`: tracing subscriber setup.
//! - `env`: startup checks for the runtime environment.

pub mod env;
pub mod types;
pub mod utils;
