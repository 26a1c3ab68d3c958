//! Configuration module for spriteslice
//!
//! Provides types, discovery and loading for the optional `sprs.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
