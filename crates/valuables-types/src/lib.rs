//! valuables-types - Shared data types for valuables
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - valuables-core (stores, repository, validation)
//! - valuables (command line front end)

pub mod models;

pub use models::{Item, NewItem};
