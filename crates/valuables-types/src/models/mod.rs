//! Data models for valuables

pub mod item;

pub use item::{Item, NewItem};
