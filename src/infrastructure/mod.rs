//! Infrastructure layer: key-value store implementations.

pub mod store;
