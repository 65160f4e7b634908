//! Core domain types: mapping records, key construction, and the store contract.

pub mod mapping;
pub mod store;

pub use mapping::{ForwardRecord, MappingParams, ReverseRecord, reverse_key};
pub use store::{MappingStore, StoreError, StoreFields};
