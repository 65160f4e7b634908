//! Application layer: mapping resolution and retrieval logic.

pub mod services;
