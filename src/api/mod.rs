//! HTTP surface: DTOs, handlers, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
