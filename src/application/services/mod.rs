pub mod mapping_service;

pub use mapping_service::{MappingError, MappingService, ResolvedMapping, RetrievedMapping};
