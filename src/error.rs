use thiserror::Error;

use crate::db::StoreError;
use crate::league::mapping::MappingError;
use crate::providers::ProviderError;

/// Failures of the schedule core.
///
/// `SourceFetch` and `Configuration` fail a whole run; `Mapping` and
/// `Persistence` are recorded per game while a batch keeps going.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("schedule source failed: {0}")]
    SourceFetch(#[from] ProviderError),
    #[error("could not map game: {0}")]
    Mapping(#[from] MappingError),
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
    #[error("configuration error: {0}")]
    Configuration(String),
}
