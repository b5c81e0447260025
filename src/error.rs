use crate::aggregation::AggregationError;
use crate::archive::error::ArchiveError;
use crate::transport::error::TransportError;
use crate::types::lat_lon::CoordinateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainfallError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
