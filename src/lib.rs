pub mod aggregation;
pub mod api;
mod archive;
mod config;
mod error;
mod rainfall;
mod transport;
mod types;
mod utils;

pub use error::RainfallError;
pub use rainfall::*;

pub use aggregation::{round_to_hundredths, AggregationError, DailySeries};
pub use archive::client::{ArchiveClient, ARCHIVE_URL};
pub use archive::error::ArchiveError;
pub use archive::response::DailyTimeSeries;
pub use config::{ConfigError, ServerConfig};

pub use transport::cache::{CacheKey, ResponseCache};
pub use transport::client::{CachedHttpClient, TransportResponse};
pub use transport::error::TransportError;
pub use transport::retry::RetryPolicy;

pub use types::annual_rainfall::AnnualRainfall;
pub use types::daily_variable::DailyVariable;
pub use types::date_window::DateWindow;
pub use types::lat_lon::{CoordinateError, LatLon};
