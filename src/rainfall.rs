//! This module provides the main entry point of the library: a long-lived
//! [`RainfallService`] that turns a coordinate into a yearly rainfall total.

use crate::aggregation::{round_to_hundredths, DailySeries};
use crate::archive::client::{ArchiveClient, ARCHIVE_URL};
use crate::error::RainfallError;
use crate::transport::cache::ResponseCache;
use crate::transport::client::CachedHttpClient;
use crate::transport::retry::RetryPolicy;
use crate::types::annual_rainfall::AnnualRainfall;
use crate::types::daily_variable::DailyVariable;
use crate::types::date_window::DateWindow;
use crate::types::lat_lon::LatLon;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Computes yearly rainfall totals from the Open-Meteo archive.
///
/// Build one instance at start-up and share it: it owns the HTTP connection
/// pool and the handle on the response cache directory.
///
/// # Examples
///
/// ```no_run
/// # use annual_rainfall::{LatLon, RainfallError, RainfallService};
/// # #[tokio::main]
/// # async fn main() -> Result<(), RainfallError> {
/// let service = RainfallService::builder().build().await?;
/// let london = service.annual_rainfall(LatLon(51.5074, -0.1278)).await?;
/// println!("{} mm", london.rainfall_mm);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RainfallService {
    archive: ArchiveClient,
}

#[bon]
impl RainfallService {
    /// Creates a service, creating the cache directory if needed.
    ///
    /// # Arguments
    ///
    /// * `.cache_dir(PathBuf)`: Optional. Where responses are cached. Defaults to
    ///   `annual_rainfall_cache` inside the system cache directory.
    /// * `.archive_url(String)`: Optional. Archive endpoint, defaults to [`ARCHIVE_URL`].
    /// * `.retry_policy(RetryPolicy)`: Optional. Defaults to 5 retries, factor 0.2.
    /// * `.request_timeout(Duration)`: Optional. Per-attempt timeout, defaults to 30 s.
    ///
    /// # Errors
    ///
    /// Returns [`RainfallError::CacheDirResolution`] if no cache dir was given and the
    /// system one cannot be found, [`RainfallError::CacheDirCreation`] if the directory
    /// cannot be created, and [`RainfallError::Transport`] if the HTTP client fails to build.
    #[builder]
    pub async fn new(
        cache_dir: Option<PathBuf>,
        #[builder(into)] archive_url: Option<String>,
        retry_policy: Option<RetryPolicy>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, RainfallError> {
        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => get_cache_dir().map_err(RainfallError::CacheDirResolution)?,
        };
        ensure_cache_dir_exists(&cache_dir)
            .await
            .map_err(|e| RainfallError::CacheDirCreation(cache_dir.clone(), e))?;

        let transport = CachedHttpClient::with_timeout(
            ResponseCache::new(&cache_dir),
            retry_policy.unwrap_or_default(),
            request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        )?;
        let archive = ArchiveClient::new(
            transport,
            archive_url.unwrap_or_else(|| ARCHIVE_URL.to_string()),
        );
        info!(
            "Rainfall service using {} with cache at {}",
            archive.base_url(),
            cache_dir.display()
        );

        Ok(Self { archive })
    }

    pub fn archive(&self) -> &ArchiveClient {
        &self.archive
    }

    /// Total precipitation at `location` over [`DateWindow::ANNUAL`].
    pub async fn annual_rainfall(&self, location: LatLon) -> Result<AnnualRainfall, RainfallError> {
        self.rainfall_over(location, DateWindow::ANNUAL).await
    }

    /// Total precipitation at `location` over `window`, rounded to 2 decimals.
    ///
    /// # Errors
    ///
    /// [`RainfallError::InvalidCoordinate`] for out-of-range coordinates (no request
    /// is sent), [`RainfallError::Archive`] if fetching or parsing fails, and
    /// [`RainfallError::Aggregation`] if the response's time axis and values disagree.
    pub async fn rainfall_over(
        &self,
        location: LatLon,
        window: DateWindow,
    ) -> Result<AnnualRainfall, RainfallError> {
        location.validate()?;

        let time_series = self
            .archive
            .daily(location, window, DailyVariable::PrecipitationSum)
            .await?;
        let series = DailySeries::from_time_series(&time_series)?;
        if window.days() != i64::try_from(series.len()).ok() {
            warn!(
                "Archive returned {} days for {} to {}, expected {:?}",
                series.len(),
                window.start_date,
                window.end_date,
                window.days()
            );
        }
        let rainfall_mm = round_to_hundredths(series.total())?;

        info!(
            "Rainfall at ({}, {}) from {} to {}: {} mm over {} days",
            location.latitude(),
            location.longitude(),
            window.start_date,
            window.end_date,
            rainfall_mm,
            series.len()
        );
        Ok(AnnualRainfall::new(location, window, rainfall_mm))
    }
}
