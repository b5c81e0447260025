use crate::archive::error::ArchiveError;
use crate::archive::response::{
    time_bounds, ArchiveErrorResponse, ArchiveResponse, DailyTimeSeries,
};
use crate::transport::client::{CachedHttpClient, TransportResponse};
use crate::types::daily_variable::DailyVariable;
use crate::types::date_window::DateWindow;
use crate::types::lat_lon::LatLon;
use chrono::{DateTime, Utc};
use log::{debug, warn};

pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Client for the Open-Meteo historical weather archive.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    transport: CachedHttpClient,
    base_url: String,
}

impl ArchiveClient {
    pub fn new(transport: CachedHttpClient, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &CachedHttpClient {
        &self.transport
    }

    /// Fetches one daily variable for `location` over `window`, in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Transport`] when the request cannot be completed (after
    /// retries), [`ArchiveError::Upstream`] for a non-2xx answer, and
    /// [`ArchiveError::Decode`], [`ArchiveError::MissingVariable`] or
    /// [`ArchiveError::MalformedTime`] when the payload is not usable.
    pub async fn daily(
        &self,
        location: LatLon,
        window: DateWindow,
        variable: DailyVariable,
    ) -> Result<DailyTimeSeries, ArchiveError> {
        let query = [
            ("latitude", location.latitude().to_string()),
            ("longitude", location.longitude().to_string()),
            ("start_date", window.start_date.to_string()),
            ("end_date", window.end_date.to_string()),
            ("daily", variable.api_name().to_string()),
            ("timezone", "UTC".to_string()),
            ("timeformat", "unixtime".to_string()),
        ];

        let response = self.transport.get(&self.base_url, &query).await?;
        if !response.status.is_success() {
            return Err(upstream_error(response));
        }

        let url = response.url;
        let parsed: ArchiveResponse = serde_json::from_slice(&response.body)
            .map_err(|source| ArchiveError::Decode {
                url: url.clone(),
                source,
            })?;

        let mut daily = parsed.daily.ok_or_else(|| ArchiveError::MissingVariable {
            url: url.clone(),
            variable: variable.to_string(),
        })?;
        let values = daily
            .variables
            .remove(variable.api_name())
            .ok_or_else(|| ArchiveError::MissingVariable {
                url: url.clone(),
                variable: variable.to_string(),
            })?;

        let anchor = window_anchor(window).ok_or_else(|| ArchiveError::MalformedTime {
            url: url.clone(),
            message: format!("invalid window start '{}'", window.start_date),
        })?;
        let (start, end, interval_seconds) = time_bounds(&daily.time, anchor)
            .map_err(|message| ArchiveError::MalformedTime {
                url: url.clone(),
                message,
            })?;

        debug!(
            "Parsed {} daily '{}' values from {} to {}",
            values.len(),
            variable,
            start,
            end
        );
        Ok(DailyTimeSeries {
            start,
            end,
            interval_seconds,
            values,
        })
    }
}

fn window_anchor(window: DateWindow) -> Option<DateTime<Utc>> {
    Some(window.start()?.and_hms_opt(0, 0, 0)?.and_utc())
}

fn upstream_error(response: TransportResponse) -> ArchiveError {
    let reason = serde_json::from_slice::<ArchiveErrorResponse>(&response.body)
        .ok()
        .filter(|body| body.error)
        .and_then(|body| body.reason)
        .unwrap_or_else(|| {
            response
                .status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
    warn!(
        "Archive API rejected {} with {}: {}",
        response.url, response.status, reason
    );
    ArchiveError::Upstream {
        url: response.url,
        status: response.status,
        reason,
    }
}
