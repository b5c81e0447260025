//! Turns a [`DailyTimeSeries`] into an explicit date-indexed series and totals it.

use crate::archive::response::DailyTimeSeries;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("Series interval must be positive, got {0} s")]
    InvalidInterval(i64),

    #[error("Time axis has {timestamps} steps but {values} values were returned")]
    LengthMismatch { timestamps: usize, values: usize },

    #[error("Could not round total {0} to two decimals")]
    Rounding(f64),
}

/// Daily values paired with the UTC instant each one starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    points: Vec<(DateTime<Utc>, Option<f64>)>,
}

impl DailySeries {
    /// Lays out `start, start + interval, ...` up to (excluding) `end` and zips it
    /// with the values.
    ///
    /// # Errors
    ///
    /// [`AggregationError::LengthMismatch`] if the number of steps differs from the
    /// number of values. Nothing is truncated.
    pub fn from_time_series(series: &DailyTimeSeries) -> Result<Self, AggregationError> {
        if series.interval_seconds <= 0 {
            return Err(AggregationError::InvalidInterval(series.interval_seconds));
        }
        let step = Duration::seconds(series.interval_seconds);

        let mut timestamps = Vec::with_capacity(series.values.len());
        let mut current = series.start;
        while current < series.end {
            timestamps.push(current);
            current += step;
        }

        if timestamps.len() != series.values.len() {
            return Err(AggregationError::LengthMismatch {
                timestamps: timestamps.len(),
                values: series.values.len(),
            });
        }

        Ok(Self {
            points: timestamps
                .into_iter()
                .zip(series.values.iter().copied())
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(DateTime<Utc>, Option<f64>)> {
        self.points.iter()
    }

    /// Sum of all present values. Missing days contribute nothing; an empty
    /// series sums to 0.
    pub fn total(&self) -> f64 {
        let mut total = 0.0;
        for (_, value) in &self.points {
            if let Some(value) = value {
                total += value;
            }
        }
        total
    }
}

/// Rounds to 2 decimals, ties to even.
///
/// Works on the exact decimal expansion of `value`, so `2.675` (stored just
/// below the tie) becomes `2.67` and `612.345` (stored just above) becomes
/// `612.35`.
pub fn round_to_hundredths(value: f64) -> Result<f64, AggregationError> {
    format!("{:.2}", value)
        .parse::<f64>()
        .map_err(|_| AggregationError::Rounding(value))
}
