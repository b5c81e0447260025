use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Body of a successful `/v1/archive` response requested with `timeformat=unixtime`.
///
/// Only the parts we use are modelled; location metadata echoed by the API is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    pub daily: Option<DailyBlock>,
}

/// The `daily` object: one `time` array plus one array per requested variable.
#[derive(Debug, Deserialize)]
pub(crate) struct DailyBlock {
    pub time: Vec<i64>,
    #[serde(flatten)]
    pub variables: HashMap<String, Vec<Option<f64>>>,
}

/// Body the archive API sends alongside a 4xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveErrorResponse {
    #[serde(default)]
    pub error: bool,
    pub reason: Option<String>,
}

/// Daily values of a single variable, with the time axis described by its
/// bounds and step rather than by a list of dates.
///
/// `end` is exclusive: the last value belongs to `end - interval`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTimeSeries {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval_seconds: i64,
    /// `None` where the archive has no value for that day.
    pub values: Vec<Option<f64>>,
}

/// Derives `(start, end, interval)` from an evenly spaced list of unix timestamps.
///
/// An empty list yields an empty range anchored at `anchor`; a single timestamp
/// is assumed to be one day wide.
pub(crate) fn time_bounds(
    time: &[i64],
    anchor: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>, i64), String> {
    let (first, last) = match (time.first(), time.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok((anchor, anchor, SECONDS_PER_DAY)),
    };

    let interval = match time {
        [a, b, ..] => b - a,
        _ => SECONDS_PER_DAY,
    };
    if interval <= 0 {
        return Err(format!("non-increasing timestamps ({} step)", interval));
    }
    if let Some(pair) = time.windows(2).find(|pair| pair[1] - pair[0] != interval) {
        return Err(format!(
            "uneven spacing between {} and {} (expected {} s)",
            pair[0], pair[1], interval
        ));
    }

    let start = DateTime::from_timestamp(first, 0)
        .ok_or_else(|| format!("timestamp {} out of range", first))?;
    let end = last
        .checked_add(interval)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| format!("timestamp {} out of range", last))?;
    Ok((start, end, interval))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> DateTime<Utc> {
        DateTime::from_timestamp(1_726_185_600, 0).unwrap()
    }

    #[test]
    fn bounds_from_daily_timestamps() {
        let time = [1_726_185_600, 1_726_272_000, 1_726_358_400];
        let (start, end, interval) = time_bounds(&time, anchor()).unwrap();
        assert_eq!(start.timestamp(), 1_726_185_600);
        assert_eq!(end.timestamp(), 1_726_444_800);
        assert_eq!(interval, SECONDS_PER_DAY);
    }

    #[test]
    fn single_timestamp_is_one_day() {
        let (start, end, interval) = time_bounds(&[1_726_185_600], anchor()).unwrap();
        assert_eq!((end - start).num_days(), 1);
        assert_eq!(interval, SECONDS_PER_DAY);
    }

    #[test]
    fn empty_time_is_empty_range() {
        let (start, end, _) = time_bounds(&[], anchor()).unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn uneven_or_decreasing_time_is_rejected() {
        assert!(time_bounds(&[0, 86_400, 86_400 * 3], anchor()).is_err());
        assert!(time_bounds(&[86_400, 0], anchor()).is_err());
    }

    #[test]
    fn decodes_nulls_as_missing() {
        let body = r#"{
            "latitude": 51.5, "longitude": -0.12, "timezone": "GMT",
            "daily_units": {"time": "unixtime", "precipitation_sum": "mm"},
            "daily": {"time": [1726185600, 1726272000], "precipitation_sum": [1.2, null]}
        }"#;
        let response: ArchiveResponse = serde_json::from_str(body).unwrap();
        let daily = response.daily.unwrap();
        assert_eq!(daily.time.len(), 2);
        assert_eq!(
            daily.variables.get("precipitation_sum"),
            Some(&vec![Some(1.2), None])
        );
    }
}
