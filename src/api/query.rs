use crate::types::lat_lon::{in_range, LatLon, LATITUDE_RANGE, LONGITUDE_RANGE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw `?lat=&lon=` parameters, kept as strings so every problem can be reported
/// per field instead of failing on the first one.
#[derive(Debug, Default, Deserialize)]
pub struct RainfallQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// One violated constraint on a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: [&'static str; 2],
    pub msg: String,
    pub input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub detail: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .detail
            .iter()
            .map(|issue| format!("{}: {}", issue.loc[1], issue.msg))
            .collect();
        write!(f, "{}", fields.join("; "))
    }
}

impl RainfallQuery {
    /// Parses and range-checks both coordinates, collecting all issues.
    pub fn location(&self) -> Result<LatLon, ValidationErrors> {
        let lat = parse_coordinate("lat", self.lat.as_deref(), LATITUDE_RANGE);
        let lon = parse_coordinate("lon", self.lon.as_deref(), LONGITUDE_RANGE);
        match (lat, lon) {
            (Ok(lat), Ok(lon)) => Ok(LatLon(lat, lon)),
            (lat, lon) => Err(ValidationErrors {
                detail: lat.err().into_iter().chain(lon.err()).collect(),
            }),
        }
    }
}

fn parse_coordinate(
    field: &'static str,
    raw: Option<&str>,
    range: (f64, f64),
) -> Result<f64, ValidationIssue> {
    let issue = |kind: &'static str, msg: String| ValidationIssue {
        kind,
        loc: ["query", field],
        msg,
        input: raw.map(str::to_string),
    };

    let raw = raw.ok_or_else(|| issue("missing", "Field required".to_string()))?;
    let value: f64 = raw.trim().parse().map_err(|_| {
        issue(
            "float_parsing",
            "Input should be a valid number, unable to parse string as a number".to_string(),
        )
    })?;
    if !value.is_finite() {
        return Err(issue(
            "finite_number",
            "Input should be a finite number".to_string(),
        ));
    }
    if value < range.0 {
        return Err(issue(
            "greater_than_equal",
            format!("Input should be greater than or equal to {}", range.0),
        ));
    }
    if !in_range(value, range) {
        return Err(issue(
            "less_than_equal",
            format!("Input should be less than or equal to {}", range.1),
        ));
    }
    Ok(value)
}
