use crate::types::date_window::DateWindow;
use crate::types::lat_lon::LatLon;
use serde::{Deserialize, Serialize};

/// The yearly rainfall total for a single coordinate.
///
/// This is exactly the JSON body returned by `GET /annual-rainfall`.
///
/// # Examples
///
/// ```
/// use annual_rainfall::{AnnualRainfall, DateWindow, LatLon};
///
/// let result = AnnualRainfall::new(LatLon(51.5074, -0.1278), DateWindow::ANNUAL, 612.4);
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["start_date"], "2024-09-13");
/// assert_eq!(json["rainfall_mm"], 612.4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRainfall {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: String,
    pub end_date: String,
    /// Sum of daily precipitation in millimetres, rounded to 2 decimals.
    pub rainfall_mm: f64,
}

impl AnnualRainfall {
    pub fn new(location: LatLon, window: DateWindow, rainfall_mm: f64) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            start_date: window.start_date.to_string(),
            end_date: window.end_date.to_string(),
            rainfall_mm,
        }
    }
}
