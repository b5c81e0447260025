//! Defines the daily aggregates that can be requested from the Open-Meteo archive.

use std::fmt;

/// A daily variable of the Open-Meteo archive API.
///
/// Each variant maps to the name used both in the `daily=` query parameter and as the
/// key of the returned value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailyVariable {
    /// Sum of daily precipitation (rain, showers and snowfall) in millimetres.
    PrecipitationSum,
    /// Sum of daily rain in millimetres.
    RainSum,
    /// Sum of daily snowfall in centimetres.
    SnowfallSum,
}

impl DailyVariable {
    pub(crate) fn api_name(&self) -> &'static str {
        match self {
            DailyVariable::PrecipitationSum => "precipitation_sum",
            DailyVariable::RainSum => "rain_sum",
            DailyVariable::SnowfallSum => "snowfall_sum",
        }
    }
}

/// Allows formatting a `DailyVariable` using its API name.
///
/// # Examples
///
/// ```
/// use annual_rainfall::DailyVariable;
///
/// assert_eq!(DailyVariable::PrecipitationSum.to_string(), "precipitation_sum");
/// ```
impl fmt::Display for DailyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}
