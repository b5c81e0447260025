use thiserror::Error;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use annual_rainfall::LatLon;
///
/// let london = LatLon(51.5074, -0.1278);
/// assert_eq!(london.0, 51.5074); // Latitude
/// assert_eq!(london.1, -0.1278); // Longitude
/// assert!(london.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Inclusive latitude bounds in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Inclusive longitude bounds in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside the range -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside the range -180..=180")]
    LongitudeOutOfRange(f64),
}

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Checks both components against their valid ranges.
    ///
    /// NaN and infinite values never fall inside a range and are rejected.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !in_range(self.0, LATITUDE_RANGE) {
            return Err(CoordinateError::LatitudeOutOfRange(self.0));
        }
        if !in_range(self.1, LONGITUDE_RANGE) {
            return Err(CoordinateError::LongitudeOutOfRange(self.1));
        }
        Ok(())
    }
}

pub(crate) fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_edges() {
        assert!(LatLon(90.0, 180.0).validate().is_ok());
        assert!(LatLon(-90.0, -180.0).validate().is_ok());
        assert!(LatLon(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            LatLon(91.0, 0.0).validate(),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            LatLon(0.0, 181.0).validate(),
            Err(CoordinateError::LongitudeOutOfRange(181.0))
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(LatLon(f64::NAN, 0.0).validate().is_err());
        assert!(LatLon(0.0, f64::INFINITY).validate().is_err());
    }
}
