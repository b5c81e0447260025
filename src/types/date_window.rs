use chrono::NaiveDate;

/// A closed range of calendar days, as sent to the archive API.
///
/// Dates are kept as their `YYYY-MM-DD` literals since that is both the wire
/// format of the upstream request and of our own response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start_date: &'static str,
    pub end_date: &'static str,
}

impl DateWindow {
    /// The fixed one-year window every rainfall total is computed over.
    pub const ANNUAL: DateWindow = DateWindow {
        start_date: "2024-09-13",
        end_date: "2025-09-12",
    };

    /// Parses the start literal. `None` only if the literal is not a valid date.
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.start_date, "%Y-%m-%d").ok()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.end_date, "%Y-%m-%d").ok()
    }

    /// Number of days covered, both ends inclusive.
    pub fn days(&self) -> Option<i64> {
        Some((self.end()? - self.start()?).num_days() + 1)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::ANNUAL
    }
}
