use chrono::NaiveDateTime;
use std::fmt;

// ---------------------------------------------------------------------------
// Age calculation
// ---------------------------------------------------------------------------

/// Elapsed ticket age in hours at `now`, with the configured skew
/// correction applied. The tracker records creation time without an
/// offset, so deployments where the evaluation clock disagrees with the
/// tracker clock set `skew_hours` (historically +8).
///
/// A `created` in the future of `now` (clock skew the other way) still
/// yields the absolute difference; the result is never negative.
pub fn age_hours(created: NaiveDateTime, now: NaiveDateTime, skew_hours: f64) -> f64 {
    let elapsed = now.signed_duration_since(created).num_seconds().abs() as f64 / 3600.0;
    (elapsed + skew_hours).max(0.0)
}

// ---------------------------------------------------------------------------
// Magnitude
// ---------------------------------------------------------------------------

/// An hour count bucketed for display: above 48 hours it reads in
/// approximate days (integer division by 24), otherwise in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnitude(f64);

impl Magnitude {
    pub fn from_hours(hours: f64) -> Self {
        Self(hours.max(0.0))
    }

    pub fn hours(self) -> f64 {
        self.0
    }

    /// Short label used in report rows: "N days" / "N hours".
    pub fn plain(self) -> String {
        if self.0 > 48.0 {
            format!("{} days", (self.0 / 24.0) as i64)
        } else {
            format!("{} hours", self.0 as i64)
        }
    }
}

/// Reminder-comment form carries the approximation qualifier.
impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 48.0 {
            write!(f, "{} days(approx)", (self.0 / 24.0) as i64)
        } else {
            write!(f, "{} hours(approx)", self.0 as i64)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn age_is_elapsed_plus_skew() {
        let created = dt(2024, 3, 1, 0);
        let now = dt(2024, 3, 2, 0);
        assert_eq!(age_hours(created, now, 8.0), 32.0);
        assert_eq!(age_hours(created, now, 0.0), 24.0);
    }

    #[test]
    fn future_created_uses_absolute_difference() {
        let created = dt(2024, 3, 2, 0);
        let now = dt(2024, 3, 1, 0);
        assert_eq!(age_hours(created, now, 0.0), 24.0);
    }

    #[test]
    fn age_never_negative() {
        let t = dt(2024, 3, 1, 0);
        assert_eq!(age_hours(t, t, -5.0), 0.0);
    }

    #[test]
    fn magnitude_hours_at_or_below_48() {
        assert_eq!(Magnitude::from_hours(1.0).to_string(), "1 hours(approx)");
        assert_eq!(Magnitude::from_hours(48.0).to_string(), "48 hours(approx)");
        assert_eq!(Magnitude::from_hours(47.9).plain(), "47 hours");
    }

    #[test]
    fn magnitude_days_above_48() {
        assert_eq!(Magnitude::from_hours(49.0).to_string(), "2 days(approx)");
        assert_eq!(Magnitude::from_hours(100.0).plain(), "4 days");
        assert_eq!(Magnitude::from_hours(700.0).to_string(), "29 days(approx)");
    }

    #[test]
    fn day_bucketing_round_trips_within_a_day() {
        for h in [49.0, 72.0, 100.0, 480.0, 2060.0] {
            let days = (h / 24.0) as i64;
            assert!((days as f64 * 24.0 - h).abs() < 24.0);
        }
    }
}
