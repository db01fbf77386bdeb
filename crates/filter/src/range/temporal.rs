//! Builder vocabulary for timestamp and date/time ranges.
//!
//! Temporal rules read as "starts from", "ends by", "after" and "before"
//! instead of min/max/larger/smaller; the checks are the same.

use chrono::{DateTime, FixedOffset, TimeDelta};
use chrono_tz::Tz;

use super::{
    Comparison, ConfigError, DATETIME_LAYOUT, RangeFilterBuilder, Side, Syntax, Temporal,
};

impl<T: Temporal> RangeFilterBuilder<T> {
    /// left >= t
    pub fn left_start_from(self, t: T) -> Self {
        self.left_min(t)
    }

    /// left <= t
    pub fn left_end_to(self, t: T) -> Self {
        self.left_max(t)
    }

    /// left > t
    pub fn left_after(self, t: T) -> Self {
        self.left_larger_than(t)
    }

    /// left < t
    pub fn left_before(self, t: T) -> Self {
        self.left_smaller_than(t)
    }

    /// right >= t
    pub fn right_start_from(self, t: T) -> Self {
        self.right_min(t)
    }

    /// right <= t
    pub fn right_end_to(self, t: T) -> Self {
        self.right_max(t)
    }

    /// right > t
    pub fn right_after(self, t: T) -> Self {
        self.right_larger_than(t)
    }

    /// right < t
    pub fn right_before(self, t: T) -> Self {
        self.right_smaller_than(t)
    }

    pub fn left_start_from_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Left, Comparison::Min(text.to_owned()))
    }

    pub fn left_end_to_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Left, Comparison::Max(text.to_owned()))
    }

    pub fn left_after_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Left, Comparison::LargerThan(text.to_owned()))
    }

    pub fn left_before_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Left, Comparison::SmallerThan(text.to_owned()))
    }

    pub fn left_equal_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Left, Comparison::Equal(text.to_owned()))
    }

    pub fn left_between_str(self, min: &str, max: &str) -> Self {
        self.endpoint_str(
            Side::Left,
            Comparison::Between(min.to_owned(), max.to_owned()),
        )
    }

    pub fn right_start_from_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Right, Comparison::Min(text.to_owned()))
    }

    pub fn right_end_to_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Right, Comparison::Max(text.to_owned()))
    }

    pub fn right_after_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Right, Comparison::LargerThan(text.to_owned()))
    }

    pub fn right_before_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Right, Comparison::SmallerThan(text.to_owned()))
    }

    pub fn right_equal_str(self, text: &str) -> Self {
        self.endpoint_str(Side::Right, Comparison::Equal(text.to_owned()))
    }

    pub fn right_between_str(self, min: &str, max: &str) -> Self {
        self.endpoint_str(
            Side::Right,
            Comparison::Between(min.to_owned(), max.to_owned()),
        )
    }

    /// The range must span at least `duration`, counted in whole seconds.
    pub fn min_duration(self, duration: TimeDelta) -> Self {
        match whole_seconds(duration) {
            Ok(secs) => self.min_distance(secs),
            Err(err) => self.fail(err),
        }
    }

    /// The range may span at most `duration`, counted in whole seconds.
    pub fn max_duration(self, duration: TimeDelta) -> Self {
        match whole_seconds(duration) {
            Ok(secs) => self.max_distance(secs),
            Err(err) => self.fail(err),
        }
    }
}

fn whole_seconds(duration: TimeDelta) -> Result<u64, ConfigError> {
    if duration.subsec_nanos() != 0 {
        return Err(ConfigError::InvalidDistance(duration.to_string()));
    }
    u64::try_from(duration.num_seconds())
        .map_err(|_| ConfigError::InvalidDistance(duration.to_string()))
}

/// Date/time options.
///
/// # Examples
///
/// ```rust
/// use chrono_tz::Tz;
/// use paramguard_filter::range::time_range;
///
/// let booking = time_range()
///     .has_time()
///     .zone(Tz::UTC)
///     .left_start_from_str("2024-01-01 00:00:00")
///     .max_distance_str("7days")
///     .build()
///     .unwrap();
///
/// assert!(booking.run_str("when", "[2024-02-01 09:00:00,2024-02-03 18:00:00)").is_ok());
/// assert!(booking.run_str("when", "[2023-12-31 23:59:59,2024-01-02 00:00:00]").is_err());
/// ```
impl RangeFilterBuilder<DateTime<FixedOffset>> {
    /// `strftime` layout for endpoints, thresholds and defaults given as
    /// text.
    pub fn layout(self, layout: &str) -> Self {
        self.configure(|syntax| syntax.set_layout(layout))
    }

    /// Switches to the `YYYY-MM-DD HH:MM:SS` layout.
    pub fn has_time(self) -> Self {
        self.layout(DATETIME_LAYOUT)
    }

    /// Zone that naive endpoint text is read in.
    pub fn zone(self, zone: Tz) -> Self {
        self.configure(|syntax| {
            syntax.set_zone_value(zone);
            Ok(())
        })
    }

    /// [`zone`](Self::zone) by IANA name, e.g. `"Europe/Berlin"`.
    pub fn zone_name(self, name: &str) -> Self {
        self.configure(|syntax| syntax.set_zone(name))
    }
}
