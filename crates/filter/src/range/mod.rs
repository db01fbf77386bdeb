//! Interval filters.
//!
//! A range filter coerces a parameter into a [`Range`] over one of eight
//! endpoint domains and checks it against an ordered list of rules. One
//! generic implementation serves every domain; the factories below pick the
//! endpoint type.
//!
//! # Examples
//!
//! ```rust
//! use paramguard_filter::prelude::*;
//!
//! let page = int64_range()
//!     .allow("all")
//!     .left_min(0)
//!     .max_distance(100)
//!     .build()
//!     .unwrap();
//!
//! let out = page.run_str("page", "[0,50)").unwrap();
//! assert_eq!(out.into_value(), Some(Range::new(0, 50, true, false)));
//!
//! let err = page.run_str("page", "[0,500]").unwrap_err();
//! assert_eq!(err.to_string(), "InvalidParam:page:TooFar");
//! ```

mod bound;
mod builder;
mod parser;
mod rule;
mod temporal;
mod value;

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use paramguard_error::{FilterError, codes};
use thiserror::Error;
use tracing::warn;

pub use bound::{
    Bound, DATE_LAYOUT, DATETIME_LAYOUT, DEFAULT_ZONE, IntSyntax, SecondsSyntax, Syntax, Temporal,
    TimeSyntax, Timestamp, Vocabulary,
};
pub(crate) use bound::format_radix;
pub use builder::{RangeFilter, RangeFilterBuilder};
pub use parser::{ParseRangeError, SEPARATOR, parse_range};
pub use rule::{Comparison, DistanceLimit, DistanceRule, EndpointRule, RangeRule, width};
pub use value::{Range, Side};

/// A rule or option rejected while configuring a filter.
///
/// Surfaces from [`RangeFilterBuilder::build`]; at run time the same problem
/// is reported as `InternalError` with the `InvalidValidator` reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("radix {0} is outside 2..=36")]
    InvalidRadix(u32),

    #[error("invalid layout {0:?}")]
    InvalidLayout(String),

    #[error("unknown time zone {0:?}")]
    UnknownZone(String),

    #[error("threshold {0:?} does not parse in this domain")]
    InvalidThreshold(String),

    #[error("invalid distance {0:?}")]
    InvalidDistance(String),

    #[error("{0} is not supported by this domain")]
    Unsupported(&'static str),
}

impl ConfigError {
    /// The error a misconfigured filter reports for parameter `name`.
    pub fn into_filter_error(self, name: impl Into<Cow<'static, str>>) -> FilterError {
        let name = name.into();
        warn!(param = %name, error = %self, "filter is misconfigured");
        FilterError::internal(name, codes::INVALID_VALIDATOR)
    }
}

pub type Int32Range = Range<i32>;
pub type Uint32Range = Range<u32>;
pub type Int64Range = Range<i64>;
pub type Uint64Range = Range<u64>;
/// Platform-width signed integers.
pub type IntRange = Range<isize>;
/// Platform-width unsigned integers.
pub type UintRange = Range<usize>;
pub type TimestampRange = Range<Timestamp>;
pub type TimeRange = Range<DateTime<FixedOffset>>;

#[must_use]
pub fn int32_range() -> RangeFilterBuilder<i32> {
    RangeFilterBuilder::new()
}

#[must_use]
pub fn uint32_range() -> RangeFilterBuilder<u32> {
    RangeFilterBuilder::new()
}

#[must_use]
pub fn int64_range() -> RangeFilterBuilder<i64> {
    RangeFilterBuilder::new()
}

#[must_use]
pub fn uint64_range() -> RangeFilterBuilder<u64> {
    RangeFilterBuilder::new()
}

#[must_use]
pub fn int_range() -> RangeFilterBuilder<isize> {
    RangeFilterBuilder::new()
}

#[must_use]
pub fn uint_range() -> RangeFilterBuilder<usize> {
    RangeFilterBuilder::new()
}

/// Ranges of 32-bit Unix seconds, defaulting to `[0, u32::MAX]`.
#[must_use]
pub fn timestamp_range() -> RangeFilterBuilder<Timestamp> {
    RangeFilterBuilder::new()
}

/// Ranges of calendar dates in [`DATE_LAYOUT`], interpreted in
/// [`DEFAULT_ZONE`]. Omitted endpoints default to the Unix epoch and the
/// moment the filter is built.
#[must_use]
pub fn time_range() -> RangeFilterBuilder<DateTime<FixedOffset>> {
    RangeFilterBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramguard_error::ErrorKind;

    #[test]
    fn config_error_maps_to_internal() {
        let err = ConfigError::InvalidRadix(99).into_filter_error("n");
        assert_eq!(err.kind(), ErrorKind::InternalError);
        assert_eq!(err.to_string(), "InternalError:n:InvalidValidator");
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::InvalidRadix(1).to_string(),
            "radix 1 is outside 2..=36"
        );
        assert_eq!(
            ConfigError::Unsupported("layout").to_string(),
            "layout is not supported by this domain"
        );
    }
}
