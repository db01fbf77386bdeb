//! Prelude module for convenient imports.
//!
//! ```rust
//! use paramguard_filter::prelude::*;
//!
//! let filter = int32_range().left_min(0).build().unwrap();
//! assert!(filter.run_str("n", "[0,1]").is_ok());
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{Filter, FilterExt, Filtered, Param};

// ============================================================================
// RANGES
// ============================================================================

pub use crate::range::{
    Bound, Comparison, ConfigError, Range, RangeFilter, RangeFilterBuilder, RangeRule, Side,
    Timestamp, int_range, int32_range, int64_range, time_range, timestamp_range, uint_range,
    uint32_range, uint64_range,
};

// ============================================================================
// CONFIG
// ============================================================================

pub use crate::config::{RangeFilterConfig, RuleConfig};

// ============================================================================
// ERRORS
// ============================================================================

pub use paramguard_error::{ErrorKind, FilterError, FilterResult, codes};
