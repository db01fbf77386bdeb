//! Reason codes.
//!
//! Opaque identifiers placed after the parameter name in
//! [`FilterError::fields`](crate::FilterError::fields). They are resolved to
//! user-facing text outside this workspace, so the spelling is a contract.

// Registration

/// A validator was registered with an unusable argument (bad layout,
/// unparseable threshold, sub-second duration, ...).
pub const INVALID_VALIDATOR: &str = "InvalidValidator";

// Distance

/// The range is narrower than the configured minimum distance.
pub const TOO_NEAR: &str = "TooNear";
/// The range is wider than the configured maximum distance.
pub const TOO_FAR: &str = "TooFar";
/// The range is empty once its open bounds are excluded.
pub const WRONG_RANGE: &str = "WrongRange";

// Coercion

pub const NOT_INT_RANGE: &str = "NotIntRange";
pub const NOT_INT32_RANGE: &str = "NotInt32Range";
pub const NOT_INT64_RANGE: &str = "NotInt64Range";
pub const NOT_UINT_RANGE: &str = "NotUintRange";
pub const NOT_UINT32_RANGE: &str = "NotUint32Range";
pub const NOT_UINT64_RANGE: &str = "NotUint64Range";
pub const NOT_TIMESTAMP_RANGE: &str = "NotTimestampRange";
pub const NOT_TIME_RANGE: &str = "NotTimeRange";

// Numeric endpoints

pub const LEFT_TOO_SMALL: &str = "LeftTooSmall";
pub const LEFT_TOO_LARGE: &str = "LeftTooLarge";
pub const RIGHT_TOO_SMALL: &str = "RightTooSmall";
pub const RIGHT_TOO_LARGE: &str = "RightTooLarge";

// Temporal endpoints

pub const LEFT_TOO_EARLY: &str = "LeftTooEarly";
pub const LEFT_TOO_LATE: &str = "LeftTooLate";
pub const RIGHT_TOO_EARLY: &str = "RightTooEarly";
pub const RIGHT_TOO_LATE: &str = "RightTooLate";
