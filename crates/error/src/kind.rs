//! Error categories.
//!
//! The numeric value of every variant is part of an external API contract
//! and must never change. New categories may only be appended.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a [`FilterError`](crate::FilterError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorKind {
    /// The referenced object does not exist.
    ObjectNotExist = 0,
    /// The object already exists.
    ObjectDuplicated = 1,
    /// An update touched no object.
    NoObjectUpdated = 2,
    /// A delete touched no object.
    NoObjectDeleted = 3,
    /// A required parameter was not supplied.
    MissingParam = 4,
    /// A parameter was supplied but failed coercion or validation.
    InvalidParam = 5,
    /// A quota would be exceeded.
    QuotaExceed = 6,
    /// The caller lacks permission.
    PermissionDenied = 7,
    /// The operation failed for a non-parameter reason.
    OperationFailed = 8,
    /// Misconfiguration or an unexpected internal condition.
    InternalError = 9,
}

impl ErrorKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 10] = [
        Self::ObjectNotExist,
        Self::ObjectDuplicated,
        Self::NoObjectUpdated,
        Self::NoObjectDeleted,
        Self::MissingParam,
        Self::InvalidParam,
        Self::QuotaExceed,
        Self::PermissionDenied,
        Self::OperationFailed,
        Self::InternalError,
    ];

    /// Stable numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks a kind up by its numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < Self::ALL.len() {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    /// Canonical label, prepended to the fields when an error is displayed.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ObjectNotExist => "ObjectNotExist",
            Self::ObjectDuplicated => "ObjectDuplicated",
            Self::NoObjectUpdated => "NoObjectUpdated",
            Self::NoObjectDeleted => "NoObjectDeleted",
            Self::MissingParam => "MissingParam",
            Self::InvalidParam => "InvalidParam",
            Self::QuotaExceed => "QuotaExceed",
            Self::PermissionDenied => "PermissionDenied",
            Self::OperationFailed => "OperationFailed",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::ObjectNotExist, 0)]
    #[case(ErrorKind::ObjectDuplicated, 1)]
    #[case(ErrorKind::NoObjectUpdated, 2)]
    #[case(ErrorKind::NoObjectDeleted, 3)]
    #[case(ErrorKind::MissingParam, 4)]
    #[case(ErrorKind::InvalidParam, 5)]
    #[case(ErrorKind::QuotaExceed, 6)]
    #[case(ErrorKind::PermissionDenied, 7)]
    #[case(ErrorKind::OperationFailed, 8)]
    #[case(ErrorKind::InternalError, 9)]
    fn codes_are_stable(#[case] kind: ErrorKind, #[case] code: u8) {
        assert_eq!(kind.code(), code);
        assert_eq!(ErrorKind::from_code(code), Some(kind));
    }

    #[test]
    fn unknown_code() {
        assert_eq!(ErrorKind::from_code(10), None);
        assert_eq!(ErrorKind::from_code(u8::MAX), None);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(ErrorKind::InvalidParam.to_string(), "InvalidParam");
        assert_eq!(ErrorKind::QuotaExceed.to_string(), "QuotaExceed");
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&ErrorKind::MissingParam).unwrap();
        assert_eq!(json, "\"MissingParam\"");
        let back: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorKind::MissingParam);
    }
}
