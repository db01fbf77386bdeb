//! # paramguard-error
//!
//! Error model shared by every paramguard filter.
//!
//! A [`FilterError`] is a category ([`ErrorKind`]) plus an ordered list of
//! context fields. By convention the first field is the parameter name and
//! the rest are reason codes from [`codes`], which an outer layer resolves to
//! localized text.
//!
//! ```rust
//! use paramguard_error::{codes, ErrorKind, FilterError};
//!
//! let err = FilterError::invalid_param("page", codes::LEFT_TOO_SMALL);
//! assert_eq!(err.kind(), ErrorKind::InvalidParam);
//! assert_eq!(err.to_string(), "InvalidParam:page:LeftTooSmall");
//! ```

pub mod codes;
mod error;
mod kind;

pub use error::{FilterError, FilterResult};
pub use kind::ErrorKind;

/// Common imports.
pub mod prelude {
    pub use super::{ErrorKind, FilterError, FilterResult, codes};
}
