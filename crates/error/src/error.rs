//! The error value returned by every filter.
//!
//! Fields use `Cow<'static, str>` so the common case (a borrowed parameter
//! name copied once, plus a static reason code) stays cheap.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ErrorKind;

/// Separator between the kind label and each field in the display form.
const DELIMITER: &str = ":";

/// Result alias used throughout paramguard.
pub type FilterResult<T> = Result<T, FilterError>;

/// A categorized failure with ordered context fields.
///
/// # Examples
///
/// ```rust
/// use paramguard_error::{ErrorKind, FilterError};
///
/// let err = FilterError::new(ErrorKind::InvalidParam, ["range", "TooFar"]);
/// assert_eq!(err.param(), Some("range"));
/// assert_eq!(err.reason(), Some("TooFar"));
/// assert_eq!(err.to_string(), "InvalidParam:range:TooFar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterError {
    kind: ErrorKind,
    fields: SmallVec<[Cow<'static, str>; 2]>,
}

impl FilterError {
    /// Creates an error from a kind and any number of fields.
    pub fn new<I, S>(kind: ErrorKind, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            kind,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// `InvalidParam` with the parameter name and a reason code.
    pub fn invalid_param(param: impl Into<Cow<'static, str>>, reason: &'static str) -> Self {
        Self::with_reason(ErrorKind::InvalidParam, param, reason)
    }

    /// `MissingParam` carrying only the parameter name.
    pub fn missing_param(param: impl Into<Cow<'static, str>>) -> Self {
        let mut fields = SmallVec::new();
        fields.push(param.into());
        Self {
            kind: ErrorKind::MissingParam,
            fields,
        }
    }

    /// `InternalError` with the parameter name and a reason code.
    pub fn internal(param: impl Into<Cow<'static, str>>, reason: &'static str) -> Self {
        Self::with_reason(ErrorKind::InternalError, param, reason)
    }

    fn with_reason(
        kind: ErrorKind,
        param: impl Into<Cow<'static, str>>,
        reason: &'static str,
    ) -> Self {
        let mut fields = SmallVec::new();
        fields.push(param.into());
        fields.push(Cow::Borrowed(reason));
        Self { kind, fields }
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Replaces the parameter name (first field), inserting one if absent.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, param: impl Into<Cow<'static, str>>) -> Self {
        match self.fields.first_mut() {
            Some(first) => *first = param.into(),
            None => self.fields.push(param.into()),
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn fields(&self) -> &[Cow<'static, str>] {
        &self.fields
    }

    /// The parameter name, if one was recorded.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.fields.first().map(AsRef::as_ref)
    }

    /// The reason code following the parameter name.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.fields.get(1).map(AsRef::as_ref)
    }

    /// Returns true if this error carries the given kind and reason code.
    #[must_use]
    pub fn is(&self, kind: ErrorKind, reason: &str) -> bool {
        self.kind == kind && self.reason() == Some(reason)
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.label())?;
        for field in &self.fields {
            f.write_str(DELIMITER)?;
            f.write_str(field)?;
        }
        Ok(())
    }
}

impl std::error::Error for FilterError {}
