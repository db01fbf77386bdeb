//! The filter seam shared by every parameter filter.
//!
//! A [`Filter`] takes a parameter name and an optional raw value and returns
//! either the coerced output, `None` when nothing was supplied, or a
//! [`FilterError`](paramguard_error::FilterError). Absence is never an error
//! at this layer; wrap a filter with [`FilterExt::required`] to make it one.

mod presence;

pub use presence::{EmptyToNil, OrDefault, Required};

use paramguard_error::FilterResult;

// ============================================================================
// INPUT AND OUTPUT
// ============================================================================

/// A raw parameter value as handed to a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param<V> {
    /// Text from the outside world, e.g. a query-string value.
    Text(String),
    /// A value the caller already built.
    Typed(V),
    /// A decoded JSON document.
    Json(serde_json::Value),
}

impl<V> Param<V> {
    /// Wraps an already-typed value.
    pub const fn typed(value: V) -> Self {
        Self::Typed(value)
    }

    /// Returns true for empty text, in either the text or JSON form.
    pub fn is_empty_text(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Json(serde_json::Value::String(text)) => text.is_empty(),
            _ => false,
        }
    }
}

impl<V> From<String> for Param<V> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<V> From<&str> for Param<V> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl<V> From<serde_json::Value> for Param<V> {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// What a filter hands back for a supplied value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filtered<R> {
    /// An allow-listed raw string, returned verbatim.
    Allowed(String),
    /// The coerced and validated value.
    Value(R),
}

impl<R> Filtered<R> {
    pub const fn value(&self) -> Option<&R> {
        match self {
            Self::Value(value) => Some(value),
            Self::Allowed(_) => None,
        }
    }

    pub fn into_value(self) -> Option<R> {
        match self {
            Self::Value(value) => Some(value),
            Self::Allowed(_) => None,
        }
    }

    pub fn allowed(&self) -> Option<&str> {
        match self {
            Self::Allowed(raw) => Some(raw),
            Self::Value(_) => None,
        }
    }

    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

// ============================================================================
// FILTER TRAIT
// ============================================================================

/// Coerces and validates one named parameter.
///
/// # Examples
///
/// ```rust
/// use paramguard_error::{FilterError, FilterResult, codes};
/// use paramguard_filter::foundation::{Filter, FilterExt, Param};
///
/// struct Flag;
///
/// impl Filter for Flag {
///     type Value = bool;
///     type Output = bool;
///
///     fn run(&self, name: &str, value: Option<Param<bool>>) -> FilterResult<Option<bool>> {
///         match value {
///             None => Ok(None),
///             Some(Param::Typed(flag)) => Ok(Some(flag)),
///             Some(Param::Text(text)) => text
///                 .parse()
///                 .map(Some)
///                 .map_err(|_| FilterError::invalid_param(name.to_owned(), "NotBool")),
///             Some(Param::Json(_)) => Err(FilterError::invalid_param(name.to_owned(), "NotBool")),
///         }
///     }
/// }
///
/// assert_eq!(Flag.run("debug", Some("true".into())).unwrap(), Some(true));
/// assert_eq!(Flag.or_default(false).run("debug", None).unwrap(), Some(false));
/// assert!(Flag.required().run("debug", None).is_err());
/// ```
pub trait Filter {
    /// The typed form a caller may pass instead of text.
    type Value;
    /// What a successful run yields.
    type Output;

    fn run(
        &self,
        name: &str,
        value: Option<Param<Self::Value>>,
    ) -> FilterResult<Option<Self::Output>>;
}

impl<F: Filter + ?Sized> Filter for &F {
    type Value = F::Value;
    type Output = F::Output;

    fn run(
        &self,
        name: &str,
        value: Option<Param<Self::Value>>,
    ) -> FilterResult<Option<Self::Output>> {
        (**self).run(name, value)
    }
}

/// Presence adapters for any [`Filter`].
pub trait FilterExt: Filter + Sized {
    /// Rejects an absent value with `MissingParam`.
    fn required(self) -> Required<Self> {
        Required::new(self)
    }

    /// Substitutes `default` for an absent value.
    fn or_default(self, default: Self::Output) -> OrDefault<Self>
    where
        Self::Output: Clone,
    {
        OrDefault::new(self, default)
    }

    /// Treats empty text as absent.
    fn empty_to_nil(self) -> EmptyToNil<Self> {
        EmptyToNil::new(self)
    }
}

impl<F: Filter> FilterExt for F {}
