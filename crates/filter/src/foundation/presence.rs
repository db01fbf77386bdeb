//! Presence adapters: required, default, and empty-to-absent.

use paramguard_error::{FilterError, FilterResult};
use tracing::trace;

use super::{Filter, Param};

/// Fails with `MissingParam` when the value is absent, or when the inner
/// filter reports nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required<F> {
    inner: F,
}

impl<F> Required<F> {
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }

    pub const fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Filter> Filter for Required<F> {
    type Value = F::Value;
    type Output = F::Output;

    fn run(
        &self,
        name: &str,
        value: Option<Param<Self::Value>>,
    ) -> FilterResult<Option<Self::Output>> {
        let Some(value) = value else {
            return Err(FilterError::missing_param(name.to_owned()));
        };
        match self.inner.run(name, Some(value))? {
            Some(output) => Ok(Some(output)),
            None => Err(FilterError::missing_param(name.to_owned())),
        }
    }
}

/// Substitutes a default output when the value is absent. The inner filter
/// does not see absent values, so the default is never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrDefault<F: Filter> {
    inner: F,
    default: F::Output,
}

impl<F: Filter> OrDefault<F> {
    pub const fn new(inner: F, default: F::Output) -> Self {
        Self { inner, default }
    }

    pub const fn default_output(&self) -> &F::Output {
        &self.default
    }
}

impl<F> Filter for OrDefault<F>
where
    F: Filter,
    F::Output: Clone,
{
    type Value = F::Value;
    type Output = F::Output;

    fn run(
        &self,
        name: &str,
        value: Option<Param<Self::Value>>,
    ) -> FilterResult<Option<Self::Output>> {
        let output = match value {
            Some(value) => self.inner.run(name, Some(value))?,
            None => None,
        };
        Ok(Some(output.unwrap_or_else(|| {
            trace!(param = name, "substituting default");
            self.default.clone()
        })))
    }
}

/// Turns an empty string into an absent value before the inner filter runs.
///
/// Only the exact empty string counts; whitespace is left to the inner
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyToNil<F> {
    inner: F,
}

impl<F> EmptyToNil<F> {
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }

    pub const fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: Filter> Filter for EmptyToNil<F> {
    type Value = F::Value;
    type Output = F::Output;

    fn run(
        &self,
        name: &str,
        value: Option<Param<Self::Value>>,
    ) -> FilterResult<Option<Self::Output>> {
        let value = value.filter(|param| !param.is_empty_text());
        self.inner.run(name, value)
    }
}
