//! Range filter construction and execution.
//!
//! [`RangeFilterBuilder`] collects options and rules by value. [`build`]
//! resolves textual thresholds against the final syntax and freezes the
//! result into a [`RangeFilter`], which is immutable and cheap to clone, so
//! one instance can be shared across threads and run concurrently.
//!
//! [`build`]: RangeFilterBuilder::build

use std::sync::Arc;

use paramguard_error::{FilterError, FilterResult};
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::rule::Rule;
use super::{
    Bound, Comparison, ConfigError, DistanceLimit, DistanceRule, EndpointRule, IntSyntax,
    ParseRangeError, Range, RangeRule, Side, Syntax, parse_range,
};
use crate::foundation::{Filter, Filtered, Param};

/// Stripped from text input before allow-list matching and parsing.
const TRIMMED: [char; 4] = [' ', '\t', '\r', '\n'];

// ============================================================================
// BUILDER
// ============================================================================

/// A threshold that is either typed already or parsed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Threshold<T> {
    Value(T),
    Text(String),
}

impl<T: Bound> Threshold<T> {
    fn resolve(self, syntax: &T::Syntax) -> Result<T, ConfigError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Text(text) => {
                T::parse_bound(text.trim(), syntax).ok_or(ConfigError::InvalidThreshold(text))
            }
        }
    }
}

enum PendingRule<T> {
    Endpoint(Side, Comparison<Threshold<T>>),
    Distance(DistanceLimit),
    Custom(Arc<dyn RangeRule<T>>),
}

/// Collects the configuration of a [`RangeFilter`].
///
/// Methods take and return the builder by value. A rejected option does not
/// stop the chain; the first rejection is kept and returned by
/// [`build`](Self::build).
///
/// # Examples
///
/// ```rust
/// use paramguard_filter::range::{Range, uint32_range};
///
/// let window = uint32_range()
///     .left_default(1)
///     .right_max(1000)
///     .min_distance(10)
///     .build()
///     .unwrap();
///
/// let range = window.run_str("window", "[,50]").unwrap().into_value();
/// assert_eq!(range, Some(Range::closed(1, 50)));
/// assert!(window.run_str("window", "[1,5]").is_err());
/// ```
#[must_use = "builder methods must be chained or built"]
pub struct RangeFilterBuilder<T: Bound> {
    syntax: T::Syntax,
    allow: Vec<String>,
    left_default: Option<Threshold<T>>,
    right_default: Option<Threshold<T>>,
    rules: Vec<PendingRule<T>>,
    error: Option<ConfigError>,
}

impl<T: Bound> Default for RangeFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bound> RangeFilterBuilder<T> {
    pub fn new() -> Self {
        Self {
            syntax: T::Syntax::default(),
            allow: Vec::new(),
            left_default: None,
            right_default: None,
            rules: Vec::new(),
            error: None,
        }
    }

    /// Replaces the endpoint syntax wholesale.
    pub fn syntax(mut self, syntax: T::Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Applies a fallible change to the syntax, recording a rejection.
    pub(crate) fn configure(
        mut self,
        change: impl FnOnce(&mut T::Syntax) -> Result<(), ConfigError>,
    ) -> Self {
        match change(&mut self.syntax) {
            Ok(()) => self,
            Err(err) => self.fail(err),
        }
    }

    /// Records a configuration error; only the first one is kept.
    pub(crate) fn fail(mut self, err: ConfigError) -> Self {
        self.error.get_or_insert(err);
        self
    }

    /// Accepts `raw` verbatim, bypassing parsing and every rule.
    ///
    /// Matching happens after surrounding whitespace is trimmed, so `raw`
    /// itself should carry none.
    pub fn allow(mut self, raw: impl Into<String>) -> Self {
        self.allow.push(raw.into());
        self
    }

    pub fn left_default(mut self, value: T) -> Self {
        self.left_default = Some(Threshold::Value(value));
        self
    }

    pub fn right_default(mut self, value: T) -> Self {
        self.right_default = Some(Threshold::Value(value));
        self
    }

    /// Left default given as endpoint text, parsed at build time.
    pub fn left_default_str(mut self, text: impl Into<String>) -> Self {
        self.left_default = Some(Threshold::Text(text.into()));
        self
    }

    /// Right default given as endpoint text, parsed at build time.
    pub fn right_default_str(mut self, text: impl Into<String>) -> Self {
        self.right_default = Some(Threshold::Text(text.into()));
        self
    }

    // ------------------------------------------------------------------------
    // Endpoint rules
    // ------------------------------------------------------------------------

    /// Adds a comparison against one endpoint.
    pub fn endpoint(mut self, side: Side, comparison: Comparison<T>) -> Self {
        self.rules.push(PendingRule::Endpoint(
            side,
            comparison.map(Threshold::Value),
        ));
        self
    }

    /// Adds a comparison whose thresholds are endpoint text, parsed at build
    /// time with the final syntax.
    pub fn endpoint_str(mut self, side: Side, comparison: Comparison<String>) -> Self {
        self.rules.push(PendingRule::Endpoint(
            side,
            comparison.map(Threshold::Text),
        ));
        self
    }

    /// left >= v
    pub fn left_min(self, v: T) -> Self {
        self.endpoint(Side::Left, Comparison::Min(v))
    }

    /// left <= v
    pub fn left_max(self, v: T) -> Self {
        self.endpoint(Side::Left, Comparison::Max(v))
    }

    /// left > v
    pub fn left_larger_than(self, v: T) -> Self {
        self.endpoint(Side::Left, Comparison::LargerThan(v))
    }

    /// left < v
    pub fn left_smaller_than(self, v: T) -> Self {
        self.endpoint(Side::Left, Comparison::SmallerThan(v))
    }

    /// left == v
    pub fn left_equal(self, v: T) -> Self {
        self.endpoint(Side::Left, Comparison::Equal(v))
    }

    /// min <= left <= max
    pub fn left_between(self, min: T, max: T) -> Self {
        self.endpoint(Side::Left, Comparison::Between(min, max))
    }

    /// right >= v
    pub fn right_min(self, v: T) -> Self {
        self.endpoint(Side::Right, Comparison::Min(v))
    }

    /// right <= v
    pub fn right_max(self, v: T) -> Self {
        self.endpoint(Side::Right, Comparison::Max(v))
    }

    /// right > v
    pub fn right_larger_than(self, v: T) -> Self {
        self.endpoint(Side::Right, Comparison::LargerThan(v))
    }

    /// right < v
    pub fn right_smaller_than(self, v: T) -> Self {
        self.endpoint(Side::Right, Comparison::SmallerThan(v))
    }

    /// right == v
    pub fn right_equal(self, v: T) -> Self {
        self.endpoint(Side::Right, Comparison::Equal(v))
    }

    /// min <= right <= max
    pub fn right_between(self, min: T, max: T) -> Self {
        self.endpoint(Side::Right, Comparison::Between(min, max))
    }

    // ------------------------------------------------------------------------
    // Distance and custom rules
    // ------------------------------------------------------------------------

    /// The range must cover at least `units`.
    pub fn min_distance(mut self, units: u64) -> Self {
        self.rules
            .push(PendingRule::Distance(DistanceLimit::Min(units)));
        self
    }

    /// The range must cover at most `units`.
    pub fn max_distance(mut self, units: u64) -> Self {
        self.rules
            .push(PendingRule::Distance(DistanceLimit::Max(units)));
        self
    }

    /// [`min_distance`](Self::min_distance) with the distance given as text.
    /// Temporal domains accept human durations such as `"1h 30m"`.
    pub fn min_distance_str(self, text: &str) -> Self {
        match T::parse_distance(text) {
            Ok(units) => self.min_distance(units),
            Err(err) => self.fail(err),
        }
    }

    /// [`max_distance`](Self::max_distance) with the distance given as text.
    pub fn max_distance_str(self, text: &str) -> Self {
        match T::parse_distance(text) {
            Ok(units) => self.max_distance(units),
            Err(err) => self.fail(err),
        }
    }

    /// Appends a custom rule. Closures of the shape
    /// `Fn(&str, &Range<T>) -> FilterResult<()>` qualify.
    pub fn add_rule(mut self, rule: impl RangeRule<T> + 'static) -> Self {
        self.rules.push(PendingRule::Custom(Arc::new(rule)));
        self
    }

    // ------------------------------------------------------------------------
    // Finish
    // ------------------------------------------------------------------------

    /// Freezes the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first option rejected while building, or a textual
    /// threshold or default that does not parse with the final syntax.
    pub fn build(self) -> Result<RangeFilter<T>, ConfigError> {
        self.finish()
            .inspect_err(|err| warn!(error = %err, "range filter configuration rejected"))
    }

    fn finish(self) -> Result<RangeFilter<T>, ConfigError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let syntax = self.syntax;

        let left_default = match self.left_default {
            Some(threshold) => threshold.resolve(&syntax)?,
            None => T::default_left(&syntax),
        };
        let right_default = match self.right_default {
            Some(threshold) => threshold.resolve(&syntax)?,
            None => T::default_right(&syntax),
        };

        let rules = self
            .rules
            .into_iter()
            .map(|pending| -> Result<Rule<T>, ConfigError> {
                Ok(match pending {
                    PendingRule::Endpoint(side, comparison) => {
                        let comparison = comparison.try_map(|t| t.resolve(&syntax))?;
                        Rule::Endpoint(EndpointRule::new(side, comparison))
                    }
                    PendingRule::Distance(limit) => Rule::Distance(DistanceRule::new(limit)),
                    PendingRule::Custom(rule) => Rule::Custom(rule),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RangeFilter {
            config: Arc::new(Config {
                syntax,
                allow: self.allow,
                left_default,
                right_default,
                rules,
            }),
        })
    }
}

impl<T: Bound<Syntax = IntSyntax>> RangeFilterBuilder<T> {
    /// Base for endpoint literals, 2 through 36.
    pub fn radix(self, radix: u32) -> Self {
        self.configure(|syntax| syntax.set_radix(radix))
    }
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug)]
struct Config<T: Bound> {
    syntax: T::Syntax,
    allow: Vec<String>,
    left_default: T,
    right_default: T,
    rules: Vec<Rule<T>>,
}

/// A built range filter.
///
/// Configuration is frozen; [`run`](Self::run) only reads it. Clones share
/// the same configuration.
#[derive(Debug, Clone)]
pub struct RangeFilter<T: Bound> {
    config: Arc<Config<T>>,
}

impl<T> From<Range<T>> for Param<Range<T>> {
    fn from(range: Range<T>) -> Self {
        Self::Typed(range)
    }
}

impl<T: Bound> RangeFilter<T> {
    /// Coerces and validates one parameter.
    ///
    /// - absent (or JSON `null`): `Ok(None)`
    /// - text (or a JSON string): trimmed, matched against the allow list,
    ///   then parsed
    /// - a typed range, or a JSON object with `left`/`right` fields: taken
    ///   as is
    ///
    /// Anything else, and text that does not parse, is `InvalidParam` with
    /// the domain's `Not*Range` reason. Rules run in registration order and
    /// the first failure is returned.
    ///
    /// # Errors
    ///
    /// `InvalidParam` carrying the parameter name and a reason code.
    pub fn run(
        &self,
        name: &str,
        value: Option<Param<Range<T>>>,
    ) -> FilterResult<Option<Filtered<Range<T>>>> {
        let range = match value {
            None | Some(Param::Json(Value::Null)) => {
                trace!(param = name, "no value supplied");
                return Ok(None);
            }
            Some(Param::Text(text) | Param::Json(Value::String(text))) => {
                return self.run_str(name, &text).map(Some);
            }
            Some(Param::Typed(range)) => range,
            Some(Param::Json(object @ Value::Object(_))) => {
                serde_json::from_value(object).map_err(|err| {
                    debug!(param = name, error = %err, "range object rejected");
                    Self::not_range(name)
                })?
            }
            Some(Param::Json(_)) => {
                debug!(param = name, "value is not a range");
                return Err(Self::not_range(name));
            }
        };
        self.validate(name, &range)?;
        Ok(Some(Filtered::Value(range)))
    }

    /// Runs the filter on text.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_str(&self, name: &str, text: &str) -> FilterResult<Filtered<Range<T>>> {
        let text = text.trim_matches(TRIMMED);
        if self.config.allow.iter().any(|allowed| allowed == text) {
            trace!(param = name, value = text, "allow-listed value");
            return Ok(Filtered::Allowed(text.to_owned()));
        }
        let range = self.parse(text).map_err(|err| {
            debug!(param = name, error = %err, "range text rejected");
            Self::not_range(name)
        })?;
        self.validate(name, &range)?;
        Ok(Filtered::Value(range))
    }

    /// Runs every rule against an already-built range.
    ///
    /// # Errors
    ///
    /// The first rule failure.
    pub fn validate(&self, name: &str, range: &Range<T>) -> FilterResult<()> {
        for rule in &self.config.rules {
            if let Err(err) = rule.check(name, range) {
                debug!(
                    param = name,
                    reason = err.reason().unwrap_or_default(),
                    "range rejected"
                );
                return Err(err);
            }
        }
        Ok(())
    }

    /// Parses interval text with this filter's defaults and syntax.
    ///
    /// # Errors
    ///
    /// The text is not interval notation or a bound does not parse.
    pub fn parse(&self, text: &str) -> Result<Range<T>, ParseRangeError> {
        let config = &self.config;
        parse_range(
            text,
            config.left_default,
            config.right_default,
            &config.syntax,
        )
    }

    /// Renders a range so that [`parse`](Self::parse) reads it back.
    #[must_use]
    pub fn format(&self, range: &Range<T>) -> String {
        range.format_with(&self.config.syntax)
    }

    #[must_use]
    pub fn syntax(&self) -> &T::Syntax {
        &self.config.syntax
    }

    #[must_use]
    pub fn left_default(&self) -> T {
        self.config.left_default
    }

    #[must_use]
    pub fn right_default(&self) -> T {
        self.config.right_default
    }

    #[must_use]
    pub fn allow_list(&self) -> &[String] {
        &self.config.allow
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.config.rules.len()
    }

    fn not_range(name: &str) -> FilterError {
        FilterError::invalid_param(name.to_owned(), T::VOCABULARY.not_range)
    }
}

impl<T: Bound> Filter for RangeFilter<T> {
    type Value = Range<T>;
    type Output = Filtered<Range<T>>;

    fn run(
        &self,
        name: &str,
        value: Option<Param<Range<T>>>,
    ) -> FilterResult<Option<Self::Output>> {
        Self::run(self, name, value)
    }
}
