//! Declarative range filter configuration.
//!
//! Lets rule definitions live in a config file instead of code. The same
//! description builds a filter for any domain; thresholds are written as
//! numbers or as endpoint text and parsed in the target domain.
//!
//! ```toml
//! allow = ["all"]
//! has_time = true
//! zone = "UTC"
//!
//! [[rules]]
//! left_start_from = "2024-01-01 00:00:00"
//!
//! [[rules]]
//! max_distance = "7days"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::range::{
    Bound, Comparison, ConfigError, DATETIME_LAYOUT, IntSyntax, RangeFilter, RangeFilterBuilder,
    Side, Syntax, format_radix,
};

/// A threshold value: an integer, or endpoint text for the target domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Uint(u64),
    Text(String),
}

impl Scalar {
    /// Endpoint text for this value. Integers are rendered in `radix` so
    /// they mean the same number whatever base the domain parses in.
    fn to_endpoint_text(&self, radix: u32) -> String {
        match self {
            Self::Int(v) => format_radix(i128::from(*v), radix),
            Self::Uint(v) => format_radix(i128::from(*v), radix),
            Self::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Uint(v) => fmt::Display::fmt(v, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// One rule, keyed by its builder name. Temporal spellings
/// (`left_start_from`, `right_before`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleConfig {
    #[serde(alias = "left_start_from")]
    LeftMin(Scalar),
    #[serde(alias = "left_end_to")]
    LeftMax(Scalar),
    #[serde(alias = "left_after")]
    LeftLargerThan(Scalar),
    #[serde(alias = "left_before")]
    LeftSmallerThan(Scalar),
    LeftEqual(Scalar),
    LeftBetween(Scalar, Scalar),
    #[serde(alias = "right_start_from")]
    RightMin(Scalar),
    #[serde(alias = "right_end_to")]
    RightMax(Scalar),
    #[serde(alias = "right_after")]
    RightLargerThan(Scalar),
    #[serde(alias = "right_before")]
    RightSmallerThan(Scalar),
    RightEqual(Scalar),
    RightBetween(Scalar, Scalar),
    /// Units, or a human duration for temporal domains.
    MinDistance(Scalar),
    MaxDistance(Scalar),
}

impl RuleConfig {
    fn apply<T: Bound>(&self, builder: RangeFilterBuilder<T>, radix: u32) -> RangeFilterBuilder<T> {
        let text = |scalar: &Scalar| scalar.to_endpoint_text(radix);
        let (side, comparison) = match self {
            Self::MinDistance(units) => return builder.min_distance_str(&units.to_string()),
            Self::MaxDistance(units) => return builder.max_distance_str(&units.to_string()),
            Self::LeftMin(v) => (Side::Left, Comparison::Min(text(v))),
            Self::LeftMax(v) => (Side::Left, Comparison::Max(text(v))),
            Self::LeftLargerThan(v) => (Side::Left, Comparison::LargerThan(text(v))),
            Self::LeftSmallerThan(v) => (Side::Left, Comparison::SmallerThan(text(v))),
            Self::LeftEqual(v) => (Side::Left, Comparison::Equal(text(v))),
            Self::LeftBetween(min, max) => (Side::Left, Comparison::Between(text(min), text(max))),
            Self::RightMin(v) => (Side::Right, Comparison::Min(text(v))),
            Self::RightMax(v) => (Side::Right, Comparison::Max(text(v))),
            Self::RightLargerThan(v) => (Side::Right, Comparison::LargerThan(text(v))),
            Self::RightSmallerThan(v) => (Side::Right, Comparison::SmallerThan(text(v))),
            Self::RightEqual(v) => (Side::Right, Comparison::Equal(text(v))),
            Self::RightBetween(min, max) => {
                (Side::Right, Comparison::Between(text(min), text(max)))
            }
        };
        builder.endpoint_str(side, comparison)
    }
}

/// Serializable description of a range filter.
///
/// Options a domain does not support (a radix on a date range, a zone on an
/// integer range) are configuration errors, reported by
/// [`build`](Self::build).
///
/// # Examples
///
/// ```rust
/// use paramguard_filter::config::RangeFilterConfig;
///
/// let config: RangeFilterConfig = serde_json::from_str(r#"{
///     "allow": ["all"],
///     "rules": [{ "left_min": 1 }, { "max_distance": 100 }]
/// }"#).unwrap();
///
/// let filter = config.build::<u32>().unwrap();
/// assert!(filter.run_str("page", "[1,50]").is_ok());
/// assert!(filter.run_str("page", "all").unwrap().is_allowed());
/// assert!(filter.run_str("page", "[0,50]").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeFilterConfig {
    pub allow: Vec<String>,
    pub left_default: Option<Scalar>,
    pub right_default: Option<Scalar>,
    pub radix: Option<u32>,
    pub layout: Option<String>,
    /// Shorthand for the `YYYY-MM-DD HH:MM:SS` layout; wins over `layout`.
    pub has_time: bool,
    /// IANA zone name.
    pub zone: Option<String>,
    pub rules: Vec<RuleConfig>,
}

impl RangeFilterConfig {
    /// A builder carrying this configuration, for further chaining.
    pub fn builder<T: Bound>(&self) -> RangeFilterBuilder<T> {
        let mut builder = RangeFilterBuilder::<T>::new();

        if let Some(radix) = self.radix {
            builder = builder.configure(|syntax| syntax.set_radix(radix));
        }
        if let Some(layout) = &self.layout {
            builder = builder.configure(|syntax| syntax.set_layout(layout));
        }
        if self.has_time {
            builder = builder.configure(|syntax| syntax.set_layout(DATETIME_LAYOUT));
        }
        if let Some(zone) = &self.zone {
            builder = builder.configure(|syntax| syntax.set_zone(zone));
        }

        let radix = self.radix.unwrap_or(IntSyntax::DEFAULT_RADIX);
        for raw in &self.allow {
            builder = builder.allow(raw.as_str());
        }
        if let Some(value) = &self.left_default {
            builder = builder.left_default_str(value.to_endpoint_text(radix));
        }
        if let Some(value) = &self.right_default {
            builder = builder.right_default_str(value.to_endpoint_text(radix));
        }
        self.rules
            .iter()
            .fold(builder, |builder, rule| rule.apply(builder, radix))
    }

    /// Builds a filter for domain `T`.
    ///
    /// # Errors
    ///
    /// An option the domain does not support, or a threshold, default or
    /// distance that does not parse in it.
    pub fn build<T: Bound>(&self) -> Result<RangeFilter<T>, ConfigError> {
        self.builder::<T>().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Range, Timestamp};
    use chrono::{DateTime, FixedOffset};
    use paramguard_error::codes;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_rules_keep_order() {
        let config: RangeFilterConfig = serde_json::from_value(json!({
            "rules": [
                { "left_between": [0, 10] },
                { "right_smaller_than": 100 },
                { "min_distance": 2 }
            ]
        }))
        .unwrap();
        assert_eq!(
            config.rules,
            vec![
                RuleConfig::LeftBetween(Scalar::Int(0), Scalar::Int(10)),
                RuleConfig::RightSmallerThan(Scalar::Int(100)),
                RuleConfig::MinDistance(Scalar::Int(2)),
            ]
        );

        let filter = config.build::<i32>().unwrap();
        assert_eq!(filter.rule_count(), 3);
        let err = filter.run_str("r", "[11,100]").unwrap_err();
        assert_eq!(err.reason(), Some(codes::LEFT_TOO_LARGE));
        let err = filter.run_str("r", "[5,6]").unwrap_err();
        assert_eq!(err.reason(), Some(codes::TOO_NEAR));
    }

    #[test]
    fn toml_time_config() {
        let config: RangeFilterConfig = toml::from_str(
            r#"
            allow = ["all"]
            has_time = true
            zone = "UTC"

            [[rules]]
            left_start_from = "2024-01-01 00:00:00"

            [[rules]]
            max_distance = "7days"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.rules[0],
            RuleConfig::LeftMin(Scalar::Text("2024-01-01 00:00:00".to_owned()))
        );

        let filter = config.build::<DateTime<FixedOffset>>().unwrap();
        assert!(filter.run_str("t", "all").unwrap().is_allowed());
        assert!(
            filter
                .run_str("t", "[2024-02-01 00:00:00,2024-02-02 00:00:00]")
                .is_ok()
        );
        let err = filter
            .run_str("t", "[2024-02-01 00:00:00,2024-03-01 00:00:00]")
            .unwrap_err();
        assert_eq!(err.reason(), Some(codes::TOO_FAR));
    }

    #[test]
    fn numeric_thresholds_survive_radix() {
        let config = RangeFilterConfig {
            radix: Some(16),
            left_default: Some(Scalar::Int(16)),
            rules: vec![RuleConfig::LeftMin(Scalar::Int(16))],
            ..RangeFilterConfig::default()
        };
        let filter = config.build::<i64>().unwrap();
        assert_eq!(filter.left_default(), 16);
        assert!(filter.run_str("r", "[10,ff]").is_ok());
        assert!(filter.run_str("r", "[f,ff]").is_err());
    }

    #[test]
    fn unsupported_options_fail_build() {
        let config = RangeFilterConfig {
            zone: Some("UTC".to_owned()),
            ..RangeFilterConfig::default()
        };
        assert_eq!(
            config.build::<u64>().unwrap_err(),
            ConfigError::Unsupported("zone")
        );

        let config = RangeFilterConfig {
            radix: Some(8),
            ..RangeFilterConfig::default()
        };
        assert_eq!(
            config.build::<Timestamp>().unwrap_err(),
            ConfigError::Unsupported("radix")
        );
    }

    #[test]
    fn bad_values_fail_build() {
        let config = RangeFilterConfig {
            rules: vec![RuleConfig::RightMax(Scalar::Int(-1))],
            ..RangeFilterConfig::default()
        };
        assert!(matches!(
            config.build::<u32>(),
            Err(ConfigError::InvalidThreshold(_))
        ));

        let config = RangeFilterConfig {
            rules: vec![RuleConfig::MaxDistance(Scalar::Int(-1))],
            ..RangeFilterConfig::default()
        };
        assert!(matches!(
            config.build::<u32>(),
            Err(ConfigError::InvalidDistance(_))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<RangeFilterConfig, _> =
            serde_json::from_value(json!({ "allow": [], "radixx": 2 }));
        assert!(result.is_err());
    }

    #[test]
    fn large_unsigned_thresholds() {
        let config: RangeFilterConfig =
            serde_json::from_value(json!({ "rules": [{ "right_max": 18_446_744_073_709_551_615_u64 }] }))
                .unwrap();
        assert_eq!(config.rules, vec![RuleConfig::RightMax(Scalar::Uint(u64::MAX))]);
        let filter = config.build::<u64>().unwrap();
        let out = filter.run_str("r", "[0,]").unwrap();
        assert_eq!(out.into_value(), Some(Range::closed(0, u64::MAX)));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RangeFilterConfig {
            allow: vec!["all".to_owned()],
            rules: vec![
                RuleConfig::LeftEqual(Scalar::from("2024-01-01")),
                RuleConfig::MaxDistance(Scalar::from(86_400_i64)),
            ],
            ..RangeFilterConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        let back: RangeFilterConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
