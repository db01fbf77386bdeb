//! Domain bindings for range endpoints.
//!
//! Every endpoint type implements [`Bound`]. The range parser, the endpoint
//! rules and the distance rules are written once against this trait, so the
//! eight domains differ only in the handful of items below.

use std::fmt::{self, Debug, Display, Write as _};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use paramguard_error::codes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ConfigError, SEPARATOR};

/// Reason codes reported by one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    /// Coercion failure, e.g. `NotInt64Range`.
    pub not_range: &'static str,
    pub left_low: &'static str,
    pub left_high: &'static str,
    pub right_low: &'static str,
    pub right_high: &'static str,
}

impl Vocabulary {
    const fn numeric(not_range: &'static str) -> Self {
        Self {
            not_range,
            left_low: codes::LEFT_TOO_SMALL,
            left_high: codes::LEFT_TOO_LARGE,
            right_low: codes::RIGHT_TOO_SMALL,
            right_high: codes::RIGHT_TOO_LARGE,
        }
    }

    const fn temporal(not_range: &'static str) -> Self {
        Self {
            not_range,
            left_low: codes::LEFT_TOO_EARLY,
            left_high: codes::LEFT_TOO_LATE,
            right_low: codes::RIGHT_TOO_EARLY,
            right_high: codes::RIGHT_TOO_LATE,
        }
    }
}

/// Textual options a domain's endpoint parser understands.
///
/// Setters a domain does not support report [`ConfigError::Unsupported`].
pub trait Syntax: Clone + Debug + Default + Send + Sync + 'static {
    fn set_radix(&mut self, radix: u32) -> Result<(), ConfigError> {
        let _ = radix;
        Err(ConfigError::Unsupported("radix"))
    }

    fn set_layout(&mut self, layout: &str) -> Result<(), ConfigError> {
        let _ = layout;
        Err(ConfigError::Unsupported("layout"))
    }

    fn set_zone(&mut self, zone: &str) -> Result<(), ConfigError> {
        let _ = zone;
        Err(ConfigError::Unsupported("zone"))
    }
}

/// An ordinal endpoint type.
///
/// One unit is `1` for integer domains and one second for temporal ones.
pub trait Bound:
    Copy + Ord + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Syntax: Syntax;

    const VOCABULARY: Vocabulary;

    fn min_value() -> Self;

    fn max_value() -> Self;

    /// Substituted for an omitted left endpoint when no default is configured.
    fn default_left(syntax: &Self::Syntax) -> Self {
        let _ = syntax;
        Self::min_value()
    }

    /// Substituted for an omitted right endpoint when no default is configured.
    fn default_right(syntax: &Self::Syntax) -> Self {
        let _ = syntax;
        Self::max_value()
    }

    /// One unit down, saturating at [`Bound::min_value`].
    #[must_use]
    fn step_down(self) -> Self;

    /// One unit up, saturating at [`Bound::max_value`].
    #[must_use]
    fn step_up(self) -> Self;

    /// `right - left` in units, computed wide enough to never overflow.
    fn span(left: Self, right: Self) -> i128;

    fn parse_bound(text: &str, syntax: &Self::Syntax) -> Option<Self>;

    fn format_bound(&self, syntax: &Self::Syntax) -> String;

    /// Parses a distance threshold given as text.
    fn parse_distance(text: &str) -> Result<u64, ConfigError> {
        text.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidDistance(text.to_owned()))
    }
}

/// Marker for domains whose rules read as earlier/later rather than
/// smaller/larger.
pub trait Temporal: Bound {}

// ============================================================================
// INTEGER DOMAINS
// ============================================================================

/// Integer endpoint syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntSyntax {
    radix: u32,
}

impl IntSyntax {
    pub const DEFAULT_RADIX: u32 = 10;

    pub fn with_radix(radix: u32) -> Result<Self, ConfigError> {
        if (2..=36).contains(&radix) {
            Ok(Self { radix })
        } else {
            Err(ConfigError::InvalidRadix(radix))
        }
    }

    #[must_use]
    pub const fn radix(&self) -> u32 {
        self.radix
    }
}

impl Default for IntSyntax {
    fn default() -> Self {
        Self {
            radix: Self::DEFAULT_RADIX,
        }
    }
}

impl Syntax for IntSyntax {
    fn set_radix(&mut self, radix: u32) -> Result<(), ConfigError> {
        *self = Self::with_radix(radix)?;
        Ok(())
    }
}

pub(crate) fn format_radix(value: i128, radix: u32) -> String {
    if radix == 10 {
        return value.to_string();
    }
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    loop {
        let digit = (magnitude % u128::from(radix)) as u32;
        digits.push(char::from_digit(digit, radix).unwrap_or('?'));
        magnitude /= u128::from(radix);
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

macro_rules! integer_bound {
    ($($ty:ty => $not_range:expr),+ $(,)?) => {$(
        impl Bound for $ty {
            type Syntax = IntSyntax;

            const VOCABULARY: Vocabulary = Vocabulary::numeric($not_range);

            fn min_value() -> Self {
                <$ty>::MIN
            }

            fn max_value() -> Self {
                <$ty>::MAX
            }

            fn step_down(self) -> Self {
                self.saturating_sub(1)
            }

            fn step_up(self) -> Self {
                self.saturating_add(1)
            }

            fn span(left: Self, right: Self) -> i128 {
                right as i128 - left as i128
            }

            fn parse_bound(text: &str, syntax: &IntSyntax) -> Option<Self> {
                <$ty>::from_str_radix(text, syntax.radix).ok()
            }

            fn format_bound(&self, syntax: &IntSyntax) -> String {
                format_radix(*self as i128, syntax.radix)
            }
        }
    )+};
}

integer_bound! {
    i32 => codes::NOT_INT32_RANGE,
    u32 => codes::NOT_UINT32_RANGE,
    i64 => codes::NOT_INT64_RANGE,
    u64 => codes::NOT_UINT64_RANGE,
    isize => codes::NOT_INT_RANGE,
    usize => codes::NOT_UINT_RANGE,
}

// ============================================================================
// TIMESTAMP DOMAIN
// ============================================================================

/// Unix time in whole seconds, stored in 32 bits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u32);

impl Timestamp {
    #[must_use]
    pub const fn new(secs: u32) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// The instant this timestamp denotes.
    #[must_use]
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + chrono::TimeDelta::seconds(i64::from(self.0))
    }
}

impl From<u32> for Timestamp {
    fn from(secs: u32) -> Self {
        Self(secs)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Timestamps are always plain decimal seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SecondsSyntax;

impl Syntax for SecondsSyntax {}

impl Bound for Timestamp {
    type Syntax = SecondsSyntax;

    const VOCABULARY: Vocabulary = Vocabulary::temporal(codes::NOT_TIMESTAMP_RANGE);

    fn min_value() -> Self {
        Self(u32::MIN)
    }

    fn max_value() -> Self {
        Self(u32::MAX)
    }

    fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    fn step_up(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    fn span(left: Self, right: Self) -> i128 {
        i128::from(right.0) - i128::from(left.0)
    }

    fn parse_bound(text: &str, _syntax: &SecondsSyntax) -> Option<Self> {
        text.parse().ok().map(Self)
    }

    fn format_bound(&self, _syntax: &SecondsSyntax) -> String {
        self.0.to_string()
    }

    fn parse_distance(text: &str) -> Result<u64, ConfigError> {
        match text.trim().parse() {
            Ok(secs) => Ok(secs),
            Err(_) => whole_seconds(text),
        }
    }
}

impl Temporal for Timestamp {}

// ============================================================================
// DATE/TIME DOMAIN
// ============================================================================

/// Layout for date-only values.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";
/// Layout for values carrying a time of day.
pub const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
/// Zone that naive input is interpreted in unless configured otherwise.
pub const DEFAULT_ZONE: Tz = Tz::Asia__Shanghai;

/// Date/time endpoint syntax: a `strftime` layout and the zone naive input
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSyntax {
    layout: String,
    zone: Tz,
}

impl TimeSyntax {
    pub fn new(layout: &str, zone: Tz) -> Result<Self, ConfigError> {
        check_layout(layout)?;
        Ok(Self {
            layout: layout.to_owned(),
            zone,
        })
    }

    #[must_use]
    pub fn layout(&self) -> &str {
        &self.layout
    }

    #[must_use]
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    pub(crate) fn set_zone_value(&mut self, zone: Tz) {
        self.zone = zone;
    }

    /// Parses `text` with the layout. Date-only layouts resolve to midnight.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        let naive = NaiveDateTime::parse_from_str(text, &self.layout)
            .or_else(|_| {
                NaiveDate::parse_from_str(text, &self.layout).map(|d| d.and_time(NaiveTime::MIN))
            })
            .ok()?;
        self.zone
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.fixed_offset())
    }

    /// Renders `value` in the zone with the layout.
    #[must_use]
    pub fn format(&self, value: &DateTime<FixedOffset>) -> String {
        let mut out = String::new();
        // The layout was checked on the way in.
        let _ = write!(
            out,
            "{}",
            value.with_timezone(&self.zone).format(&self.layout)
        );
        out
    }
}

impl Default for TimeSyntax {
    fn default() -> Self {
        Self {
            layout: DATE_LAYOUT.to_owned(),
            zone: DEFAULT_ZONE,
        }
    }
}

impl Syntax for TimeSyntax {
    fn set_layout(&mut self, layout: &str) -> Result<(), ConfigError> {
        check_layout(layout)?;
        layout.clone_into(&mut self.layout);
        Ok(())
    }

    fn set_zone(&mut self, zone: &str) -> Result<(), ConfigError> {
        self.zone = zone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownZone(zone.to_owned()))?;
        Ok(())
    }
}

/// Rejects layouts chrono cannot read and layouts whose literal text holds
/// the endpoint separator, which the range parser would split on.
fn check_layout(layout: &str) -> Result<(), ConfigError> {
    let unusable = |item: Item<'_>| match item {
        Item::Error => true,
        Item::Literal(text) => text.contains(SEPARATOR),
        Item::OwnedLiteral(text) => text.contains(SEPARATOR),
        _ => false,
    };
    if layout.is_empty() || StrftimeItems::new(layout).any(unusable) {
        return Err(ConfigError::InvalidLayout(layout.to_owned()));
    }
    Ok(())
}

/// Parses a human duration (`"90s"`, `"1h 30m"`) into whole seconds.
pub(crate) fn whole_seconds(text: &str) -> Result<u64, ConfigError> {
    let duration = humantime::parse_duration(text.trim())
        .map_err(|_| ConfigError::InvalidDistance(text.to_owned()))?;
    if duration.subsec_nanos() != 0 {
        return Err(ConfigError::InvalidDistance(text.to_owned()));
    }
    Ok(duration.as_secs())
}

impl Bound for DateTime<FixedOffset> {
    type Syntax = TimeSyntax;

    const VOCABULARY: Vocabulary = Vocabulary::temporal(codes::NOT_TIME_RANGE);

    fn min_value() -> Self {
        DateTime::<Utc>::MIN_UTC.fixed_offset()
    }

    fn max_value() -> Self {
        DateTime::<Utc>::MAX_UTC.fixed_offset()
    }

    fn default_left(syntax: &TimeSyntax) -> Self {
        DateTime::<Utc>::UNIX_EPOCH
            .with_timezone(&syntax.zone)
            .fixed_offset()
    }

    /// "Now", truncated to the layout's precision.
    fn default_right(syntax: &TimeSyntax) -> Self {
        let now = Utc::now().with_timezone(&syntax.zone).fixed_offset();
        syntax.parse(&syntax.format(&now)).unwrap_or(now)
    }

    fn step_down(self) -> Self {
        self.checked_sub_signed(chrono::TimeDelta::seconds(1))
            .unwrap_or(self)
    }

    fn step_up(self) -> Self {
        self.checked_add_signed(chrono::TimeDelta::seconds(1))
            .unwrap_or(self)
    }

    /// Whole seconds, rounded toward negative infinity so that an inverted
    /// range never spans zero.
    fn span(left: Self, right: Self) -> i128 {
        let delta = right.signed_duration_since(left);
        let secs = i128::from(delta.num_seconds());
        if delta.subsec_nanos() < 0 { secs - 1 } else { secs }
    }

    fn parse_bound(text: &str, syntax: &TimeSyntax) -> Option<Self> {
        syntax.parse(text)
    }

    fn format_bound(&self, syntax: &TimeSyntax) -> String {
        syntax.format(self)
    }

    fn parse_distance(text: &str) -> Result<u64, ConfigError> {
        whole_seconds(text)
    }
}

impl Temporal for DateTime<FixedOffset> {}
