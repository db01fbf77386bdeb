//! Boundary and distance rules.
//!
//! An open endpoint excludes its own value, so a threshold compared against
//! it is first moved one unit outward: down for the left endpoint, up for the
//! right one, saturating at the domain extrema. After that shift an open
//! bound at `v` compares like a closed bound one unit further in.
//!
//! Rules copy their thresholds before adjusting them; evaluating a rule never
//! changes it.

use std::fmt;
use std::sync::Arc;

use paramguard_error::{FilterError, FilterResult, codes};

use super::{Bound, Range, Side};

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A check run against a parsed range.
///
/// Any `Fn(&str, &Range<T>) -> FilterResult<()>` closure is a rule, which is
/// how custom checks are registered.
///
/// # Examples
///
/// ```rust
/// use paramguard_error::{FilterError, FilterResult};
/// use paramguard_filter::range::{Range, RangeRule};
///
/// let even_left = |name: &str, range: &Range<i64>| -> FilterResult<()> {
///     if range.left % 2 == 0 {
///         Ok(())
///     } else {
///         Err(FilterError::invalid_param(name.to_owned(), "LeftNotEven"))
///     }
/// };
/// assert!(even_left.check("r", &Range::closed(2, 3)).is_ok());
/// ```
pub trait RangeRule<T>: Send + Sync {
    fn check(&self, name: &str, range: &Range<T>) -> FilterResult<()>;
}

impl<T, F> RangeRule<T> for F
where
    F: Fn(&str, &Range<T>) -> FilterResult<()> + Send + Sync,
{
    fn check(&self, name: &str, range: &Range<T>) -> FilterResult<()> {
        self(name, range)
    }
}

// ============================================================================
// ENDPOINT RULES
// ============================================================================

/// Comparison applied to one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison<T> {
    /// endpoint >= v
    Min(T),
    /// endpoint <= v
    Max(T),
    /// endpoint > v
    LargerThan(T),
    /// endpoint < v
    SmallerThan(T),
    /// endpoint == v
    Equal(T),
    /// min <= endpoint <= max
    Between(T, T),
}

impl<T> Comparison<T> {
    /// Applies `f` to every threshold, stopping at the first error.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Comparison<U>, E> {
        Ok(match self {
            Self::Min(v) => Comparison::Min(f(v)?),
            Self::Max(v) => Comparison::Max(f(v)?),
            Self::LargerThan(v) => Comparison::LargerThan(f(v)?),
            Self::SmallerThan(v) => Comparison::SmallerThan(f(v)?),
            Self::Equal(v) => Comparison::Equal(f(v)?),
            Self::Between(min, max) => Comparison::Between(f(min)?, f(max)?),
        })
    }

    pub(crate) fn map<U>(self, mut f: impl FnMut(T) -> U) -> Comparison<U> {
        match self {
            Self::Min(v) => Comparison::Min(f(v)),
            Self::Max(v) => Comparison::Max(f(v)),
            Self::LargerThan(v) => Comparison::LargerThan(f(v)),
            Self::SmallerThan(v) => Comparison::SmallerThan(f(v)),
            Self::Equal(v) => Comparison::Equal(f(v)),
            Self::Between(min, max) => Comparison::Between(f(min), f(max)),
        }
    }
}

/// Too low or too high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Low,
    High,
}

impl<T: Ord> Comparison<T> {
    fn test(&self, value: &T) -> Result<(), Outcome> {
        let failed = match self {
            Self::Min(v) => (value < v).then_some(Outcome::Low),
            Self::Max(v) => (value > v).then_some(Outcome::High),
            Self::LargerThan(v) => (value <= v).then_some(Outcome::Low),
            Self::SmallerThan(v) => (value >= v).then_some(Outcome::High),
            Self::Equal(v) | Self::Between(v, _) if value < v => Some(Outcome::Low),
            Self::Equal(v) | Self::Between(_, v) if value > v => Some(Outcome::High),
            Self::Equal(_) | Self::Between(..) => None,
        };
        failed.map_or(Ok(()), Err)
    }
}

/// Compares one endpoint of a range against a threshold.
///
/// # Examples
///
/// ```rust
/// use paramguard_filter::range::{Comparison, EndpointRule, Range, Side};
///
/// let rule = EndpointRule::new(Side::Left, Comparison::Min(10_i64));
/// // `(9,..` starts at 10, so it satisfies "left >= 10".
/// assert!(rule.evaluate(&Range::new(9, 20, false, true)).is_ok());
/// assert!(rule.evaluate(&Range::new(9, 20, true, true)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointRule<T> {
    side: Side,
    comparison: Comparison<T>,
}

impl<T: Bound> EndpointRule<T> {
    pub const fn new(side: Side, comparison: Comparison<T>) -> Self {
        Self { side, comparison }
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub const fn comparison(&self) -> &Comparison<T> {
        &self.comparison
    }

    /// Runs the comparison, returning the reason code on failure.
    pub fn evaluate(&self, range: &Range<T>) -> Result<(), &'static str> {
        let (value, closed) = range.endpoint(self.side);
        let side = self.side;
        let thresholds = self.comparison.map(|v| match (closed, side) {
            (true, _) => v,
            (false, Side::Left) => v.step_down(),
            (false, Side::Right) => v.step_up(),
        });

        let vocabulary = T::VOCABULARY;
        thresholds.test(value).map_err(|outcome| match (side, outcome) {
            (Side::Left, Outcome::Low) => vocabulary.left_low,
            (Side::Left, Outcome::High) => vocabulary.left_high,
            (Side::Right, Outcome::Low) => vocabulary.right_low,
            (Side::Right, Outcome::High) => vocabulary.right_high,
        })
    }
}

impl<T: Bound> RangeRule<T> for EndpointRule<T> {
    fn check(&self, name: &str, range: &Range<T>) -> FilterResult<()> {
        self.evaluate(range)
            .map_err(|reason| FilterError::invalid_param(name.to_owned(), reason))
    }
}

// ============================================================================
// DISTANCE RULES
// ============================================================================

/// Bound on the number of units a range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceLimit {
    Min(u64),
    Max(u64),
}

/// Checks the width of a range.
///
/// The width is `right - left`, reduced by one for each open endpoint (left
/// first, then right). An open endpoint on a range that is already zero units
/// wide leaves nothing to exclude, which is reported as `WrongRange` rather
/// than clamped. So is a range whose left endpoint lies past its right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DistanceRule {
    limit: DistanceLimit,
}

impl DistanceRule {
    pub const fn new(limit: DistanceLimit) -> Self {
        Self { limit }
    }

    pub const fn limit(&self) -> DistanceLimit {
        self.limit
    }

    /// Runs the check, returning the reason code on failure.
    pub fn evaluate<T: Bound>(&self, range: &Range<T>) -> Result<(), &'static str> {
        let width = width(range)?;
        match self.limit {
            DistanceLimit::Min(min) if width < u128::from(min) => Err(codes::TOO_NEAR),
            DistanceLimit::Max(max) if width > u128::from(max) => Err(codes::TOO_FAR),
            _ => Ok(()),
        }
    }
}

impl<T: Bound> RangeRule<T> for DistanceRule {
    fn check(&self, name: &str, range: &Range<T>) -> FilterResult<()> {
        self.evaluate(range)
            .map_err(|reason| FilterError::invalid_param(name.to_owned(), reason))
    }
}

/// Units strictly covered by the range, or `WrongRange`.
pub fn width<T: Bound>(range: &Range<T>) -> Result<u128, &'static str> {
    if range.left > range.right {
        return Err(codes::WRONG_RANGE);
    }
    let mut width =
        u128::try_from(T::span(range.left, range.right)).map_err(|_| codes::WRONG_RANGE)?;
    if !range.left_closed {
        width = width.checked_sub(1).ok_or(codes::WRONG_RANGE)?;
    }
    if !range.right_closed {
        width = width.checked_sub(1).ok_or(codes::WRONG_RANGE)?;
    }
    Ok(width)
}

// ============================================================================
// STORED RULES
// ============================================================================

/// A rule as stored in a built filter.
pub(crate) enum Rule<T> {
    Endpoint(EndpointRule<T>),
    Distance(DistanceRule),
    Custom(Arc<dyn RangeRule<T>>),
}

impl<T: Bound> Rule<T> {
    pub(crate) fn check(&self, name: &str, range: &Range<T>) -> FilterResult<()> {
        match self {
            Self::Endpoint(rule) => rule.check(name, range),
            Self::Distance(rule) => rule.check(name, range),
            Self::Custom(rule) => rule.check(name, range),
        }
    }
}

impl<T: Clone> Clone for Rule<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Endpoint(rule) => Self::Endpoint(rule.clone()),
            Self::Distance(rule) => Self::Distance(*rule),
            Self::Custom(rule) => Self::Custom(Arc::clone(rule)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoint(rule) => fmt::Debug::fmt(rule, f),
            Self::Distance(rule) => fmt::Debug::fmt(rule, f),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Timestamp;
    use rstest::rstest;

    fn left<T: Bound>(c: Comparison<T>) -> EndpointRule<T> {
        EndpointRule::new(Side::Left, c)
    }

    fn right<T: Bound>(c: Comparison<T>) -> EndpointRule<T> {
        EndpointRule::new(Side::Right, c)
    }

    #[test]
    fn left_min_open_shifts_threshold_down() {
        let rule = left(Comparison::Min(10_i64));
        assert_eq!(rule.evaluate(&Range::new(9, 20, false, true)), Ok(()));
        assert_eq!(
            rule.evaluate(&Range::new(9, 20, true, true)),
            Err(codes::LEFT_TOO_SMALL)
        );
        assert_eq!(
            rule.evaluate(&Range::new(8, 20, false, true)),
            Err(codes::LEFT_TOO_SMALL)
        );
    }

    #[test]
    fn right_max_open_shifts_threshold_up() {
        let rule = right(Comparison::Max(10_i64));
        assert_eq!(rule.evaluate(&Range::new(0, 11, true, false)), Ok(()));
        assert_eq!(
            rule.evaluate(&Range::new(0, 11, true, true)),
            Err(codes::RIGHT_TOO_LARGE)
        );
    }

    #[rstest]
    #[case(Comparison::Min(5), 5, true, Ok(()))]
    #[case(Comparison::Min(5), 4, true, Err(codes::LEFT_TOO_SMALL))]
    #[case(Comparison::Max(5), 5, true, Ok(()))]
    #[case(Comparison::Max(5), 4, false, Ok(()))]
    #[case(Comparison::Max(5), 5, false, Err(codes::LEFT_TOO_LARGE))]
    #[case(Comparison::LargerThan(5), 5, true, Err(codes::LEFT_TOO_SMALL))]
    #[case(Comparison::LargerThan(5), 5, false, Ok(()))]
    #[case(Comparison::SmallerThan(5), 4, true, Ok(()))]
    #[case(Comparison::SmallerThan(5), 4, false, Err(codes::LEFT_TOO_LARGE))]
    #[case(Comparison::Equal(5), 5, true, Ok(()))]
    #[case(Comparison::Equal(5), 4, false, Ok(()))]
    #[case(Comparison::Equal(5), 5, false, Err(codes::LEFT_TOO_LARGE))]
    #[case(Comparison::Equal(5), 3, false, Err(codes::LEFT_TOO_SMALL))]
    #[case(Comparison::Between(2, 5), 1, true, Err(codes::LEFT_TOO_SMALL))]
    #[case(Comparison::Between(2, 5), 1, false, Ok(()))]
    #[case(Comparison::Between(2, 5), 5, false, Err(codes::LEFT_TOO_LARGE))]
    fn left_shapes(
        #[case] comparison: Comparison<i32>,
        #[case] value: i32,
        #[case] closed: bool,
        #[case] expected: Result<(), &'static str>,
    ) {
        let range = Range::new(value, 100, closed, true);
        assert_eq!(left(comparison).evaluate(&range), expected);
    }

    #[rstest]
    #[case(Comparison::Min(5), 5, true, Ok(()))]
    #[case(Comparison::Min(5), 5, false, Err(codes::RIGHT_TOO_SMALL))]
    #[case(Comparison::Min(5), 6, false, Ok(()))]
    #[case(Comparison::Max(5), 6, false, Ok(()))]
    #[case(Comparison::LargerThan(5), 6, false, Err(codes::RIGHT_TOO_SMALL))]
    #[case(Comparison::LargerThan(5), 7, false, Ok(()))]
    #[case(Comparison::SmallerThan(5), 5, false, Ok(()))]
    #[case(Comparison::SmallerThan(5), 5, true, Err(codes::RIGHT_TOO_LARGE))]
    #[case(Comparison::Equal(5), 6, false, Ok(()))]
    #[case(Comparison::Equal(5), 6, true, Err(codes::RIGHT_TOO_LARGE))]
    #[case(Comparison::Between(2, 5), 2, false, Err(codes::RIGHT_TOO_SMALL))]
    #[case(Comparison::Between(2, 5), 6, false, Ok(()))]
    fn right_shapes(
        #[case] comparison: Comparison<i32>,
        #[case] value: i32,
        #[case] closed: bool,
        #[case] expected: Result<(), &'static str>,
    ) {
        let range = Range::new(-100, value, true, closed);
        assert_eq!(right(comparison).evaluate(&range), expected);
    }

    #[test]
    fn adjustment_saturates_at_extrema() {
        let rule = right(Comparison::Max(i64::MAX));
        assert_eq!(rule.evaluate(&Range::new(0, i64::MAX, true, false)), Ok(()));

        let rule = left(Comparison::Min(i64::MIN));
        assert_eq!(rule.evaluate(&Range::new(i64::MIN, 0, false, true)), Ok(()));

        let rule = left(Comparison::Between(0_u64, 0));
        assert_eq!(rule.evaluate(&Range::new(0, 9, false, true)), Ok(()));

        let rule = right(Comparison::Equal(u32::MAX));
        assert_eq!(rule.evaluate(&Range::new(0, u32::MAX, true, false)), Ok(()));
    }

    #[test]
    fn evaluation_does_not_drift() {
        let rule = left(Comparison::Min(10_i64));
        let open = Range::new(9, 20, false, true);
        for _ in 0..3 {
            assert_eq!(rule.evaluate(&open), Ok(()));
        }
        assert_eq!(rule.comparison(), &Comparison::Min(10));
    }

    #[test]
    fn temporal_vocabulary() {
        let rule = left(Comparison::Min(Timestamp(100)));
        assert_eq!(
            rule.evaluate(&Range::closed(Timestamp(50), Timestamp(200))),
            Err(codes::LEFT_TOO_EARLY)
        );
        let rule = right(Comparison::Max(Timestamp(100)));
        assert_eq!(
            rule.evaluate(&Range::closed(Timestamp(50), Timestamp(200))),
            Err(codes::RIGHT_TOO_LATE)
        );
    }

    #[rstest]
    #[case(Range::closed(5, 5), Ok(0))]
    #[case(Range::new(5, 5, false, true), Err(codes::WRONG_RANGE))]
    #[case(Range::new(5, 5, true, false), Err(codes::WRONG_RANGE))]
    #[case(Range::open(5, 6), Err(codes::WRONG_RANGE))]
    #[case(Range::open(5, 7), Ok(0))]
    #[case(Range::new(5, 6, false, true), Ok(0))]
    #[case(Range::closed(1, 10), Ok(9))]
    #[case(Range::closed(10, 1), Err(codes::WRONG_RANGE))]
    fn widths(#[case] range: Range<i64>, #[case] expected: Result<u128, &'static str>) {
        assert_eq!(width(&range), expected);
    }

    #[test]
    fn width_at_domain_extremes() {
        assert_eq!(
            width(&Range::closed(i64::MIN, i64::MAX)),
            Ok(u128::from(u64::MAX))
        );
        assert_eq!(
            width(&Range::open(u64::MIN, u64::MAX)),
            Ok(u128::from(u64::MAX) - 2)
        );
        assert_eq!(
            width(&Range::closed(isize::MIN, isize::MAX)),
            Ok(usize::MAX as u128)
        );
    }

    #[test]
    fn distance_limits() {
        let near = DistanceRule::new(DistanceLimit::Min(3));
        assert_eq!(near.evaluate(&Range::closed(0_i32, 3)), Ok(()));
        assert_eq!(near.evaluate(&Range::new(0_i32, 3, false, true)), Err(codes::TOO_NEAR));

        let far = DistanceRule::new(DistanceLimit::Max(3));
        assert_eq!(far.evaluate(&Range::closed(0_i32, 3)), Ok(()));
        assert_eq!(far.evaluate(&Range::closed(0_i32, 4)), Err(codes::TOO_FAR));
        assert_eq!(far.evaluate(&Range::open(0_i32, 5)), Ok(()));

        let unbounded = DistanceRule::new(DistanceLimit::Max(u64::MAX));
        assert_eq!(unbounded.evaluate(&Range::closed(i64::MIN, i64::MAX)), Ok(()));
    }

    #[test]
    fn rule_errors_carry_param_name() {
        let err = DistanceRule::new(DistanceLimit::Min(0))
            .check("window", &Range::open(1_u32, 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "InvalidParam:window:WrongRange");
    }
}
