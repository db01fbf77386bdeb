//! Interval notation parser.
//!
//! Grammar, after trimming surrounding whitespace:
//!
//! ```text
//! range   := ""                        -- both endpoints defaulted, closed
//!          | open body close
//!          | body                      -- no brackets: closed on both sides
//! open    := "[" | "("
//! close   := "]" | ")"
//! body    := bound? "," bound?         -- exactly one separator
//! ```
//!
//! An omitted bound takes the default for its side. Whitespace around each
//! bound is ignored.

use thiserror::Error;

use super::{Bound, Range, Side};

/// Separator between the two endpoints.
pub const SEPARATOR: char = ',';

/// Why a piece of text is not a range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRangeError {
    #[error("range {0:?} has only one bracket")]
    UnbalancedBracket(String),

    #[error("range {0:?} has no ',' separator")]
    MissingSeparator(String),

    #[error("range {0:?} has more than one ',' separator")]
    ExtraSeparator(String),

    #[error("invalid {side} bound {text:?}")]
    InvalidBound { side: Side, text: String },
}

/// Parses interval notation into a [`Range`].
///
/// # Examples
///
/// ```rust
/// use paramguard_filter::range::{IntSyntax, Range, parse_range};
///
/// let syntax = IntSyntax::default();
/// let r = parse_range("(1,10]", 0_i64, 100, &syntax).unwrap();
/// assert_eq!(r, Range::new(1, 10, false, true));
///
/// let r = parse_range("[,10)", i64::MIN, i64::MAX, &syntax).unwrap();
/// assert_eq!(r.left, i64::MIN);
/// ```
pub fn parse_range<T: Bound>(
    text: &str,
    default_left: T,
    default_right: T,
    syntax: &T::Syntax,
) -> Result<Range<T>, ParseRangeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Range::closed(default_left, default_right));
    }

    let (left_closed, rest) = match text.as_bytes()[0] {
        b'[' => (Some(true), &text[1..]),
        b'(' => (Some(false), &text[1..]),
        _ => (None, text),
    };
    let (right_closed, body) = match rest.as_bytes().last() {
        Some(b']') => (Some(true), &rest[..rest.len() - 1]),
        Some(b')') => (Some(false), &rest[..rest.len() - 1]),
        _ => (None, rest),
    };
    let (left_closed, right_closed) = match (left_closed, right_closed) {
        (Some(l), Some(r)) => (l, r),
        (None, None) => (true, true),
        _ => return Err(ParseRangeError::UnbalancedBracket(text.to_owned())),
    };

    let Some((left, right)) = body.split_once(SEPARATOR) else {
        return Err(ParseRangeError::MissingSeparator(text.to_owned()));
    };
    if right.contains(SEPARATOR) {
        return Err(ParseRangeError::ExtraSeparator(text.to_owned()));
    }

    Ok(Range {
        left: parse_bound(Side::Left, left, default_left, syntax)?,
        right: parse_bound(Side::Right, right, default_right, syntax)?,
        left_closed,
        right_closed,
    })
}

fn parse_bound<T: Bound>(
    side: Side,
    raw: &str,
    default: T,
    syntax: &T::Syntax,
) -> Result<T, ParseRangeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    T::parse_bound(raw, syntax).ok_or_else(|| ParseRangeError::InvalidBound {
        side,
        text: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{IntSyntax, SecondsSyntax, Timestamp};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn int64(text: &str) -> Result<Range<i64>, ParseRangeError> {
        parse_range(text, i64::MIN, i64::MAX, &IntSyntax::default())
    }

    #[rstest]
    #[case("[1,10]", Range::new(1, 10, true, true))]
    #[case("(1,10)", Range::new(1, 10, false, false))]
    #[case("[1,10)", Range::new(1, 10, true, false))]
    #[case("(1,10]", Range::new(1, 10, false, true))]
    #[case("1,10", Range::new(1, 10, true, true))]
    #[case(" [ -5 , 7 ] ", Range::new(-5, 7, true, true))]
    #[case("[10,1]", Range::new(10, 1, true, true))]
    fn brackets_and_bounds(#[case] text: &str, #[case] expected: Range<i64>) {
        assert_eq!(int64(text).unwrap(), expected);
    }

    #[rstest]
    #[case("[,10]", Range::new(i64::MIN, 10, true, true))]
    #[case("(5,)", Range::new(5, i64::MAX, false, false))]
    #[case("[,]", Range::new(i64::MIN, i64::MAX, true, true))]
    #[case(",", Range::new(i64::MIN, i64::MAX, true, true))]
    #[case("", Range::new(i64::MIN, i64::MAX, true, true))]
    fn omitted_bounds_take_defaults(#[case] text: &str, #[case] expected: Range<i64>) {
        assert_eq!(int64(text).unwrap(), expected);
    }

    #[rstest]
    #[case("[1,10")]
    #[case("1,10)")]
    #[case("[")]
    #[case(")")]
    fn unbalanced(#[case] text: &str) {
        assert!(matches!(
            int64(text),
            Err(ParseRangeError::UnbalancedBracket(_))
        ));
    }

    #[test]
    fn separators() {
        assert!(matches!(
            int64("[1]"),
            Err(ParseRangeError::MissingSeparator(_))
        ));
        assert!(matches!(int64("[]"), Err(ParseRangeError::MissingSeparator(_))));
        assert!(matches!(
            int64("[1,2,3]"),
            Err(ParseRangeError::ExtraSeparator(_))
        ));
    }

    #[test]
    fn invalid_bounds_name_the_side() {
        assert_eq!(
            int64("[a,1]"),
            Err(ParseRangeError::InvalidBound {
                side: Side::Left,
                text: "a".to_owned()
            })
        );
        assert_eq!(
            int64("[1,9223372036854775808]"),
            Err(ParseRangeError::InvalidBound {
                side: Side::Right,
                text: "9223372036854775808".to_owned()
            })
        );
        assert!(int64("[[1,2]]").is_err());
    }

    #[test]
    fn default_types_follow_domain() {
        let r = parse_range("[,]", 0_u32, u32::MAX, &IntSyntax::default()).unwrap();
        assert_eq!(r, Range::closed(0, u32::MAX));

        let r = parse_range(
            "(100,)",
            Timestamp(0),
            Timestamp(u32::MAX),
            &SecondsSyntax,
        )
        .unwrap();
        assert_eq!(r, Range::open(Timestamp(100), Timestamp(u32::MAX)));
    }

    #[test]
    fn radix_applies_to_both_bounds() {
        let syntax = IntSyntax::with_radix(16).unwrap();
        let r = parse_range("[ff,-10)", 0_i32, 0, &syntax).unwrap();
        assert_eq!(r, Range::new(255, -16, true, false));
    }

    #[test]
    fn display_round_trip() {
        for text in ["[1,10]", "(-4,4)", "[0,9223372036854775807)"] {
            assert_eq!(int64(text).unwrap().to_string(), text);
        }
    }
}
