//! The parsed interval.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Bound;

/// Which endpoint of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

const fn closed() -> bool {
    true
}

/// An interval with an independent open/closed flag per endpoint.
///
/// `left <= right` is not enforced; distance rules reject inverted ranges.
///
/// Serialized as `{"left": .., "right": .., "left_closed": .., "right_closed": ..}`;
/// the closed flags default to `true` when absent.
///
/// # Examples
///
/// ```rust
/// use paramguard_filter::range::Range;
///
/// let r = Range::new(1, 10, true, false);
/// assert!(r.contains(&9));
/// assert!(!r.contains(&10));
/// assert_eq!(r.to_string(), "[1,10)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range<T> {
    pub left: T,
    pub right: T,
    #[serde(default = "closed")]
    pub left_closed: bool,
    #[serde(default = "closed")]
    pub right_closed: bool,
}

impl<T> Range<T> {
    pub const fn new(left: T, right: T, left_closed: bool, right_closed: bool) -> Self {
        Self {
            left,
            right,
            left_closed,
            right_closed,
        }
    }

    /// `[left,right]`
    pub const fn closed(left: T, right: T) -> Self {
        Self::new(left, right, true, true)
    }

    /// `(left,right)`
    pub const fn open(left: T, right: T) -> Self {
        Self::new(left, right, false, false)
    }

    /// The endpoint on `side` and whether it is closed.
    pub const fn endpoint(&self, side: Side) -> (&T, bool) {
        match side {
            Side::Left => (&self.left, self.left_closed),
            Side::Right => (&self.right, self.right_closed),
        }
    }
}

impl<T: Ord> Range<T> {
    /// Returns true if `value` lies inside the interval.
    pub fn contains(&self, value: &T) -> bool {
        let above_left = if self.left_closed {
            *value >= self.left
        } else {
            *value > self.left
        };
        let below_right = if self.right_closed {
            *value <= self.right
        } else {
            *value < self.right
        };
        above_left && below_right
    }
}

impl<T: Bound> Range<T> {
    /// Renders the range in bracket notation using the domain syntax, so the
    /// result parses back with the same syntax.
    pub fn format_with(&self, syntax: &T::Syntax) -> String {
        format!(
            "{}{},{}{}",
            open_bracket(self.left_closed),
            self.left.format_bound(syntax),
            self.right.format_bound(syntax),
            close_bracket(self.right_closed),
        )
    }
}

const fn open_bracket(closed: bool) -> char {
    if closed { '[' } else { '(' }
}

const fn close_bracket(closed: bool) -> char {
    if closed { ']' } else { ')' }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{},{}{}",
            open_bracket(self.left_closed),
            self.left,
            self.right,
            close_bracket(self.right_closed)
        )
    }
}
