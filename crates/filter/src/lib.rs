//! # paramguard-filter
//!
//! Typed filters that turn externally supplied parameters into checked
//! values.
//!
//! The centrepiece is the [range](range) filter: it parses interval
//! notation such as `[1,10)` into a [`Range`](range::Range) with an
//! open/closed flag per endpoint, then runs boundary and width rules that
//! account for those flags without overflowing at the domain extrema.
//!
//! ## Quick Start
//!
//! ```rust
//! use paramguard_filter::prelude::*;
//!
//! let ids = uint64_range()
//!     .left_min(1)
//!     .max_distance(1000)
//!     .build()
//!     .unwrap()
//!     .required();
//!
//! let out = ids.run("ids", Some("(0,500]".into())).unwrap();
//! assert_eq!(
//!     out.and_then(Filtered::into_value),
//!     Some(Range::new(0, 500, false, true))
//! );
//!
//! let err = ids.run("ids", None).unwrap_err();
//! assert_eq!(err.to_string(), "MissingParam:ids");
//! ```
//!
//! ## Layout
//!
//! - [`foundation`]: the [`Filter`](foundation::Filter) trait and the
//!   presence adapters (`required`, `or_default`, `empty_to_nil`)
//! - [`range`]: interval parsing, rules, and one builder per domain
//! - [`config`]: serde-driven filter definitions

pub mod config;
pub mod foundation;
pub mod prelude;
pub mod range;
