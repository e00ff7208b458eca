//! The `temporal_input` crate classifies and converts heterogeneous,
//! weakly-typed date/time inputs into one canonical zoned date-time
//! value ([`jiff::Zoned`]), or fails with a classified error. Accepted
//! shapes include ISO-like strings, bare epoch numbers (seconds or
//! milliseconds), native date-like values, array tuples, field records,
//! third-party timestamp-like objects, and already-parsed values of its
//! own kind.
//!
//! ```rust
//! use temporal_input::{parse, ParseOptions};
//!
//! let options = ParseOptions::default().with_time_zone("UTC");
//!
//! // An ISO instant and its epoch-second equivalent converge.
//! let a = parse("2023-11-14T22:13:20Z", &options).unwrap();
//! let b = parse(1_700_000_000i64, &options).unwrap();
//! assert_eq!(a.value.timestamp(), b.value.timestamp());
//!
//! // Genuinely unsupported shapes fail with a classified error.
//! let failure = parse(true, &options).unwrap_err();
//! assert_eq!(failure.error.kind(), temporal_input::ErrorKind::UnsupportedShape);
//! ```
//!
//! Conversion is driven by an ordered, pluggable strategy set: the
//! first strategy whose shape test accepts the input performs the whole
//! conversion, and its result is final. Priority order is a correctness
//! contract; see [`strategy`] and [`parser::InputParser`].
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

pub mod classifier;
pub mod context;
pub mod error;
pub mod host;
pub mod input;
pub mod options;
pub mod parser;
pub mod primitive;
pub mod registry;
pub mod strategy;

#[doc(inline)]
pub use error::{ErrorKind, ParseError, ParseResult};

pub use classifier::{Candidate, Classification, TypeClassifier};
pub use context::{ParseContext, ParseFailure, ParseOutcome, ParseSuccess};
pub use input::{DateTimeFields, EpochDate, EpochSplit, TemporalInput, TimestampLike};
pub use options::{CalendarId, Overflow, ParseOptions};
pub use parser::{default_parser, parse, validate_time_zone, InputParser};
pub use registry::{RegistryStats, StrategyRegistry};
pub use strategy::{ParseStrategy, StrategyDescriptor};

/// Re-export of the host platform the canonical value comes from.
pub use jiff;

/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: u32 = 24 * 60 * 60 * 1000;
