//! The classified error type for input parsing.
//!
//! Every failure leaving a strategy or the orchestrator is one of the
//! [`ErrorKind`] variants below; host-platform errors are wrapped before
//! they can escape.

use core::fmt;
use std::borrow::Cow;

/// The kind of a [`ParseError`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No registered strategy accepted the input's shape.
    #[default]
    UnsupportedShape,
    /// The shape matched, but the content was invalid (malformed text,
    /// impossible calendar fields, a short array, an out-of-range instant).
    Structure,
    /// A supplied time-zone identifier could not be resolved.
    TimezoneResolution,
    /// A wrapped third-party conversion reported an error.
    Delegate,
    /// A requested strategy tag is not registered (diagnostic paths only).
    RegistryLookup,
    /// An internal invariant was violated.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnsupportedShape => "UnsupportedShape",
            Self::Structure => "StructuralParseFailure",
            Self::TimezoneResolution => "TimezoneResolutionFailure",
            Self::Delegate => "DelegateFailure",
            Self::RegistryLookup => "RegistryLookupFailure",
            Self::Assert => "Assert",
        })
    }
}

/// The error type produced by `temporal_input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

/// The crate-wide result type.
pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(""),
        }
    }

    /// Creates an unsupported-shape error.
    #[inline]
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::new(ErrorKind::UnsupportedShape)
    }

    /// Creates a structural error.
    #[inline]
    #[must_use]
    pub const fn structure() -> Self {
        Self::new(ErrorKind::Structure)
    }

    /// Creates a time-zone resolution error.
    #[inline]
    #[must_use]
    pub const fn timezone() -> Self {
        Self::new(ErrorKind::TimezoneResolution)
    }

    /// Creates a delegate error.
    #[inline]
    #[must_use]
    pub const fn delegate() -> Self {
        Self::new(ErrorKind::Delegate)
    }

    /// Creates a registry-lookup error.
    #[inline]
    #[must_use]
    pub const fn registry_lookup() -> Self {
        Self::new(ErrorKind::RegistryLookup)
    }

    /// Creates an assertion error for a violated internal invariant.
    #[inline]
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Attaches a message to the error.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Wraps a host-platform error as a structural failure.
    #[must_use]
    pub(crate) fn from_host(error: jiff::Error) -> Self {
        Self::structure().with_message(error.to_string())
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns this error's message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
