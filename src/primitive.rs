//! Implementation of the `WeakF64` primitive.
//!
//! Weakly-typed inputs arrive as arbitrary floats: possibly non-finite,
//! possibly fractional. `WeakF64` centralizes the epsilon rounding,
//! truncation, and range checks the numeric paths share.

use crate::{ParseError, ParseResult};
use num_traits::{AsPrimitive, Bounded};

/// A possibly non-finite, possibly fractional `f64` as received from the
/// caller.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct WeakF64(pub(crate) f64);

impl WeakF64 {
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> f64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the value as a finite float, or a structural error.
    pub fn finite(&self) -> ParseResult<f64> {
        if !self.0.is_finite() {
            return Err(ParseError::structure().with_message("number value is not a finite value."));
        }
        Ok(self.0)
    }

    /// Coerces the value to an integral float: rounded to the nearest
    /// integer when within `f64::EPSILON` of it, truncated toward zero
    /// otherwise. Returns the label of the transform applied, if any.
    ///
    /// Applying this to its own output is a no-op.
    #[must_use]
    pub fn to_integral(&self) -> (f64, Option<&'static str>) {
        if !self.0.is_finite() || self.0.fract() == 0.0 {
            return (self.0, None);
        }
        let nearest = self.0.round();
        if (self.0 - nearest).abs() < f64::EPSILON {
            (nearest, Some("round-to-integer"))
        } else {
            (self.0.trunc(), Some("truncate-fraction"))
        }
    }

    // Truncate the current `WeakF64` to the desired numeric type.
    #[must_use]
    pub fn truncate<T: Bounded + AsPrimitive<f64>>(&self) -> T
    where
        f64: AsPrimitive<T>,
    {
        let clamped =
            num_traits::clamp(self.as_inner(), T::min_value().as_(), T::max_value().as_());
        clamped.as_()
    }

    /// Extracts an integral value within the target type's range, or a
    /// structural error naming the offending value.
    pub fn checked_int<T: Bounded + AsPrimitive<f64> + Copy + 'static>(&self) -> ParseResult<T>
    where
        f64: AsPrimitive<T>,
    {
        let value = self.finite()?;
        let (integral, _) = Self(value).to_integral();
        if integral < T::min_value().as_() || integral > T::max_value().as_() {
            return Err(ParseError::structure()
                .with_message(format!("{integral} exceeds the valid field range.")));
        }
        Ok(integral.as_())
    }
}

impl From<f64> for WeakF64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq<f64> for WeakF64 {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}
