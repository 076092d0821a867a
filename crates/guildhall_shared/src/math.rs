//! # Fixed-Point Arithmetic
//!
//! **CRITICAL: NO FLOATING POINT IN ECONOMY CALCULATIONS**
//!
//! Boss hit points, damage, XP ratios and multipliers are all fractional
//! quantities with three decimal places of meaningful precision (the balance
//! sheet moves in steps of 0.5, 0.1 and 0.05). [`Fixed`] stores such values
//! as milli-units in an `i64`.
//!
//! ## Why Fixed-Point?
//!
//! - Deterministic: Same calculation = same result on all hardware
//! - No rounding drift: 0.1 + 0.2 == 0.3 (unlike IEEE 754 floats)
//! - Atomics-friendly: an `i64` payload fits `AtomicI64` for the boss HP pool
//!
//! ## Signedness
//!
//! Damage multipliers can go negative (an attacker far below the defender),
//! so the representation is signed. Flooring follows mathematical floor
//! (toward negative infinity), not truncation.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Milli-units per whole unit.
const SCALE: i64 = 1_000;

/// Signed fixed-point number with three decimal places.
///
/// Internally stores `value * 1000` as an `i64`.
///
/// # Range
///
/// ±9.2 * 10^15 whole units - far beyond any balance value in play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed(i64);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One whole unit.
    pub const ONE: Self = Self(SCALE);

    /// Creates from a whole number.
    #[inline]
    #[must_use]
    pub const fn from_whole(whole: i64) -> Self {
        Self(whole * SCALE)
    }

    /// Creates from raw milli-units (no conversion).
    #[inline]
    #[must_use]
    pub const fn from_milli(milli: i64) -> Self {
        Self(milli)
    }

    /// Returns the raw milli-unit value.
    #[inline]
    #[must_use]
    pub const fn to_milli(self) -> i64 {
        self.0
    }

    /// Rounds a float to the nearest milli-unit.
    ///
    /// **Boundary use only** - config files and client payloads arrive as
    /// decimal literals; once inside the economy everything stays `Fixed`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64_lossy(value: f64) -> Self {
        Self((value * 1_000.0).round() as i64)
    }

    /// Converts to a float for display and serialization.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Returns the whole-unit part, floored toward negative infinity.
    #[inline]
    #[must_use]
    pub const fn floor_whole(self) -> i64 {
        self.0.div_euclid(SCALE)
    }

    /// True if exactly zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True if strictly negative.
    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Fixed * fixed, floored toward negative infinity.
    ///
    /// Widens to `i128` internally; the product of any two in-range balance
    /// values fits comfortably.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn mul(self, rhs: Self) -> Self {
        let wide = (self.0 as i128) * (rhs.0 as i128);
        Self(wide.div_euclid(SCALE as i128) as i64)
    }

    /// Fixed * integer.
    #[inline]
    #[must_use]
    pub const fn mul_int(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:03}", abs / 1_000, abs % 1_000)
    }
}

impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Fixed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Self::from_f64_lossy(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_roundtrip() {
        assert_eq!(Fixed::from_whole(5).floor_whole(), 5);
        assert_eq!(Fixed::from_whole(-2).floor_whole(), -2);
    }

    #[test]
    fn test_mul_is_exact_for_balance_steps() {
        // 1.0 * 0.1 = 0.1
        let damage = Fixed::ONE;
        let ratio = Fixed::from_milli(100);
        assert_eq!(damage.mul(ratio), Fixed::from_milli(100));

        // 1.4 * 30 = 42
        let multiplier = Fixed::from_milli(1_400);
        assert_eq!(multiplier.mul(Fixed::from_whole(30)), Fixed::from_whole(42));
    }

    #[test]
    fn test_mul_floors_toward_negative_infinity() {
        // -0.5 * 3 = -1.5, floor = -2 whole
        let half = Fixed::from_milli(-500);
        assert_eq!(half.mul_int(3).floor_whole(), -2);
        // Truncation would give -1; Math.floor semantics demand -2.
        assert_eq!(Fixed::from_milli(-1_500).floor_whole(), -2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed::from_milli(1_500).to_string(), "1.500");
        assert_eq!(Fixed::from_milli(-250).to_string(), "-0.250");
        assert_eq!(Fixed::ZERO.to_string(), "0.000");
    }

    #[test]
    fn test_from_f64_lossy_rounds_to_milli() {
        assert_eq!(Fixed::from_f64_lossy(0.1), Fixed::from_milli(100));
        assert_eq!(Fixed::from_f64_lossy(0.05), Fixed::from_milli(50));
        assert_eq!(Fixed::from_f64_lossy(1_000_000.0), Fixed::from_whole(1_000_000));
    }

    #[test]
    fn test_ordering_gives_min_max_clamping() {
        let lo = Fixed::ZERO;
        let hi = Fixed::from_whole(10);
        assert_eq!(Fixed::from_whole(50).min(hi), hi);
        assert_eq!(Fixed::from_whole(-3).max(lo), lo);
    }
}
