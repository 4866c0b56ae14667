//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so that cart totals don't drift
//! the way repeated floating-point sums do. The catalog speaks decimal
//! numbers on the wire; conversion happens once, at (de)serialization.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of minor units per major unit.
const CENTS_PER_UNIT: i64 = 100;

/// A monetary value in the store's single currency.
///
/// Amounts are stored in cents. On the wire a `Money` is a plain decimal
/// number (`109.95`), which is what the catalog endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Create a Money value from a decimal amount, rounding half away from
    /// zero to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` cent
    /// range.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(109.95).unwrap();
    /// assert_eq!(price.amount_cents, 10995);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(cents as i64))
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        format!("{}{}.{:02}", sign, abs / per_unit, abs % per_unit)
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        match amount.strip_prefix('-') {
            Some(abs) => format!("-${}", abs),
            None => format!("${}", amount),
        }
    }

    /// Add another value, returning `None` on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Add another value, clamping at the representable bounds.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Multiply by a quantity, clamping at the representable bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Sum an iterator of Money values, returning `None` on overflow.
    pub fn try_sum<'a>(iter: impl IntoIterator<Item = &'a Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts go out as integers so `10` stays `10`, not `10.0`.
        if self.amount_cents % CENTS_PER_UNIT == 0 {
            serializer.serialize_i64(self.amount_cents / CENTS_PER_UNIT)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", amount)))
    }
}
