//! Exact monetary amounts.
//!
//! Uses `rust_decimal` internally so that prices such as `11.1` stay exact
//! through multiplication and subtraction. Amounts are only rounded where a
//! rule asks for it (`round_cents`) and when displayed.
//!
//! Arithmetic is checked: every operation returns `None` instead of
//! panicking when the result leaves `Decimal`'s range.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount in the till's single display currency.
///
/// No scale is enforced between operations.
/// Display always shows exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use till_register::Money;
///
/// let price = Money::from_str("11.1").unwrap();
/// assert_eq!(price.checked_mul(3).unwrap().to_string(), "33.30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Decimal places used for currency precision.
    pub const CENTS_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Wraps a `Decimal` without changing its scale.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the underlying decimal value.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if this value is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Multiplies by a unit count, e.g. price × quantity.
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money)
    }

    /// Rounds to currency precision, ties away from zero (`41.625` becomes `41.63`).
    pub fn round_cents(self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(Self::CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money::new(value)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Money(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_cents();
        let text = format!("{:.2}", rounded.0);
        // Forward width/alignment so callers can write `{:>8}`.
        f.pad(&text)
    }
}

/// Accepts JSON numbers or numeric strings.
///
/// With `serde_json`'s `arbitrary_precision`, numbers arrive as their exact
/// source text, so `12345678901234567.89` is not squeezed through `f64`.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer).map(Money)
    }
}
