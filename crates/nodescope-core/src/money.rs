//! Exact currency amounts.
//!
//! [`Money`] stores an integer number of minor units (cents). Sums are exact,
//! so the order in which revenue records are added never changes a total.
//! Amounts serialize as decimal numbers of major units.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Minor units per major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Reasons a raw amount cannot be turned into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AmountError {
    /// No amount was supplied.
    #[error("amount is missing")]
    Missing,

    /// The text is not a decimal number.
    #[error("'{0}' is not a decimal amount")]
    NotNumeric(String),

    /// More fractional digits than minor units allow.
    #[error("'{0}' has more than two decimal places")]
    Precision(String),

    /// NaN or infinite input.
    #[error("amount is not a finite number")]
    NotFinite,

    /// The amount does not fit in the minor-unit range.
    #[error("amount is out of range")]
    OutOfRange,
}

/// A currency amount in minor units.
///
/// # Examples
///
/// ```
/// use nodescope_core::Money;
///
/// let a = Money::parse_decimal("3000").unwrap();
/// let b = Money::parse_decimal("2000.50").unwrap();
/// assert_eq!((a + b).minor_units(), 500_050);
/// assert_eq!((a + b).to_string(), "5000.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units.
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Returns the amount in minor units.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns `true` if the amount is above zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Adds two amounts, clamping at the numeric bounds.
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// The amount in major units as a float, for display and JSON.
    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Converts a float of major units, rounding to the nearest minor unit.
    pub fn from_major_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        let minor = (value * MINOR_PER_MAJOR as f64).round();
        if minor > i64::MAX as f64 || minor < i64::MIN as f64 {
            return Err(AmountError::OutOfRange);
        }
        Ok(Money(minor as i64))
    }

    /// Parses a decimal string such as `"1500"`, `"-3.5"` or `"2000.75"`.
    ///
    /// At most two fractional digits are accepted.
    pub fn parse_decimal(text: &str) -> Result<Self, AmountError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Missing);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(AmountError::NotNumeric(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(AmountError::Precision(trimmed.to_string()));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AmountError::OutOfRange)?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| AmountError::OutOfRange)? * 10,
            _ => fraction.parse().map_err(|_| AmountError::OutOfRange)?,
        };

        let minor = whole_value
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(fraction_value))
            .ok_or(AmountError::OutOfRange)?;

        Ok(Money(if negative { -minor } else { minor }))
    }

    /// This amount as a whole percentage of `goal`, floored and capped at 100.
    ///
    /// A goal of zero or less yields `0`, as does a non-positive amount.
    ///
    /// ```
    /// use nodescope_core::Money;
    ///
    /// let total = Money::from_major(5_000);
    /// assert_eq!(total.percentage_of(Money::from_major(10_000)), 50);
    /// assert_eq!(total.percentage_of(Money::from_major(4_000)), 100);
    /// assert_eq!(total.percentage_of(Money::ZERO), 0);
    /// ```
    pub fn percentage_of(self, goal: Money) -> u8 {
        if goal.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        let ratio = i128::from(self.0) * 100 / i128::from(goal.0);
        // ratio is non-negative here and capped below 256
        ratio.min(100) as u8
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{sign}{}.{:02}", abs / per, abs % per)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMoney {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawMoney::deserialize(deserializer)? {
            RawMoney::Integer(major) => major
                .checked_mul(MINOR_PER_MAJOR)
                .map(Money)
                .ok_or_else(|| de::Error::custom(AmountError::OutOfRange)),
            RawMoney::Float(value) => Money::from_major_f64(value).map_err(de::Error::custom),
            RawMoney::Text(text) => Money::parse_decimal(&text).map_err(de::Error::custom),
        }
    }
}
