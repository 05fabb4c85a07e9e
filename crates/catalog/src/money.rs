//! Money amounts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CatalogError, Result};

/// Money amount represented in cents to avoid floating point drift.
///
/// On the wire the backend speaks decimal dollars (`500` or `12.5`), so the
/// serde impls convert at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from whole dollars.
    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars.saturating_mul(100),
        }
    }

    /// Converts a decimal dollar amount, rounding to the nearest cent.
    ///
    /// Returns `None` for non-finite amounts and for amounts whose cent value
    /// does not fit in an `i64`.
    pub fn from_decimal(dollars: f64) -> Option<Self> {
        let cents = (dollars * 100.0).round();
        (cents.is_finite() && cents.abs() < i64::MAX as f64).then(|| Self {
            cents: cents as i64,
        })
    }

    /// Parses a raw form value such as `"500"` or `"12.99"`.
    pub fn parse_dollars(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>().ok().and_then(Self::from_decimal) {
            Some(money) => Ok(money),
            None => Err(CatalogError::InvalidNumber {
                field: "price",
                value: raw.to_string(),
            }),
        }
    }

    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> u64 {
        self.cents.unsigned_abs() % 100
    }

    /// Returns the amount as decimal dollars.
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().unsigned_abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents = self.cents.saturating_add(rhs.cents);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Money::from_decimal(dollars).ok_or_else(|| {
            <D::Error as serde::de::Error>::custom(format!("amount out of range: {dollars}"))
        })
    }
}
