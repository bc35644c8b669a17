//! Fixed-point money value.
//!
//! Amounts are held as whole cents so that the non-negative floor and the
//! undo staleness comparison are exact. On the wire they travel as plain JSON
//! numbers in currency units.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A signed amount in the smallest currency unit (cents).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Convert from currency units, rounding half away from zero to the cent.
    ///
    /// Non-finite input becomes zero; out-of-range input saturates.
    pub fn from_units(units: f64) -> Self {
        if !units.is_finite() {
            return Self::ZERO;
        }
        Self((units * 100.0).round() as i64)
    }

    pub fn to_units(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Lenient conversion of loosely typed input.
    ///
    /// Numbers and numeric strings are accepted; anything else (missing,
    /// blank, malformed) coerces to zero.
    pub fn coerce(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => n.as_f64().map(Self::from_units).unwrap_or_default(),
            Some(serde_json::Value::String(s)) => Self::parse_lenient(s),
            _ => Self::ZERO,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse::<f64>().map(Self::from_units).unwrap_or_default()
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl core::fmt::Display for Money {
    /// Two-decimal rendering, e.g. `-12.05`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money(iter.map(|m| m.0).fold(0i64, i64::saturating_add))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_units())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Money::from_units)
    }
}
