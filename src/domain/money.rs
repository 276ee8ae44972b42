//! Money value object.
//! Non-negative decimal with a fixed 2-digit scale, rounded half-up.

use std::fmt;

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const SCALE: i64 = 2;

/// Immutable monetary amount. Every operation returns a new value; the inner
/// decimal is always non-negative and rescaled to 2 digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(BigDecimal);

impl Money {
    /// Parse an amount from its decimal string form.
    /// Fails with `InvalidAmount` if the string is unparsable or negative.
    pub fn of(value: &str) -> Result<Self, CoreError> {
        let parsed: BigDecimal = value
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidAmount(value.to_string()))?;
        Self::from_decimal(parsed)
    }

    /// Wrap an already-parsed decimal, rescaling half-up to 2 digits.
    /// Fails with `InvalidAmount` if the value is negative.
    pub fn from_decimal(value: BigDecimal) -> Result<Self, CoreError> {
        if value < BigDecimal::from(0) {
            return Err(CoreError::InvalidAmount(value.to_string()));
        }
        Ok(Money(value.with_scale_round(SCALE, RoundingMode::HalfUp)))
    }

    pub fn zero() -> Self {
        Money(BigDecimal::from(0).with_scale(SCALE))
    }

    pub fn add(&self, other: &Money) -> Money {
        Money((&self.0 + &other.0).with_scale(SCALE))
    }

    /// Fails with `NegativeResult` rather than going below zero.
    pub fn subtract(&self, other: &Money) -> Result<Money, CoreError> {
        let result = &self.0 - &other.0;
        if result < BigDecimal::from(0) {
            return Err(CoreError::NegativeResult);
        }
        Ok(Money(result.with_scale(SCALE)))
    }

    /// Half of this amount, rounded half-up to 2 digits.
    pub fn half(&self) -> Money {
        let halved = &self.0 / BigDecimal::from(2);
        Money(halved.with_scale_round(SCALE, RoundingMode::HalfUp))
    }

    pub fn greater_than(&self, other: &Money) -> bool {
        self.0 > other.0
    }

    pub fn less_than(&self, other: &Money) -> bool {
        self.0 < other.0
    }

    pub fn equal_to(&self, other: &Money) -> bool {
        self.0 == other.0
    }

    pub fn greater_or_equal(&self, other: &Money) -> bool {
        self.0 >= other.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigDecimal::from(0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > BigDecimal::from(0)
    }

    /// Currency-prefixed display string, e.g. `"R$ 1250.50"`.
    /// Display and logging only, never an input to computation.
    pub fn format(&self) -> String {
        format!("R$ {:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}
