use super::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::str::FromStr;

/// A JSON number kept in its exact textual form.
///
/// Backed by `serde_json::Number` with `arbitrary_precision`, so `5.23`
/// re-serializes as `5.23` and never passes through a binary float.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimal(Number);

impl Decimal {
    pub fn as_number(&self) -> &Number {
        &self.0
    }

    /// Lossy conversion for callers that want arithmetic.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_i64() || self.0.is_u64()
    }
}

impl FromStr for Decimal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s.trim())
            .map(Decimal)
            .map_err(|_| ValidationError::InvalidDecimal(s.to_string()))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(Number::from(value))
    }
}

impl From<Number> for Decimal {
    fn from(value: Number) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for serde_json::Value {
    fn from(value: Decimal) -> Self {
        serde_json::Value::Number(value.0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
