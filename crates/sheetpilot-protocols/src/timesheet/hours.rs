//! Raw hour values as they arrive from extraction.

use serde::{Deserialize, Serialize};

/// An hour amount in whatever shape upstream produced it.
///
/// JSON integers land in `Integer`, other numbers in `Float`, strings
/// (`"8"`, `"7:30"`) in `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Default for HoursValue {
    fn default() -> Self {
        HoursValue::Integer(0)
    }
}

impl From<i64> for HoursValue {
    fn from(value: i64) -> Self {
        HoursValue::Integer(value)
    }
}

impl From<f64> for HoursValue {
    fn from(value: f64) -> Self {
        HoursValue::Float(value)
    }
}

impl From<&str> for HoursValue {
    fn from(value: &str) -> Self {
        HoursValue::Text(value.to_string())
    }
}

impl From<String> for HoursValue {
    fn from(value: String) -> Self {
        HoursValue::Text(value)
    }
}
