//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value carried by a single cell of a host result row.
//! CONTEXT: Host rows arrive as JSON objects of the form
//! `{"field": {"value": ..., "rendered": ...}}`. This file contains the
//! `CellValue` enum (the typed `value`) and the `DataCell` wrapper, plus the
//! two coercions the drill-down table needs: a grouping label and a number.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents the raw data within a host cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
            Value::String(s) => CellValue::Text(s),
            // Nested structures are kept as their JSON text
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => Value::Null,
            CellValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s),
            CellValue::Boolean(b) => Value::Bool(b),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl CellValue {
    /// Returns true for a missing (null) value.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the value as a grouping label, or `None` when the value is missing.
    /// An empty string is a present value and yields `Some("")`.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => {
                if *n == 0.0 {
                    Some("0".to_string())
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    // Format without unnecessary decimal places
                    Some(format!("{:.0}", n))
                } else {
                    Some(format!("{}", n))
                }
            }
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Boolean(b) => Some(if *b { "true" } else { "false" }.to_string()),
        }
    }

    /// Coerces the value to a number for aggregation.
    /// Anything that is not a usable finite number counts as zero; this never fails.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            CellValue::Boolean(b) => {
                if *b { 1.0 } else { 0.0 }
            }
        };

        // `f64::from_str` accepts "inf"/"infinity" and overflows to infinity
        if n.is_finite() { n } else { 0.0 }
    }
}

/// One cell of a host row. Only `value` is read; keys such as `rendered`
/// or `links` are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataCell {
    #[serde(default)]
    pub value: CellValue,
}

impl DataCell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        DataCell { value: value.into() }
    }

    pub fn empty() -> Self {
        DataCell { value: CellValue::Empty }
    }
}
