//! FILENAME: core/drill-engine/src/source.rs
//! Source Data - Host rows and field metadata.
//!
//! Rows are read-only to the engine. Each row maps a field name to a
//! `DataCell`; the engine only ever looks at `cell.value`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use engine::DataCell;

use crate::definition::BLANK_LABEL;
use crate::error::Result;

/// One result row: field name -> cell.
pub type Row = FxHashMap<String, DataCell>;

// ============================================================================
// FIELD METADATA
// ============================================================================

/// Ordered dimension and measure field names for one update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    /// Dimension fields, outermost grouping first.
    pub dimensions: Vec<String>,

    /// Measure fields. Only the first one is aggregated.
    pub measures: Vec<String>,
}

impl FieldSet {
    pub fn new<D, M>(dimensions: D, measures: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        FieldSet {
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            measures: measures.into_iter().map(Into::into).collect(),
        }
    }

    /// The measure that gets aggregated, if any is configured.
    pub fn primary_measure(&self) -> Option<&str> {
        self.measures.first().map(String::as_str)
    }

    /// True when at least one dimension and one measure are configured.
    pub fn is_complete(&self) -> bool {
        !self.dimensions.is_empty() && !self.measures.is_empty()
    }
}

/// A field description as sent by the host. Only `name` is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,

    #[serde(default)]
    pub label: Option<String>,
}

/// The `fields` object of a host query response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFields {
    #[serde(default)]
    pub dimension_like: Vec<FieldMeta>,

    #[serde(default)]
    pub measure_like: Vec<FieldMeta>,
}

impl From<QueryFields> for FieldSet {
    fn from(fields: QueryFields) -> Self {
        FieldSet {
            dimensions: fields.dimension_like.into_iter().map(|f| f.name).collect(),
            measures: fields.measure_like.into_iter().map(|f| f.name).collect(),
        }
    }
}

// ============================================================================
// PAYLOAD PARSING
// ============================================================================

/// Parses a JSON array of host rows.
pub fn parse_rows(json: &str) -> Result<Vec<Row>> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a host `fields` object into a `FieldSet`, keeping field order.
pub fn parse_fields(json: &str) -> Result<FieldSet> {
    let fields: QueryFields = serde_json::from_str(json)?;
    Ok(fields.into())
}

// ============================================================================
// CELL LOOKUP
// ============================================================================

/// Grouping label of `field` in `row`. A missing cell or null value yields
/// the blank label.
pub fn group_label(row: &Row, field: &str) -> String {
    row.get(field)
        .and_then(|cell| cell.value.label())
        .unwrap_or_else(|| BLANK_LABEL.to_string())
}

/// Numeric value of `field` in `row`; missing or non-numeric counts as zero.
pub fn measure_value(row: &Row, field: &str) -> f64 {
    row.get(field).map(|cell| cell.value.as_number()).unwrap_or(0.0)
}
