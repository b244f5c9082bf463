//! FILENAME: core/drill-engine/src/definition.rs
//! Drill Table Definition - Display options and fixed user-visible text.
//!
//! Field metadata (which dimensions and measure to use) is supplied by the
//! host on every update; this module only holds what the host may tune about
//! how values and toggles are shown.

use serde::{Deserialize, Serialize};

/// Label used for a group whose dimension value is missing.
pub const BLANK_LABEL: &str = "(blank)";

// ============================================================================
// EMPTY STATES
// ============================================================================

/// Why the table could not be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyState {
    /// The result set has no rows.
    NoData,
    /// Rows are present but no dimension or no measure is configured.
    MissingFields,
}

impl EmptyState {
    /// Stable text shown to the user in place of the table.
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoData => "No data found",
            EmptyState::MissingFields => "Add at least one dimension and one measure.",
        }
    }
}

impl std::fmt::Display for EmptyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// TABLE OPTIONS
// ============================================================================

/// Controls how values and toggle markers are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Decimal places for the value column.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,

    /// Group the integer part of values with commas.
    #[serde(default)]
    pub thousands_separator: bool,

    /// Glyph shown in front of an expanded group's label.
    #[serde(default = "default_expanded_marker")]
    pub expanded_marker: String,

    /// Glyph shown in front of a collapsed group's label.
    #[serde(default = "default_collapsed_marker")]
    pub collapsed_marker: String,
}

fn default_decimal_places() -> usize {
    2
}

fn default_expanded_marker() -> String {
    "▼".to_string()
}

fn default_collapsed_marker() -> String {
    "▶".to_string()
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            decimal_places: default_decimal_places(),
            thousands_separator: false,
            expanded_marker: default_expanded_marker(),
            collapsed_marker: default_collapsed_marker(),
        }
    }
}

impl TableOptions {
    /// Width, in characters, of the widest marker. Leaf placeholders use it
    /// so labels stay aligned.
    pub fn marker_width(&self) -> usize {
        self.expanded_marker
            .chars()
            .count()
            .max(self.collapsed_marker.chars().count())
    }
}
