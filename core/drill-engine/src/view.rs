//! FILENAME: core/drill-engine/src/view.rs
//! Drill View - Renderable output for the host.
//!
//! The view is the projection of the group tree under the current expansion
//! state. It includes metadata for:
//! - Header cells for the visible dimension columns and the measure
//! - Visible rows with their positional ids (targets of toggle messages)
//! - Label cells with toggle markers, spacer cells and the formatted value

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expansion::NodeId;

// ============================================================================
// HEADER
// ============================================================================

/// What a header cell describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderKind {
    /// A dimension column at the given level.
    Dimension(usize),
    /// The value column.
    Measure,
}

/// A single header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub kind: HeaderKind,

    /// Raw field name as configured by the host.
    pub field_name: String,

    /// Display text (field separators replaced by spaces).
    pub label: String,
}

impl HeaderCell {
    pub fn dimension(level: usize, field_name: &str) -> Self {
        HeaderCell {
            kind: HeaderKind::Dimension(level),
            field_name: field_name.to_string(),
            label: header_label(field_name),
        }
    }

    pub fn measure(field_name: &str) -> Self {
        HeaderCell {
            kind: HeaderKind::Measure,
            field_name: field_name.to_string(),
            label: header_label(field_name),
        }
    }
}

/// Display text for a field name: `orders.created_date` -> `orders created_date`.
pub fn header_label(field_name: &str) -> String {
    field_name.replace('.', " ")
}

// ============================================================================
// CELLS
// ============================================================================

/// Toggle affordance in front of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleMarker {
    /// Group with children, currently collapsed.
    Collapsed,
    /// Group with children, currently expanded.
    Expanded,
    /// Leaf group: blank of the same width as the other markers.
    Placeholder,
}

impl ToggleMarker {
    pub fn for_node(has_children: bool, is_expanded: bool) -> Self {
        match (has_children, is_expanded) {
            (false, _) => ToggleMarker::Placeholder,
            (true, true) => ToggleMarker::Expanded,
            (true, false) => ToggleMarker::Collapsed,
        }
    }
}

/// A single cell of a visible row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewCell {
    /// The group label, in the column matching the group's level.
    Label {
        text: String,
        marker: ToggleMarker,
        /// Pre-rendered marker glyph (spaces for a placeholder).
        marker_text: String,
        /// Whether clicking the label toggles the group.
        interactive: bool,
    },
    /// Empty cell in a dimension column other than the group's own.
    Spacer,
    /// The aggregated value.
    Value { value: f64, formatted: String },
}

impl ViewCell {
    /// Plain display text of the cell.
    pub fn display_text(&self) -> String {
        match self {
            ViewCell::Label { text, marker_text, .. } => format!("{} {}", marker_text, text),
            ViewCell::Spacer => String::new(),
            ViewCell::Value { formatted, .. } => formatted.clone(),
        }
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// One visible row of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    /// Positional id, the target of a toggle message for this row.
    pub id: NodeId,

    /// Depth of the group (0 = outermost).
    pub level: usize,

    pub name: String,

    pub value: f64,

    pub has_children: bool,

    pub is_expanded: bool,

    /// One cell per visible dimension column, then the value cell.
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    /// The value cell's formatted text.
    pub fn formatted_value(&self) -> Option<&str> {
        self.cells.iter().rev().find_map(|cell| match cell {
            ViewCell::Value { formatted, .. } => Some(formatted.as_str()),
            _ => None,
        })
    }

    /// Whether a click on this row's label would toggle it.
    pub fn is_interactive(&self) -> bool {
        self.has_children
    }
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete rendered table. This is what gets handed to the host surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillView {
    /// Index of the deepest visible dimension column.
    pub visible_level: usize,

    /// Header cells: visible dimensions, then the measure.
    pub header: Vec<HeaderCell>,

    /// Visible rows in depth-first order.
    pub rows: Vec<ViewRow>,
}

impl DrillView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Finds the visible row for `id`.
    pub fn row(&self, id: &NodeId) -> Option<&ViewRow> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// Names of the visible rows, in display order.
    pub fn row_names(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.name.as_str()).collect()
    }
}

impl fmt::Display for DrillView {
    /// Plain-text table: the header line, then one line per visible row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<&str> = self.header.iter().map(|h| h.label.as_str()).collect();
        writeln!(f, "{}", header.join(" | "))?;

        for row in &self.rows {
            let cells: Vec<String> = row.cells.iter().map(ViewCell::display_text).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}
