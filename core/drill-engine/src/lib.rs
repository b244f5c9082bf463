//! FILENAME: core/drill-engine/src/lib.rs
//! Drill-down table subsystem.
//!
//! This crate groups a flat host result set into a collapsible hierarchy
//! and projects the currently expanded part of it into a renderable table.
//! It depends on `engine` only for shared types (CellValue, DataCell).
//!
//! Layers:
//! - `definition`: Display options and empty-state messages (what the table IS)
//! - `source`: Host rows and field metadata (WHAT we receive)
//! - `hierarchy`: Grouping and bottom-up aggregation (HOW we build the tree)
//! - `expansion`: Positional node ids and the expanded set (WHICH nodes are open)
//! - `view`: Renderable output for the host (WHAT we display)
//! - `render`: Visibility walk producing the view (HOW we project)
//! - `table`: Update/toggle reducer driving the host surface

pub mod logging;
pub mod error;
pub mod definition;
pub mod source;
pub mod hierarchy;
pub mod expansion;
pub mod view;
pub mod render;
pub mod table;

pub use error::{DrillError, Result};
pub use definition::*;
pub use source::{
    group_label, measure_value, parse_fields, parse_rows, FieldMeta, FieldSet, QueryFields, Row,
};
pub use hierarchy::{build_hierarchy, find_node, tree_total, GroupNode};
pub use expansion::{compute_id, ExpansionStore, NodeId};
pub use view::*;
pub use render::{render_view, ResolvedFields};
pub use table::{DrillMessage, DrillTable, TableSurface, UpdateOutcome};
