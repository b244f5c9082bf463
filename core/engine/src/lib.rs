//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Shared value types for the drill-down table engine.
//! CONTEXT: Re-exports the cell value model and number formatting used by
//! `drill-engine` when it groups, aggregates and displays host data.

pub mod cell;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use cell::{CellValue, DataCell};
pub use number_format::format_fixed;
