//! FILENAME: core/drill-engine/src/table.rs
//! Drill Table - The update/toggle reducer that drives a host surface.
//!
//! The host calls `update` whenever new data arrives and `dispatch` for
//! every label click. The tree is built once per update; a toggle only
//! flips the expansion set and re-runs the render pass.

use serde::{Deserialize, Serialize};

use crate::definition::{EmptyState, TableOptions};
use crate::expansion::{ExpansionStore, NodeId};
use crate::hierarchy::{build_hierarchy, find_node, GroupNode};
use crate::render::{render_view, ResolvedFields};
use crate::source::{FieldSet, Row};
use crate::view::DrillView;
use crate::{log_debug, log_enter, log_exit, log_info, log_warn};

// ============================================================================
// HOST SEAMS
// ============================================================================

/// Where the table gets drawn. Implemented by the host.
pub trait TableSurface {
    /// Clears any header/body and shows the empty-state message instead.
    fn show_empty(&mut self, state: EmptyState);

    /// Replaces the header/body with `view`.
    fn draw(&mut self, view: &DrillView);
}

/// Interaction messages sent by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillMessage {
    /// The label of the row with this id was clicked.
    ToggleRequested(NodeId),
}

/// Result of one update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    /// The table was drawn with this many visible rows.
    Rendered { visible_rows: usize },
    /// An empty-state message was shown instead of the table.
    Empty(EmptyState),
}

/// Tree and fields of the current dataset.
#[derive(Debug, Clone)]
struct LoadedData {
    tree: Vec<GroupNode>,
    fields: ResolvedFields,
}

// ============================================================================
// DRILL TABLE
// ============================================================================

/// The drill-down table state machine.
pub struct DrillTable<S: TableSurface> {
    surface: S,
    options: TableOptions,
    data: Option<LoadedData>,
    expansion: ExpansionStore,
    current_view: Option<DrillView>,
    render_count: u64,
}

impl<S: TableSurface> DrillTable<S> {
    pub fn new(surface: S, options: TableOptions) -> Self {
        DrillTable {
            surface,
            options,
            data: None,
            expansion: ExpansionStore::new(),
            current_view: None,
            render_count: 0,
        }
    }

    /// Loads a new dataset and draws it.
    ///
    /// `done` is invoked exactly once before this returns, on the empty-data
    /// and missing-field paths as well as after a normal render.
    pub fn update<F: FnOnce()>(&mut self, rows: &[Row], fields: &FieldSet, done: F) -> UpdateOutcome {
        log_enter!(
            "DRILL",
            "update",
            "rows={} dimensions={} measures={}",
            rows.len(),
            fields.dimensions.len(),
            fields.measures.len()
        );

        let outcome = self.load(rows, fields);
        done();

        log_exit!("DRILL", "update", "{:?}", outcome);
        outcome
    }

    fn load(&mut self, rows: &[Row], fields: &FieldSet) -> UpdateOutcome {
        self.expansion.clear();

        if rows.is_empty() {
            return self.show_empty(EmptyState::NoData);
        }

        let Some(resolved) = ResolvedFields::from_field_set(fields) else {
            return self.show_empty(EmptyState::MissingFields);
        };

        if fields.measures.len() > 1 {
            log_debug!(
                "DRILL",
                "using measure {}; ignoring {} more",
                resolved.measure,
                fields.measures.len() - 1
            );
        }

        let tree = build_hierarchy(rows, &resolved.dimensions, &resolved.measure);
        self.data = Some(LoadedData { tree, fields: resolved });

        let visible_rows = self.redraw();
        UpdateOutcome::Rendered { visible_rows }
    }

    fn show_empty(&mut self, state: EmptyState) -> UpdateOutcome {
        log_info!("DRILL", "empty state: {}", state);
        self.data = None;
        self.current_view = None;
        self.surface.show_empty(state);
        UpdateOutcome::Empty(state)
    }

    /// Applies an interaction message. Returns `true` if the table was redrawn.
    ///
    /// Only groups with children react to a toggle; a leaf, an id outside
    /// the current tree, or a table without data is left untouched.
    pub fn dispatch(&mut self, message: DrillMessage) -> bool {
        match message {
            DrillMessage::ToggleRequested(id) => self.toggle(&id),
        }
    }

    /// Toggles the group at `id` and redraws once.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let Some(data) = &self.data else {
            log_debug!("DRILL", "toggle {} ignored: no data", id);
            return false;
        };

        match find_node(&data.tree, id) {
            Some(node) if node.has_children() => {}
            Some(_) => {
                log_debug!("DRILL", "toggle {} ignored: leaf", id);
                return false;
            }
            None => {
                log_warn!("DRILL", "toggle {} ignored: not in the current tree", id);
                return false;
            }
        }

        let expanded = self.expansion.toggle(id);
        log_debug!("DRILL", "toggle {} -> {}", id, if expanded { "expanded" } else { "collapsed" });

        self.redraw();
        true
    }

    /// Renders the current tree and hands the view to the surface.
    fn redraw(&mut self) -> usize {
        let Some(data) = &self.data else {
            return 0;
        };

        let view = render_view(&data.tree, &self.expansion, &data.fields, &self.options);
        let visible_rows = view.row_count();

        self.surface.draw(&view);
        self.current_view = Some(view);
        self.render_count += 1;

        visible_rows
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Group tree of the current dataset (empty when nothing is loaded).
    pub fn tree(&self) -> &[GroupNode] {
        self.data.as_ref().map(|d| d.tree.as_slice()).unwrap_or(&[])
    }

    pub fn expansion(&self) -> &ExpansionStore {
        &self.expansion
    }

    /// The last view handed to the surface, if the table is drawn.
    pub fn current_view(&self) -> Option<&DrillView> {
        self.current_view.as_ref()
    }

    /// Number of render passes since construction.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
