//! FILENAME: core/drill-engine/src/render.rs
//! Table Renderer - Projects the group tree into a `DrillView`.
//!
//! Layout: progressively revealed columns. The table starts with a single
//! dimension column and gains one column for every level that an expanded,
//! visible group opens up. Each group's label sits in the column of its own
//! level; the other dimension cells of the row are spacers.
//!
//! Visibility: roots are always shown; the children of a group are shown
//! iff the group is expanded and has children.

use serde::{Deserialize, Serialize};

use engine::format_fixed;

use crate::definition::TableOptions;
use crate::expansion::{compute_id, ExpansionStore, NodeId};
use crate::hierarchy::GroupNode;
use crate::source::FieldSet;
use crate::view::{DrillView, HeaderCell, ToggleMarker, ViewCell, ViewRow};
use crate::log_trace;

/// The fields a render pass works with: every dimension and the one
/// measure that was aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFields {
    pub dimensions: Vec<String>,
    pub measure: String,
}

impl ResolvedFields {
    /// Resolves a host field set. `None` unless at least one dimension and
    /// one measure are configured; measures after the first are ignored.
    pub fn from_field_set(fields: &FieldSet) -> Option<Self> {
        if fields.dimensions.is_empty() {
            return None;
        }
        let measure = fields.primary_measure()?;
        Some(ResolvedFields {
            dimensions: fields.dimensions.clone(),
            measure: measure.to_string(),
        })
    }
}

/// Renders the visible part of `tree` under `expansion`.
pub fn render_view(
    tree: &[GroupNode],
    expansion: &ExpansionStore,
    fields: &ResolvedFields,
    options: &TableOptions,
) -> DrillView {
    // Header width follows reachable expansions only; an expanded group under
    // a collapsed ancestor adds no column until the ancestor is reopened.
    let visible_level = expansion.visible_level(fields.dimensions.len());

    let mut header: Vec<HeaderCell> = fields
        .dimensions
        .iter()
        .take(visible_level + 1)
        .enumerate()
        .map(|(level, name)| HeaderCell::dimension(level, name))
        .collect();
    header.push(HeaderCell::measure(&fields.measure));

    let mut renderer = RowRenderer {
        expansion,
        options,
        visible_level,
        placeholder: " ".repeat(options.marker_width()),
        rows: Vec::new(),
    };
    renderer.walk(tree, None);

    log_trace!(
        "RENDER",
        "visible_level={} rows={} expanded={}",
        visible_level,
        renderer.rows.len(),
        expansion.len()
    );

    DrillView {
        visible_level,
        header,
        rows: renderer.rows,
    }
}

/// Depth-first walk state for one render pass.
struct RowRenderer<'a> {
    expansion: &'a ExpansionStore,
    options: &'a TableOptions,
    visible_level: usize,
    placeholder: String,
    rows: Vec<ViewRow>,
}

impl<'a> RowRenderer<'a> {
    fn walk(&mut self, nodes: &[GroupNode], parent: Option<&NodeId>) {
        for (index, node) in nodes.iter().enumerate() {
            let id = compute_id(parent, index);
            let has_children = node.has_children();
            let is_expanded = self.expansion.is_expanded(&id);

            let row = self.build_row(node, id.clone(), has_children, is_expanded);
            self.rows.push(row);

            if has_children && is_expanded {
                self.walk(&node.children, Some(&id));
            }
        }
    }

    fn build_row(
        &self,
        node: &GroupNode,
        id: NodeId,
        has_children: bool,
        is_expanded: bool,
    ) -> ViewRow {
        let marker = ToggleMarker::for_node(has_children, is_expanded);
        let marker_text = match marker {
            ToggleMarker::Collapsed => self.options.collapsed_marker.clone(),
            ToggleMarker::Expanded => self.options.expanded_marker.clone(),
            ToggleMarker::Placeholder => self.placeholder.clone(),
        };

        let mut cells = Vec::with_capacity(self.visible_level + 2);
        for column in 0..=self.visible_level {
            if column == node.level {
                cells.push(ViewCell::Label {
                    text: node.name.clone(),
                    marker,
                    marker_text: marker_text.clone(),
                    interactive: has_children,
                });
            } else {
                cells.push(ViewCell::Spacer);
            }
        }
        cells.push(ViewCell::Value {
            value: node.value,
            formatted: format_fixed(
                node.value,
                self.options.decimal_places,
                self.options.thousands_separator,
            ),
        });

        ViewRow {
            id,
            level: node.level,
            name: node.name.clone(),
            value: node.value,
            has_children,
            is_expanded: has_children && is_expanded,
            cells,
        }
    }
}
