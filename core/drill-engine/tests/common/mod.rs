//! FILENAME: tests/common/mod.rs
//! Test surface and fixtures for drill-engine integration tests.

#![allow(dead_code)]

use drill_engine::{DrillView, EmptyState, FieldSet, Row, TableSurface};
use engine::{CellValue, DataCell};

/// What the surface was asked to show, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Empty(EmptyState),
    Draw(DrillView),
}

/// Surface that records every call so tests can count redraws.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn draw_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, SurfaceEvent::Draw(_))).count()
    }

    pub fn last_view(&self) -> Option<&DrillView> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Draw(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_empty(&self) -> Option<EmptyState> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Empty(state) => Some(*state),
            _ => None,
        })
    }
}

impl TableSurface for RecordingSurface {
    fn show_empty(&mut self, state: EmptyState) {
        self.events.push(SurfaceEvent::Empty(state));
    }

    fn draw(&mut self, view: &DrillView) {
        self.events.push(SurfaceEvent::Draw(view.clone()));
    }
}

/// Builds a row from (field, value) pairs.
pub fn row(pairs: &[(&str, CellValue)]) -> Row {
    pairs
        .iter()
        .map(|(field, value)| (field.to_string(), DataCell::new(value.clone())))
        .collect()
}

/// Standard sales dataset.
pub struct SalesFixture;

impl SalesFixture {
    pub const REGION: &'static str = "orders.region";
    pub const PRODUCT: &'static str = "orders.product";
    pub const QUARTER: &'static str = "orders.quarter";
    pub const SALES: &'static str = "orders.sales";
    pub const QUANTITY: &'static str = "orders.quantity";

    /// (region, product, quarter, sales, quantity)
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("North", "Apples", "Q1", 100.0, 10.0),
            ("North", "Oranges", "Q1", 150.0, 15.0),
            ("South", "Apples", "Q2", 200.0, 20.0),
            ("North", "Apples", "Q2", 120.0, 12.0),
            ("South", "Oranges", "Q1", 250.0, 25.0),
            ("East", "Pears", "Q3", 80.5, 8.0),
            ("South", "Apples", "Q1", 30.25, 3.0),
        ]
    }

    pub fn rows() -> Vec<Row> {
        Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| {
                row(&[
                    (Self::REGION, region.into()),
                    (Self::PRODUCT, product.into()),
                    (Self::QUARTER, quarter.into()),
                    (Self::SALES, sales.into()),
                    (Self::QUANTITY, quantity.into()),
                ])
            })
            .collect()
    }

    pub fn fields(dimensions: &[&str]) -> FieldSet {
        FieldSet::new(dimensions.iter().copied(), [Self::SALES, Self::QUANTITY])
    }

    pub fn total_sales() -> f64 {
        Self::data().iter().map(|d| d.3).sum()
    }
}
