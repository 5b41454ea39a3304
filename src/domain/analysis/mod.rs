//! Analysis Module - Pure domain services for inventory analytics.
//!
//! This module contains stateless functions that operate on a normalized
//! record set to derive decision-support figures.
//!
//! # Components
//!
//! - `KpiAggregator` - Totals, averages and per-category breakdowns
//! - `AbcClassifier` - Pareto A/B/C tiers by cumulative value
//! - `AlertEngine` - Overstock, stockout-risk and dead-capital alerts
//! - `WhatIfSimulator` - Capital released by a hypothetical stock reduction
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They borrow the
//! records of a snapshot and return freshly computed results, so concurrent
//! requests can share one snapshot without coordination.

mod abc_classifier;
mod alert_engine;
mod kpi_aggregator;
mod ordering;
mod what_if;

pub use abc_classifier::{
    AbcClass, AbcClassification, AbcClassifier, AbcEntry, AbcThresholds, ClassSummary,
};
pub use alert_engine::{
    recommendation, Alert, AlertEngine, AlertKind, AlertReport, AlertRules, AlertThresholds,
    Severity,
};
pub use kpi_aggregator::{InventoryKpis, KpiAggregator, PricedProduct, TOP_PRICED_PRODUCTS};
pub use ordering::{median, value_descending_order};
pub use what_if::{
    SimulatedItem, WhatIfRequest, WhatIfResult, WhatIfSimulator, CATEGORY_NOT_FOUND,
};
