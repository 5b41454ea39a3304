//! Inventory Insights - Inventory analytics service
//!
//! This crate turns uploaded inventory rows into decision-support analytics:
//! normalization, KPIs, ABC classification, ranked operational alerts and
//! what-if capital release simulation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
