//! Domain layer containing inventory types and analytics.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `inventory` - Raw rows, normalization and the loaded snapshot
//! - `analysis` - Pure analytics services (KPIs, ABC, alerts, what-if)

pub mod analysis;
pub mod foundation;
pub mod inventory;
