//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, identifiers and error types that the
//! inventory analytics share.

mod errors;
mod ids;
mod percentage;

pub use errors::{ErrorCode, ValidationError};
pub use ids::DatasetId;
pub use percentage::ReductionPercentage;
