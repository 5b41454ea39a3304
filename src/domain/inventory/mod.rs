//! Inventory module - Raw rows, normalized records and dataset snapshots.
//!
//! # Components
//!
//! - `RawRow` / `Field` - Untyped input rows and the column alias table
//! - `NormalizedRecord` - The canonical record every analysis consumes
//! - `Normalizer` - Total cleaning pass from raw rows to records
//! - `InventorySnapshot` - An immutable, shareable normalized dataset

mod normalizer;
mod numeric;
mod raw_row;
mod record;
mod snapshot;

pub use normalizer::{NormalizationReport, NormalizedDataset, Normalizer, DEFAULT_VALUE_TOLERANCE};
pub use numeric::{parse_locale_number, NumericField};
pub use raw_row::{canonical_column, Field, RawRow, ROTATION_COLUMNS};
pub use record::{
    NormalizedRecord, RotationSignal, DEFAULT_CATEGORY, DEFAULT_NAME, ROTATION_FALLBACK,
};
pub use snapshot::InventorySnapshot;
