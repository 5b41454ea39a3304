//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and infrastructure. Adapters implement these ports.
//!
//! - `DatasetStore` - Holds the currently loaded inventory snapshot
//! - `SummarySink` - Publishes and reads the latest run summary

mod dataset_store;
mod summary_sink;

pub use dataset_store::{DatasetStore, DatasetStoreError};
pub use summary_sink::{RunSummary, SummarySink, SummarySinkError};

#[cfg(test)]
pub(crate) use summary_sink::test_support;
