//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `storage` - Dataset store and summary sinks (in-memory, file)
//! - `http` - Axum REST API

pub mod http;
pub mod storage;

pub use http::{api_router, InventoryAppState};
pub use storage::{FileSummarySink, InMemoryDatasetStore, InMemorySummarySink};
