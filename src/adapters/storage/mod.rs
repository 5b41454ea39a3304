//! Storage Adapters
//!
//! Implementations of the DatasetStore and SummarySink ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryDatasetStore** - Holds the current snapshot behind an `Arc`
//! - **InMemorySummarySink** - Keeps the latest summary in memory (testing/development)
//! - **FileSummarySink** - Writes `latest_summary.json` and `latest_run.txt` to a reports directory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSummarySink, InMemoryDatasetStore};
//!
//! let store = InMemoryDatasetStore::new();
//! let sink = FileSummarySink::new("./reports");
//! ```

mod file_summary_sink;
mod in_memory_dataset_store;
mod in_memory_summary_sink;

pub use file_summary_sink::{FileSummarySink, RUN_FILE, SUMMARY_FILE};
pub use in_memory_dataset_store::InMemoryDatasetStore;
pub use in_memory_summary_sink::InMemorySummarySink;
