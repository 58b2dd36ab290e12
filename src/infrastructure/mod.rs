pub mod blob_store;
pub mod core;
pub mod factory;
pub mod observability;
pub mod tabular;

pub use blob_store::{GcsBlobStore, InMemoryBlobStore, LocalBlobStore};
pub use tabular::CsvDecoder;
