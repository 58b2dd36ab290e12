pub mod gcs;
pub mod local;
pub mod memory;

pub use gcs::GcsBlobStore;
pub use local::LocalBlobStore;
pub use memory::{InMemoryBlobStore, StoredObject};
