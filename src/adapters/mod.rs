// Adapters layer: concrete VenueProvider implementations.

pub mod file;
pub mod memory;

pub use file::FileProvider;
pub use memory::{sample_dataset, InMemoryProvider};
