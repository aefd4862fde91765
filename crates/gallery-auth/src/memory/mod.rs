//! In-memory implementations for testing

mod store;

pub use store::InMemoryImageStore;
