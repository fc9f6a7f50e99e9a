// Library exports for embedding the filter engine and for tests

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;

pub use config::FilterOptions;
pub use dom::{Document, MemoryDocument, NodeId, Visibility};
pub use engine::SearchController;
pub use error::Error;
