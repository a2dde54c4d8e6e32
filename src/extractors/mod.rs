// src/extractors/mod.rs
pub mod section;
pub mod tree;

// Re-export key extraction types for convenience
pub use section::{SectionExtractor, SectionSet};
pub use tree::NodeTree;
