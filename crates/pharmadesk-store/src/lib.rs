//! Document store access for the PharmaDesk catalog.
//!
//! This crate provides:
//! - `ProductRepository` - the list/search capability the dashboard consumes
//! - `ProductDocument` - schema-checked decoding of raw store documents
//! - `MemoryProductRepository` / `DocumentFileRepository` - concrete backends
//! - `extract_file_id` - storage URL helpers for asset cleanup

mod document;
mod error;
mod file;
mod memory;
mod repository;
mod storage;

pub use document::*;
pub use error::*;
pub use file::*;
pub use memory::*;
pub use repository::*;
pub use storage::*;
