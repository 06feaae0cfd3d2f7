//! Question catalog loading from the filesystem.

mod file_catalog;

pub use file_catalog::{load_catalog, parse_catalog, CatalogLoadError};
