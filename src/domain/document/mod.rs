//! Document domain - placeholder substitution, template formats and the
//! file locations a fill touches.

pub mod format;
pub mod paths;
pub mod placeholders;

pub use format::TemplateFormat;
pub use paths::{backup_path_for, DocumentPaths};
pub use placeholders::substitute;
