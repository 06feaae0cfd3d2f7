//! File locations involved in one fill.

use std::path::{Path, PathBuf};

use super::format::TemplateFormat;

/// Template, its backup, and the single-slot output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub template: PathBuf,
    pub backup: PathBuf,
    pub output: PathBuf,
}

impl DocumentPaths {
    /// The backup sits next to the template as `<stem>_backup.<ext>`.
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let template = template.into();
        Self {
            backup: backup_path_for(&template),
            template,
            output: output.into(),
        }
    }

    /// Format of the template, which is also the format of the output.
    pub fn format(&self) -> TemplateFormat {
        TemplateFormat::from_path(&self.template)
    }
}

/// `form.docx` -> `form_backup.docx`; `form` -> `form_backup`.
pub fn backup_path_for(template: &Path) -> PathBuf {
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match template.extension() {
        Some(ext) => format!("{}_backup.{}", stem, ext.to_string_lossy()),
        None => format!("{}_backup", stem),
    };
    template.with_file_name(name)
}
