//! Trait definitions for annotation export formats.

use std::path::{Path, PathBuf};

use crate::format::error::FormatError;
use crate::format::file::AnnotationFile;
use crate::model::ShapeKind;
use crate::registry::ClassRegistry;

/// Trait for annotation export implementations.
///
/// Formats render every output file in memory first through
/// [`export_to_files`](Self::export_to_files); [`export`](Self::export)
/// then writes them below a directory.
pub trait AnnotationFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "json", "yolo", "coco").
    fn id(&self) -> &'static str;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format writes.
    fn extensions(&self) -> &[&'static str];

    /// Whether shapes of `kind` are written (others are skipped with a warning).
    fn supports(&self, kind: ShapeKind) -> bool;

    /// Render the output files for `images` without touching the file system.
    fn export_to_files(
        &self,
        images: &[AnnotationFile],
        registry: &ClassRegistry,
    ) -> Result<ExportResult, FormatError>;

    /// Render and write the output files into `dir`, creating it if needed.
    fn export(
        &self,
        images: &[AnnotationFile],
        registry: &ClassRegistry,
        dir: &Path,
    ) -> Result<ExportResult, FormatError> {
        log::info!("Exporting {} annotations to {:?}", self.display_name(), dir);

        let mut result = self.export_to_files(images, registry)?;
        std::fs::create_dir_all(dir)?;
        for file in &result.files {
            let path = dir.join(&file.name);
            std::fs::write(&path, &file.contents)?;
            result.files_created.push(path);
        }

        log::info!(
            "Exported {} images with {} annotations ({} warnings)",
            result.images_exported,
            result.annotations_exported,
            result.warnings.len()
        );
        for warning in &result.warnings {
            log::warn!("{}", warning.message);
        }
        Ok(result)
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// File name relative to the output directory.
    pub name: String,
    pub contents: String,
}

impl ExportedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of images exported.
    pub images_exported: usize,

    /// Number of annotations exported.
    pub annotations_exported: usize,

    /// Warnings generated during export (e.g., skipped shapes).
    pub warnings: Vec<FormatWarning>,

    /// Rendered output files.
    pub files: Vec<ExportedFile>,

    /// Files written by [`AnnotationFormat::export`].
    pub files_created: Vec<PathBuf>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Rendered file with the given name.
    pub fn file(&self, name: &str) -> Option<&ExportedFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// Warning generated during export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatWarning {
    /// Image this warning relates to (if applicable).
    pub image: Option<String>,

    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            image: None,
            message: message.into(),
            severity,
        }
    }

    /// Create a warning-level warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }

    /// Create an error-level warning.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Error)
    }

    /// Set the image this warning relates to.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Something was skipped or modified.
    Warning,
    /// Data that could not be exported at all.
    Error,
}
