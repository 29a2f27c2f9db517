//! Per-image annotation file.
//!
//! One JSON document per image: its name, the annotation records as tagged
//! objects, an (always empty) label list and, optionally, the image size in
//! pixels for exporters that work in pixel space.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::error::FormatError;
use crate::model::AnnotationObject;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationFile {
    /// Image file name.
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationObject>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl AnnotationFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<AnnotationObject>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Pixel size, if both dimensions are known and non-zero.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }

    /// Image name without its extension, used to name per-image outputs.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
    }

    /// Parse a file. The image name must be present and non-empty.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let file: Self = serde_json::from_str(json)?;
        if file.name.trim().is_empty() {
            return Err(FormatError::invalid_format("annotation file has no image name"));
        }
        Ok(file)
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_json(&content)?;
        log::info!(
            "Loaded {} annotations for '{}' from {:?}",
            file.annotations.len(),
            file.name,
            path
        );
        Ok(file)
    }

    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved {} annotations to {:?}", self.annotations.len(), path);
        Ok(())
    }
}
