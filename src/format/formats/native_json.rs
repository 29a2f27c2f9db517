//! Native JSON format: each image re-emitted as its annotation file.

use crate::format::error::FormatError;
use crate::format::file::AnnotationFile;
use crate::format::traits::{AnnotationFormat, ExportResult, ExportedFile};
use crate::model::ShapeKind;
use crate::registry::ClassRegistry;

/// Native per-image JSON. Lossless for every shape kind.
pub struct NativeJsonFormat;

impl AnnotationFormat for NativeJsonFormat {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "Annotation JSON"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn supports(&self, _kind: ShapeKind) -> bool {
        true
    }

    fn export_to_files(
        &self,
        images: &[AnnotationFile],
        _registry: &ClassRegistry,
    ) -> Result<ExportResult, FormatError> {
        let mut result = ExportResult::new();
        for image in images {
            let name = format!("{}.json", image.stem());
            result.files.push(ExportedFile::new(name, image.to_json()?));
            result.annotations_exported += image.annotations.len();
            result.images_exported += 1;
        }
        Ok(result)
    }
}
