//! Annotation files and export formats.
//!
//! Each image's annotations persist as an [`AnnotationFile`]. Exporters
//! implement the [`AnnotationFormat`] trait and are looked up by id through
//! the [`FormatRegistry`].
//!
//! ## Supported Formats
//!
//! - **json**: Native per-image format with full fidelity
//! - **yolo**: Per-image text lines, one layout per shape kind
//! - **coco**: Single consolidated JSON in pixel space
//!
//! ## Usage
//!
//! ```rust,ignore
//! use annotate::format::FormatRegistry;
//!
//! let formats = FormatRegistry::new();
//! let yolo = formats.require("yolo")?;
//! let result = yolo.export(&images, &classes, Path::new("out"))?;
//! ```

mod error;
mod file;
pub mod formats;
mod registry;
mod traits;

pub use error::FormatError;
pub use file::AnnotationFile;
pub use registry::FormatRegistry;
pub use traits::{AnnotationFormat, ExportResult, ExportedFile, FormatWarning, WarningSeverity};
