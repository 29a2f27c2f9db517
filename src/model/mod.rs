//! Data models for annotations and their classes.

mod annotation;
mod category;

pub use annotation::{AnnotationId, AnnotationObject, ShapeKind};
pub use category::{ClassAttributes, PoseClass};
