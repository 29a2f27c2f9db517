//! Annotation export format implementations.

mod coco;
mod native_json;
mod yolo;

#[cfg(test)]
mod tests;

pub use coco::{COCO_FILE_NAME, CocoFormat};
pub use native_json::NativeJsonFormat;
pub use yolo::{YoloFormat, yolo_line};
