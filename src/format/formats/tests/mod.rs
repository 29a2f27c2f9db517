//! Unit tests for export format implementations.

mod coco_tests;
mod yolo_tests;
