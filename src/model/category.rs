//! Class attribute models for annotation classes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_COLOR;

/// Display attributes of one class id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAttributes {
    /// Display name of the class
    pub name: String,
    /// RGB color for the class
    pub color: [u8; 3],
}

impl ClassAttributes {
    /// Create class attributes with the given name and color.
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

impl Default for ClassAttributes {
    fn default() -> Self {
        Self::new("default", FALLBACK_COLOR)
    }
}

/// A pose class: its own attributes plus the keypoints it is made of.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoseClass {
    pub name: String,
    pub color: [u8; 3],
    /// Keypoint id -> attributes. Keypoints are placed in ascending id order.
    #[serde(default)]
    pub keypoints: BTreeMap<u32, ClassAttributes>,
    /// Edges between keypoint positions, drawn as the skeleton.
    #[serde(default)]
    pub skeleton: Vec<(usize, usize)>,
}

impl PoseClass {
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
            keypoints: BTreeMap::new(),
            skeleton: Vec::new(),
        }
    }

    /// Builder-style keypoint registration.
    #[must_use]
    pub fn with_keypoint(mut self, id: u32, attrs: ClassAttributes) -> Self {
        self.keypoints.insert(id, attrs);
        self
    }

    /// Builder-style skeleton edge.
    #[must_use]
    pub fn with_edge(mut self, from: usize, to: usize) -> Self {
        self.skeleton.push((from, to));
        self
    }

    pub fn attributes(&self) -> ClassAttributes {
        ClassAttributes::new(&self.name, self.color)
    }
}
