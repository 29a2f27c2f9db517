//! Class/style registry.
//!
//! Maps `(shape kind, class id)` to display attributes. Tools consult it for
//! existence checks when cycling classes; the renderer consults it for colors.
//! Pose classes additionally describe their keypoints and skeleton.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_COLOR;
use crate::model::{ClassAttributes, PoseClass, ShapeKind};

fn default_bucket() -> BTreeMap<u32, ClassAttributes> {
    BTreeMap::from([(0, ClassAttributes::default())])
}

fn default_pose_bucket() -> BTreeMap<u32, PoseClass> {
    BTreeMap::from([(0, PoseClass::new("default", FALLBACK_COLOR))])
}

/// Per-kind class tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRegistry {
    #[serde(default = "default_bucket")]
    pub bbox: BTreeMap<u32, ClassAttributes>,
    #[serde(default = "default_bucket")]
    pub obb: BTreeMap<u32, ClassAttributes>,
    #[serde(default = "default_bucket")]
    pub polygon: BTreeMap<u32, ClassAttributes>,
    #[serde(default = "default_bucket")]
    pub keypoint: BTreeMap<u32, ClassAttributes>,
    #[serde(default = "default_pose_bucket")]
    pub pose: BTreeMap<u32, PoseClass>,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self {
            bbox: default_bucket(),
            obb: default_bucket(),
            polygon: default_bucket(),
            keypoint: default_bucket(),
            pose: default_pose_bucket(),
        }
    }
}

impl ClassRegistry {
    /// Registry with a white `default` class 0 in every bucket.
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, kind: ShapeKind) -> Option<&BTreeMap<u32, ClassAttributes>> {
        match kind {
            ShapeKind::Bbox => Some(&self.bbox),
            ShapeKind::Obb => Some(&self.obb),
            ShapeKind::Polygon => Some(&self.polygon),
            ShapeKind::Keypoint => Some(&self.keypoint),
            ShapeKind::Pose => None,
        }
    }

    fn bucket_mut(&mut self, kind: ShapeKind) -> Option<&mut BTreeMap<u32, ClassAttributes>> {
        match kind {
            ShapeKind::Bbox => Some(&mut self.bbox),
            ShapeKind::Obb => Some(&mut self.obb),
            ShapeKind::Polygon => Some(&mut self.polygon),
            ShapeKind::Keypoint => Some(&mut self.keypoint),
            ShapeKind::Pose => None,
        }
    }

    /// Whether `class_id` is defined for `kind`.
    pub fn contains(&self, kind: ShapeKind, class_id: u32) -> bool {
        match self.bucket(kind) {
            Some(bucket) => bucket.contains_key(&class_id),
            None => self.pose.contains_key(&class_id),
        }
    }

    pub fn attributes(&self, kind: ShapeKind, class_id: u32) -> Option<ClassAttributes> {
        match self.bucket(kind) {
            Some(bucket) => bucket.get(&class_id).cloned(),
            None => self.pose.get(&class_id).map(PoseClass::attributes),
        }
    }

    /// Class color, white when the class is not registered.
    pub fn color(&self, kind: ShapeKind, class_id: u32) -> [u8; 3] {
        match self.bucket(kind) {
            Some(bucket) => bucket.get(&class_id).map(|a| a.color),
            None => self.pose.get(&class_id).map(|p| p.color),
        }
        .unwrap_or(FALLBACK_COLOR)
    }

    /// Defined class ids for `kind`, ascending.
    pub fn class_ids(&self, kind: ShapeKind) -> Vec<u32> {
        match self.bucket(kind) {
            Some(bucket) => bucket.keys().copied().collect(),
            None => self.pose.keys().copied().collect(),
        }
    }

    /// Class that follows `current` when cycling: `current + 1` if defined, else 0.
    pub fn next_class_id(&self, kind: ShapeKind, current: u32) -> u32 {
        match current.checked_add(1) {
            Some(next) if self.contains(kind, next) => next,
            _ => 0,
        }
    }

    /// Register or rename a class. Existing pose keypoints are kept.
    pub fn add_class(&mut self, kind: ShapeKind, class_id: u32, attrs: ClassAttributes) {
        log::debug!("Registry: {} class {} = '{}'", kind, class_id, attrs.name);
        match self.bucket_mut(kind) {
            Some(bucket) => {
                bucket.insert(class_id, attrs);
            }
            None => {
                let entry = self
                    .pose
                    .entry(class_id)
                    .or_insert_with(|| PoseClass::new(&attrs.name, attrs.color));
                entry.name = attrs.name;
                entry.color = attrs.color;
            }
        }
    }

    /// Remove a class. Returns whether it existed.
    pub fn remove_class(&mut self, kind: ShapeKind, class_id: u32) -> bool {
        let removed = match self.bucket_mut(kind) {
            Some(bucket) => bucket.remove(&class_id).is_some(),
            None => self.pose.remove(&class_id).is_some(),
        };
        if removed {
            log::debug!("Registry: removed {} class {}", kind, class_id);
        }
        removed
    }

    // ------------------------------------------------------------------------
    // Pose classes
    // ------------------------------------------------------------------------

    pub fn add_pose_class(&mut self, class_id: u32, class: PoseClass) {
        log::debug!("Registry: pose class {} = '{}'", class_id, class.name);
        self.pose.insert(class_id, class);
    }

    pub fn pose_class(&self, class_id: u32) -> Option<&PoseClass> {
        self.pose.get(&class_id)
    }

    /// Add or replace a keypoint of a pose class. Returns false if the class is missing.
    pub fn add_pose_keypoint(
        &mut self,
        class_id: u32,
        keypoint_id: u32,
        attrs: ClassAttributes,
    ) -> bool {
        match self.pose.get_mut(&class_id) {
            Some(class) => {
                class.keypoints.insert(keypoint_id, attrs);
                true
            }
            None => false,
        }
    }

    pub fn remove_pose_keypoint(&mut self, class_id: u32, keypoint_id: u32) -> bool {
        self.pose
            .get_mut(&class_id)
            .is_some_and(|class| class.keypoints.remove(&keypoint_id).is_some())
    }

    /// Add a skeleton edge unless it is already present.
    pub fn add_skeleton_edge(&mut self, class_id: u32, from: usize, to: usize) -> bool {
        match self.pose.get_mut(&class_id) {
            Some(class) => {
                if !class.skeleton.contains(&(from, to)) {
                    class.skeleton.push((from, to));
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_skeleton_edge(&mut self, class_id: u32, from: usize, to: usize) -> bool {
        let Some(class) = self.pose.get_mut(&class_id) else {
            return false;
        };
        let before = class.skeleton.len();
        class.skeleton.retain(|edge| *edge != (from, to));
        class.skeleton.len() != before
    }

    /// Keypoint ids of a pose class in placement order; empty when unknown.
    pub fn pose_keypoint_ids(&self, class_id: u32) -> Vec<u32> {
        self.pose
            .get(&class_id)
            .map(|class| class.keypoints.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn skeleton(&self, class_id: u32) -> &[(usize, usize)] {
        self.pose
            .get(&class_id)
            .map(|class| class.skeleton.as_slice())
            .unwrap_or_default()
    }
}
