//! Annotation store: id → shape map plus its undo history.
//!
//! Shapes are held behind `Arc` and never mutated in place. Every edit builds
//! a new shape value and swaps it into the map, so checkpoints taken earlier
//! keep seeing the old value.

use std::sync::Arc;

use crate::geometry::Point;
use crate::model::{AnnotationId, AnnotationObject};
use crate::shapes::{Keypoint, OrientedRectangle, Polygon, Pose, Rectangle};
use crate::undo::{AnnotationMap, History, Snapshot};

/// The authoritative annotation collection for one image.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: AnnotationMap,
    /// Next id to hand out. Only ever increases within a session.
    last_index: AnnotationId,
    history: History,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `objects` (ids 0..n) and reset history to them.
    pub fn load_annotations(&mut self, objects: Vec<AnnotationObject>) {
        self.annotations = objects
            .into_iter()
            .zip(0..)
            .map(|(object, id)| (id, Arc::new(object)))
            .collect();
        self.last_index = AnnotationId::try_from(self.annotations.len()).unwrap_or(AnnotationId::MAX);
        self.history.reset(self.snapshot());
        log::debug!("Store: loaded {} annotations", self.annotations.len());
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn get(&self, id: AnnotationId) -> Option<&AnnotationObject> {
        self.annotations.get(&id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.annotations.contains_key(&id)
    }

    /// Annotations in ascending id order (insertion order).
    pub fn iter(&self) -> impl Iterator<Item = (AnnotationId, &AnnotationObject)> {
        self.annotations.iter().map(|(id, object)| (*id, object.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Id the next created shape will get.
    pub fn last_index(&self) -> AnnotationId {
        self.last_index
    }

    /// Id of the most recently created shape, the one being drawn.
    pub fn drawing_id(&self) -> Option<AnnotationId> {
        self.last_index.checked_sub(1)
    }

    /// Highest id currently present.
    pub fn last_annotation(&self) -> Option<(AnnotationId, &AnnotationObject)> {
        self.annotations
            .last_key_value()
            .map(|(id, object)| (*id, object.as_ref()))
    }

    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    fn insert_new(&mut self, object: AnnotationObject) -> AnnotationId {
        let id = self.last_index;
        log::trace!("Store: new {} #{}", object.kind(), id);
        self.annotations.insert(id, Arc::new(object));
        self.last_index = self.last_index.saturating_add(1);
        id
    }

    pub fn start_draw_rect(&mut self, class_id: u32, p: Point) -> AnnotationId {
        self.insert_new(AnnotationObject::Bbox(Rectangle::at(class_id, p)))
    }

    /// Start an oriented box centered at `p`, sized zero, for an image of `img_w`×`img_h` px.
    pub fn start_draw_obb(&mut self, class_id: u32, p: Point, img_w: u32, img_h: u32) -> AnnotationId {
        let obb = OrientedRectangle::new(class_id, p.x, p.y, 0.0, 0.0, 0.0)
            .with_image_size(f64::from(img_w), f64::from(img_h));
        self.insert_new(AnnotationObject::Obb(obb))
    }

    /// Start a polygon with a fixed vertex and a live vertex, both at `p`.
    pub fn start_draw_poly(&mut self, class_id: u32, p: Point) -> AnnotationId {
        self.insert_new(AnnotationObject::Polygon(Polygon::new(class_id, vec![p, p])))
    }

    pub fn start_draw_pose(&mut self, class_id: u32, p: Point) -> AnnotationId {
        self.insert_new(AnnotationObject::Pose(Pose::at(class_id, p)))
    }

    /// Create a finished keypoint.
    pub fn draw_point(&mut self, class_id: u32, p: Point) -> AnnotationId {
        self.insert_new(AnnotationObject::Keypoint(Keypoint::new(class_id, p.x, p.y)))
    }

    // ------------------------------------------------------------------------
    // In-progress drawing
    // ------------------------------------------------------------------------

    /// Rebuild the shape being drawn. No-op if there is none or `f` declines.
    fn update_drawing(&mut self, f: impl FnOnce(&AnnotationObject) -> Option<AnnotationObject>) {
        let Some(id) = self.drawing_id() else {
            return;
        };
        let Some(current) = self.annotations.get(&id) else {
            return;
        };
        if let Some(updated) = f(current) {
            self.annotations.insert(id, Arc::new(updated));
        }
    }

    /// Move the free corner of the rectangle being drawn.
    pub fn update_draw_rect(&mut self, p: Point) {
        self.update_drawing(|object| match object {
            AnnotationObject::Bbox(rect) => Some(AnnotationObject::Bbox(Rectangle {
                x2: p.x,
                y2: p.y,
                ..*rect
            })),
            _ => None,
        });
    }

    /// Resize the oriented box being drawn.
    ///
    /// The fixed corner is the one of the current box on the far side of the
    /// center from `p`; the new box spans from it to `p`, unrotated.
    pub fn update_draw_obb(&mut self, p: Point) {
        self.update_drawing(|object| match object {
            AnnotationObject::Obb(obb) => {
                let xs = if p.x > obb.xc { obb.xc - obb.w / 2.0 } else { obb.xc + obb.w / 2.0 };
                let ys = if p.y > obb.yc { obb.yc - obb.h / 2.0 } else { obb.yc + obb.h / 2.0 };
                Some(AnnotationObject::Obb(OrientedRectangle {
                    xc: (p.x + xs) / 2.0,
                    yc: (p.y + ys) / 2.0,
                    w: (xs - p.x).abs(),
                    h: (ys - p.y).abs(),
                    alpha: 0.0,
                    ..*obb
                }))
            }
            _ => None,
        });
    }

    /// Move the live (last) vertex of the polygon being drawn.
    pub fn update_draw_poly(&mut self, p: Point) {
        self.update_drawing(|object| match object {
            AnnotationObject::Polygon(poly) => {
                Some(AnnotationObject::Polygon(poly.move_last_vertex(p.x, p.y)))
            }
            _ => None,
        });
    }

    /// Commit the live vertex and start a new one at `p`.
    pub fn push_draw_poly_vertex(&mut self, p: Point) {
        self.update_drawing(|object| match object {
            AnnotationObject::Polygon(poly) => {
                Some(AnnotationObject::Polygon(poly.push_vertex(p.x, p.y)))
            }
            _ => None,
        });
    }

    /// Close the polygon being drawn by dropping its live vertex.
    pub fn finish_draw_poly(&mut self) {
        self.update_drawing(|object| match object {
            AnnotationObject::Polygon(poly) => {
                Some(AnnotationObject::Polygon(poly.without_last_vertex()))
            }
            _ => None,
        });
    }

    /// Move the free corner of the pose box being drawn.
    pub fn update_draw_pose_bbox(&mut self, p: Point) {
        self.update_drawing(|object| match object {
            AnnotationObject::Pose(pose) => {
                Some(AnnotationObject::Pose(pose.with_second_corner(p.x, p.y)))
            }
            _ => None,
        });
    }

    /// Place keypoint `keypoint_id` on the pose being drawn.
    pub fn add_draw_pose_keypoint(&mut self, p: Point, keypoint_id: u32) {
        self.update_drawing(|object| match object {
            AnnotationObject::Pose(pose) => {
                Some(AnnotationObject::Pose(pose.add_keypoint(p.x, p.y, true, keypoint_id)))
            }
            _ => None,
        });
    }

    /// Move the most recently placed keypoint of the pose being drawn.
    pub fn update_draw_pose_keypoint(&mut self, p: Point) {
        self.update_drawing(|object| match object {
            AnnotationObject::Pose(pose) => {
                let last = pose.keypoints.len().checked_sub(1)?;
                Some(AnnotationObject::Pose(pose.move_keypoint(p.x, p.y, last)))
            }
            _ => None,
        });
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    /// Replace an existing shape. Returns false if `id` is not present.
    pub fn update_annotation(&mut self, id: AnnotationId, object: AnnotationObject) -> bool {
        match self.annotations.get_mut(&id) {
            Some(slot) => {
                *slot = Arc::new(object);
                true
            }
            None => false,
        }
    }

    /// Delete one shape, leaving a gap in the ids.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        let removed = self.annotations.remove(&id).is_some();
        if removed {
            log::debug!("Store: removed annotation #{}", id);
        }
        removed
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            annotations: self.annotations.clone(),
            length: self.last_index,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.annotations = snapshot.annotations;
        self.last_index = snapshot.length;
    }

    /// Checkpoint the current contents.
    pub fn save_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.save(snapshot);
    }

    /// Restore the previous checkpoint. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Restore the next checkpoint. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Collapse history to a single empty checkpoint.
    pub fn reset_history(&mut self) {
        self.history.reset(Snapshot::default());
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// All annotations in id order, cloned out of the store.
    pub fn to_vec(&self) -> Vec<AnnotationObject> {
        self.annotations.values().map(|object| object.as_ref().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_draw_rect_scenario() {
        let mut store = AnnotationStore::new();
        let id = store.start_draw_rect(0, p(0.1, 0.1));
        store.update_draw_rect(p(0.5, 0.4));
        store.save_history();

        assert_eq!(id, 0);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(0),
            Some(&AnnotationObject::Bbox(Rectangle::new(0, 0.1, 0.1, 0.5, 0.4)))
        );
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = AnnotationStore::new();
        store.draw_point(0, p(0.1, 0.1));
        store.draw_point(0, p(0.2, 0.2));
        assert!(store.remove_annotation(1));
        let id = store.draw_point(0, p(0.3, 0.3));
        assert_eq!(id, 2);
        assert_eq!(store.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![0, 2]);
        assert!(!store.remove_annotation(1));
    }

    #[test]
    fn test_update_missing_annotation_is_noop() {
        let mut store = AnnotationStore::new();
        let object = AnnotationObject::Keypoint(Keypoint::new(0, 0.5, 0.5));
        assert!(!store.update_annotation(3, object));
        assert!(store.is_empty());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut store = AnnotationStore::new();
        store.start_draw_rect(0, p(0.1, 0.1));
        store.update_draw_rect(p(0.5, 0.4));
        store.save_history();
        store.draw_point(1, p(0.7, 0.7));
        store.save_history();

        let saved = store.to_vec();
        let saved_index = store.last_index();

        assert!(store.undo());
        assert_eq!(store.len(), 1);
        assert_eq!(store.last_index(), 1);

        assert!(store.redo());
        assert_eq!(store.to_vec(), saved);
        assert_eq!(store.last_index(), saved_index);
        assert!(!store.redo());
    }

    #[test]
    fn test_checkpoint_is_not_affected_by_later_edits() {
        let mut store = AnnotationStore::new();
        let id = store.draw_point(0, p(0.2, 0.2));
        store.save_history();

        let moved = store.get(id).map(|object| object.move_by(0.1, 0.1));
        if let Some(moved) = moved {
            assert!(store.update_annotation(id, moved));
        }
        store.save_history();
        assert!(store.undo());
        assert_eq!(
            store.get(id),
            Some(&AnnotationObject::Keypoint(Keypoint::new(0, 0.2, 0.2)))
        );
    }

    #[test]
    fn test_new_edit_after_undo_drops_redo() {
        let mut store = AnnotationStore::new();
        store.draw_point(0, p(0.1, 0.1));
        store.save_history();
        store.draw_point(0, p(0.2, 0.2));
        store.save_history();
        store.undo();
        store.draw_point(0, p(0.3, 0.3));
        store.save_history();
        assert!(!store.can_redo());
        // Ids keep growing from the restored counter.
        assert_eq!(store.last_index(), 2);
    }

    #[test]
    fn test_load_resets_history() {
        let mut store = AnnotationStore::new();
        store.draw_point(0, p(0.1, 0.1));
        store.save_history();
        store.load_annotations(vec![
            AnnotationObject::Keypoint(Keypoint::new(0, 0.4, 0.4)),
            AnnotationObject::Bbox(Rectangle::new(1, 0.1, 0.1, 0.2, 0.2)),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.last_index(), 2);
        assert!(!store.can_undo());
        assert!(!store.undo());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reset_history() {
        let mut store = AnnotationStore::new();
        store.draw_point(0, p(0.1, 0.1));
        store.save_history();
        store.reset_history();
        assert_eq!(store.history().index(), 0);
        assert_eq!(store.history().current(), &Snapshot::default());
    }

    #[test]
    fn test_draw_obb_flips_around_anchor() {
        let mut store = AnnotationStore::new();
        store.start_draw_obb(0, p(0.5, 0.5), 100, 100);
        store.update_draw_obb(p(0.7, 0.6));
        match store.get(0) {
            Some(AnnotationObject::Obb(obb)) => {
                assert!((obb.xc - 0.6).abs() < 1e-12);
                assert!((obb.yc - 0.55).abs() < 1e-12);
                assert!((obb.w - 0.2).abs() < 1e-12);
                assert!((obb.h - 0.1).abs() < 1e-12);
            }
            other => panic!("expected obb, got {:?}", other),
        }

        // Dragging past the anchor keeps the anchor corner at (0.5, 0.5).
        store.update_draw_obb(p(0.3, 0.4));
        match store.get(0) {
            Some(AnnotationObject::Obb(obb)) => {
                assert!((obb.xc - 0.4).abs() < 1e-12);
                assert!((obb.yc - 0.45).abs() < 1e-12);
                assert!((obb.w - 0.2).abs() < 1e-12);
                assert!((obb.h - 0.1).abs() < 1e-12);
                assert_eq!(obb.img_w, 100.0);
            }
            other => panic!("expected obb, got {:?}", other),
        }
    }

    #[test]
    fn test_draw_poly_lifecycle() {
        let mut store = AnnotationStore::new();
        store.start_draw_poly(0, p(0.1, 0.1));
        store.update_draw_poly(p(0.5, 0.1));
        store.push_draw_poly_vertex(p(0.5, 0.1));
        store.update_draw_poly(p(0.5, 0.5));
        store.push_draw_poly_vertex(p(0.5, 0.5));
        store.finish_draw_poly();
        match store.get(0) {
            Some(AnnotationObject::Polygon(poly)) => {
                assert_eq!(poly.shell, vec![p(0.1, 0.1), p(0.5, 0.1), p(0.5, 0.5)]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_draw_update_ignores_other_kinds() {
        let mut store = AnnotationStore::new();
        store.draw_point(0, p(0.1, 0.1));
        store.update_draw_rect(p(0.9, 0.9));
        store.update_draw_pose_keypoint(p(0.9, 0.9));
        assert_eq!(
            store.get(0),
            Some(&AnnotationObject::Keypoint(Keypoint::new(0, 0.1, 0.1)))
        );
    }

    #[test]
    fn test_draw_pose_keypoints() {
        let mut store = AnnotationStore::new();
        store.start_draw_pose(2, p(0.1, 0.1));
        store.update_draw_pose_bbox(p(0.6, 0.6));
        // No keypoint yet: nothing to move.
        store.update_draw_pose_keypoint(p(0.3, 0.3));
        store.add_draw_pose_keypoint(p(0.2, 0.2), 4);
        store.update_draw_pose_keypoint(p(0.25, 0.3));
        match store.get(0) {
            Some(AnnotationObject::Pose(pose)) => {
                assert_eq!((pose.x2, pose.y2), (0.6, 0.6));
                assert_eq!(pose.keypoints.len(), 1);
                assert_eq!(pose.keypoints[0].class_id, 4);
                assert_eq!(pose.keypoints[0].position(), p(0.25, 0.3));
            }
            other => panic!("expected pose, got {:?}", other),
        }
    }
}
