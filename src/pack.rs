use eframe::egui::{Rect, Vec2, pos2, vec2};

use crate::cluster::Clustering;

pub const BOX_HEIGHT: f32 = 80.0;
pub const WIDTH_PER_FONT_UNIT: f32 = 32.0;
pub const SHIFT_STEP: f32 = 30.0;

/// The rectangular container for one comment. `rect` is the overlap-tested
/// render geometry; `anchor` is the original data point, kept for link
/// distances and text anchoring.
#[derive(Clone, Debug)]
pub struct CommentBox {
    pub rect: Rect,
    pub anchor: Vec2,
    pub text: String,
    pub cluster_id: usize,
}

impl CommentBox {
    pub fn center(&self) -> Vec2 {
        self.rect.center().to_vec2()
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect.translate(delta);
        self.anchor += delta;
    }

    pub(crate) fn scale_about(&mut self, center: Vec2, factor: f32) {
        let min = center + (self.rect.min.to_vec2() - center) * factor;
        self.rect = Rect::from_min_size(min.to_pos2(), self.rect.size() * factor);
        self.anchor = center + (self.anchor - center) * factor;
    }
}

/// Strict axis-aligned intersection: rectangles that merely touch along an
/// edge do not overlap.
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Resolve points into non-overlapping boxes. Clusters are processed in
/// ascending id order and members in input order; a candidate that overlaps
/// any already-finalized box is shifted down until it fits, and finalized
/// boxes are never revisited. The result holds one box per input text, in
/// input order.
pub fn pack_boxes(
    points: &[Vec2],
    clustering: &Clustering,
    texts: &[String],
    font_size: f32,
) -> Vec<CommentBox> {
    let width = font_size * WIDTH_PER_FONT_UNIT;
    let mut placed: Vec<Rect> = Vec::with_capacity(points.len());
    let mut slots: Vec<Option<CommentBox>> = vec![None; points.len()];

    for cluster in 0..clustering.cluster_count() {
        for index in 0..points.len() {
            if clustering.assignments[index] != cluster {
                continue;
            }

            let anchor = points[index];
            let mut rect = Rect::from_min_size(
                pos2(anchor.x - width / 2.0, anchor.y - BOX_HEIGHT / 2.0),
                vec2(width, BOX_HEIGHT),
            );
            while placed.iter().any(|other| boxes_overlap(other, &rect)) {
                rect = rect.translate(vec2(0.0, SHIFT_STEP));
            }

            placed.push(rect);
            slots[index] = Some(CommentBox {
                rect,
                anchor,
                text: texts[index].clone(),
                cluster_id: cluster,
            });
        }
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn clustering_of(assignments: Vec<usize>, cluster_count: usize) -> Clustering {
        Clustering {
            assignments,
            centroids: vec![Vec2::ZERO; cluster_count],
        }
    }

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("comment {i}")).collect()
    }

    fn assert_no_overlaps(boxes: &[CommentBox]) {
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                assert!(
                    !boxes_overlap(&boxes[i].rect, &boxes[j].rect),
                    "boxes {i} and {j} overlap: {:?} vs {:?}",
                    boxes[i].rect,
                    boxes[j].rect
                );
            }
        }
    }

    #[test]
    fn overlap_test_is_strict() {
        let a = Rect::from_min_size(pos2(0.0, 0.0), vec2(10.0, 10.0));
        let touching = Rect::from_min_size(pos2(10.0, 0.0), vec2(10.0, 10.0));
        let crossing = Rect::from_min_size(pos2(9.0, 9.0), vec2(10.0, 10.0));

        assert!(!boxes_overlap(&a, &touching));
        assert!(boxes_overlap(&a, &crossing));
        assert!(!boxes_overlap(&touching, &a));
    }

    #[test]
    fn coincident_points_are_resolved_without_overlap() {
        let points = vec![Vec2::ZERO; 6];
        let clustering = clustering_of(vec![0, 0, 0, 1, 1, 1], 2);
        let boxes = pack_boxes(&points, &clustering, &texts(6), 14.0);

        assert_eq!(boxes.len(), 6);
        assert_no_overlaps(&boxes);
    }

    #[test]
    fn dense_grid_is_resolved_without_overlap() {
        let mut points = Vec::new();
        for row in 0..4 {
            for col in 0..4 {
                points.push(vec2(col as f32 * 120.0, row as f32 * 25.0));
            }
        }
        let assignments = (0..points.len()).map(|i| i % 3).collect();
        let clustering = clustering_of(assignments, 3);
        let boxes = pack_boxes(&points, &clustering, &texts(points.len()), 14.0);

        assert_eq!(boxes.len(), points.len());
        assert_no_overlaps(&boxes);
    }

    #[test]
    fn output_follows_input_order_despite_cluster_major_placement() {
        let points = vec![vec2(0.0, 0.0), vec2(2000.0, 0.0), vec2(4000.0, 0.0)];
        let clustering = clustering_of(vec![1, 0, 1], 2);
        let boxes = pack_boxes(&points, &clustering, &texts(3), 14.0);

        assert_eq!(boxes[0].text, "comment 0");
        assert_eq!(boxes[1].text, "comment 1");
        assert_eq!(boxes[2].text, "comment 2");
        assert_eq!(boxes[0].cluster_id, 1);
        assert_eq!(boxes[1].cluster_id, 0);
    }

    #[test]
    fn single_box_is_centered_on_its_point() {
        let points = vec![vec2(50.0, -30.0)];
        let clustering = clustering_of(vec![0], 1);
        let boxes = pack_boxes(&points, &clustering, &texts(1), 14.0);

        let rect = boxes[0].rect;
        assert_eq!(rect.width(), 14.0 * WIDTH_PER_FONT_UNIT);
        assert_eq!(rect.height(), BOX_HEIGHT);
        assert!((rect.center().x - 50.0).abs() < 1e-4);
        assert!((rect.center().y + 30.0).abs() < 1e-4);
        assert_eq!(boxes[0].anchor, vec2(50.0, -30.0));
    }

    #[test]
    fn collision_shifts_move_straight_down() {
        let points = vec![Vec2::ZERO, Vec2::ZERO];
        let clustering = clustering_of(vec![0, 0], 1);
        let boxes = pack_boxes(&points, &clustering, &texts(2), 14.0);

        // Same x, second box pushed below the first in whole shift steps.
        assert_eq!(boxes[0].rect.min.x, boxes[1].rect.min.x);
        let displacement = boxes[1].rect.min.y - boxes[0].rect.min.y;
        assert!(displacement >= BOX_HEIGHT);
        assert_eq!(boxes[1].anchor, Vec2::ZERO);
    }

    #[test]
    fn empty_input_packs_nothing() {
        let clustering = clustering_of(Vec::new(), 0);
        let boxes = pack_boxes(&[], &clustering, &[], 14.0);
        assert!(boxes.is_empty());
    }
}
