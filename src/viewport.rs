use eframe::egui::Vec2;

use crate::pack::CommentBox;

pub const ZOOM_STEP: f32 = 0.1;
pub const ZOOM_MIN: f32 = 0.2;
pub const ZOOM_MAX: f32 = 5.0;
pub const DRAG_THRESHOLD: f32 = 5.0;
pub const DEFAULT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_LINK_THRESHOLD: f32 = 400.0;

/// The single authoritative view state. Zoom scale, font size, and link
/// threshold always change together with the box geometry, so the visual
/// scale can never drift from the stored one.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub center: Vec2,
    pub zoom_scale: f32,
    pub font_size: f32,
    pub link_threshold: f32,
    drag_last: Option<Vec2>,
    drag_total: Vec2,
    drag_registered: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom_scale: 1.0,
            font_size: DEFAULT_FONT_SIZE,
            link_threshold: DEFAULT_LINK_THRESHOLD,
            drag_last: None,
            drag_total: Vec2::ZERO,
            drag_registered: false,
        }
    }
}

impl Viewport {
    /// Default viewport centered on the midpoint of the boxes' anchor
    /// bounding box.
    pub fn fit(boxes: &[CommentBox]) -> Self {
        let mut viewport = Self::default();
        if let Some(first) = boxes.first() {
            let mut min = first.anchor;
            let mut max = first.anchor;
            for comment_box in boxes {
                min = min.min(comment_box.anchor);
                max = max.max(comment_box.anchor);
            }
            viewport.center = (min + max) / 2.0;
        }
        viewport
    }

    /// One wheel-zoom step. The new scale is clamped to [0.2, 5.0]; the
    /// resulting factor is applied multiplicatively to the font size, the
    /// link threshold, and every box re-expressed relative to the viewport
    /// center, all in the same transaction.
    pub fn zoom_step(&mut self, boxes: &mut [CommentBox], zoom_in: bool) {
        let target = if zoom_in {
            (self.zoom_scale + ZOOM_STEP).min(ZOOM_MAX)
        } else {
            (self.zoom_scale - ZOOM_STEP).max(ZOOM_MIN)
        };
        if target == self.zoom_scale {
            return;
        }

        let factor = target / self.zoom_scale;
        self.font_size *= factor;
        self.link_threshold *= factor;
        for comment_box in boxes.iter_mut() {
            comment_box.scale_about(self.center, factor);
        }
        self.zoom_scale = target;
    }

    /// Begin a pan gesture: record the pointer position and clear the moved
    /// flag.
    pub fn drag_start(&mut self, point: Vec2) {
        self.drag_last = Some(point);
        self.drag_total = Vec2::ZERO;
        self.drag_registered = false;
    }

    /// Incremental pan: translate the center and every box by the delta
    /// since the last recorded position. Once cumulative movement exceeds
    /// the threshold on either axis, the gesture counts as a drag.
    pub fn drag_move(&mut self, boxes: &mut [CommentBox], point: Vec2) {
        let Some(last) = self.drag_last else {
            return;
        };

        let delta = point - last;
        self.drag_total += delta;
        if self.drag_total.x.abs() > DRAG_THRESHOLD || self.drag_total.y.abs() > DRAG_THRESHOLD {
            self.drag_registered = true;
        }

        self.center += delta;
        for comment_box in boxes.iter_mut() {
            comment_box.translate(delta);
        }
        self.drag_last = Some(point);
    }

    /// End the gesture. The moved flag survives until the next
    /// `drag_start`, so a release can still be classified as click or drag.
    pub fn drag_end(&mut self) {
        self.drag_last = None;
    }

    pub fn drag_active(&self) -> bool {
        self.drag_last.is_some()
    }

    /// True once the current (or just-ended) gesture moved far enough to be
    /// a drag rather than a click.
    pub fn drag_registered(&self) -> bool {
        self.drag_registered
    }
}
