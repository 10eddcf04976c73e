use eframe::egui::{self, Rect, Ui, pos2};

use super::ViewModel;

impl ViewModel {
    /// Translate raw pointer input into viewport gestures. Screen deltas map
    /// one-to-one onto world deltas because the world origin is pinned at
    /// the panel center.
    pub(in crate::app) fn handle_map_input(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if response.hovered() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                self.viewport.zoom_step(&mut self.boxes, scroll > 0.0);
            }
        }

        let pointer = ui.input(|input| input.pointer.interact_pos());
        let primary_down = ui.input(|input| input.pointer.primary_down());
        let primary_released = ui.input(|input| input.pointer.primary_released());

        let Some(pointer) = pointer else {
            self.viewport.drag_end();
            return;
        };
        if !rect.contains(pointer) {
            // Pointer left the canvas: same as releasing.
            self.viewport.drag_end();
            return;
        }

        let world = pointer - rect.center();

        if primary_down {
            if self.viewport.drag_active() {
                self.viewport.drag_move(&mut self.boxes, world);
            } else if response.hovered() {
                self.viewport.drag_start(world);
            }
        }

        if primary_released {
            if !self.viewport.drag_registered()
                && let Some(index) = self.box_at(world)
            {
                self.expanded = Some(index);
            }
            self.viewport.drag_end();
        }
    }

    fn box_at(&self, world: eframe::egui::Vec2) -> Option<usize> {
        let point = pos2(world.x, world.y);
        self.boxes
            .iter()
            .position(|comment_box| comment_box.rect.contains(point))
    }
}
