use eframe::egui::{self, Context};

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_expanded_comment(&mut self, ctx: &Context) {
        let Some(index) = self.expanded else {
            return;
        };
        let Some(comment_box) = self.boxes.get(index) else {
            self.expanded = None;
            return;
        };

        let mut open = true;
        egui::Window::new("Comment")
            .collapsible(false)
            .resizable(true)
            .default_width(380.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("group {}", comment_box.cluster_id + 1));
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        ui.label(&comment_box.text);
                    });
            });

        if !open {
            self.expanded = None;
        }
    }
}
