use eframe::egui::{self, Ui};

use super::{RecomputeRequest, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        recompute: &mut Option<RecomputeRequest>,
        is_loading: bool,
    ) {
        ui.add_space(6.0);
        ui.heading("Anchor");
        ui.label("Comments are arranged by similarity to this term. Leave empty to place them by embedding position instead.");
        ui.add_space(4.0);

        let anchor_edit = ui.add_enabled(
            !is_loading,
            egui::TextEdit::singleline(&mut self.anchor_draft).hint_text("anchor term"),
        );
        let apply_clicked = ui
            .add_enabled(!is_loading, egui::Button::new("Apply anchor"))
            .clicked();
        let apply_submitted =
            anchor_edit.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

        if (apply_clicked || apply_submitted) && self.anchor_draft.trim() != self.anchor {
            *recompute = Some(RecomputeRequest {
                anchor: self.anchor_draft.trim().to_owned(),
                max_groups: self.max_groups,
            });
        }

        ui.add_space(10.0);
        ui.separator();
        ui.heading("Clustering");

        let slider = ui.add_enabled(
            !is_loading,
            egui::Slider::new(&mut self.max_groups, 1..=30).text("max groups"),
        );
        if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
            *recompute = Some(RecomputeRequest {
                anchor: self.anchor.clone(),
                max_groups: self.max_groups,
            });
        }
        ui.label(format!("groups in use: {}", self.cluster_count));

        ui.add_space(10.0);
        ui.separator();
        ui.heading("Search");
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("highlight comments"));
        if !self.search.trim().is_empty() && ui.button("Clear search").clicked() {
            self.search.clear();
        }

        ui.add_space(10.0);
        ui.separator();
        ui.heading("View");
        if ui.button("Reset view").clicked() {
            self.reset_view();
        }
        ui.add_space(4.0);
        ui.label(format!("font size: {:.1}", self.viewport.font_size));
        ui.label(format!(
            "link threshold: {:.0}",
            self.viewport.link_threshold
        ));
        ui.label(format!("comments: {}", self.comments.len()));

        ui.add_space(10.0);
        ui.separator();
        ui.label("Scroll to zoom, drag to pan, click a box to read the full comment.");
    }
}
