use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui, pos2, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::links::select_links;
use crate::util::wrap_comment;

use super::ViewModel;
use super::render_utils::{cluster_color, draw_background, rect_visible, segment_visible};

const LINK_COLOR: Color32 = Color32::GRAY;
const BOX_STROKE_COLOR: Color32 = Color32::BLACK;
const TEXT_COLOR: Color32 = Color32::BLACK;
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(103, 196, 255);

impl ViewModel {
    pub(in crate::app) fn draw_map(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.viewport.zoom_scale);
        self.handle_map_input(ui, rect, &response);

        if self.boxes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No comments to lay out.",
                FontId::proportional(16.0),
                Color32::LIGHT_GRAY,
            );
            return;
        }

        // World origin pinned at the panel center; pan moves the boxes.
        let origin = rect.center();
        let to_screen = |world: eframe::egui::Vec2| origin + world;

        let links = select_links(&self.boxes, self.viewport.link_threshold, self.has_anchor);

        for (i, j) in &links.pairs {
            let start = to_screen(self.boxes[*i].center());
            let end = to_screen(self.boxes[*j].center());
            if segment_visible(rect, start, end, 2.0) {
                painter.line_segment([start, end], Stroke::new(1.0, LINK_COLOR));
            }
        }

        for index in &links.anchor {
            let end = to_screen(self.boxes[*index].center());
            if segment_visible(rect, origin, end, 2.0) {
                painter.extend(Shape::dashed_line(
                    &[origin, end],
                    Stroke::new(1.0, LINK_COLOR),
                    4.0,
                    2.0,
                ));
            }
        }

        if self.has_anchor {
            self.draw_anchor(&painter, origin);
        }

        let matches = self.search_matches();

        for (index, comment_box) in self.boxes.iter().enumerate() {
            let screen_rect = Rect::from_min_size(
                to_screen(comment_box.rect.min.to_vec2()),
                comment_box.rect.size(),
            );
            if !rect_visible(rect, screen_rect) {
                continue;
            }

            painter.rect_filled(screen_rect, 0.0, cluster_color(comment_box.cluster_id));
            let stroke = if matches.as_ref().is_some_and(|m| m.contains(&index)) {
                Stroke::new(2.5, HIGHLIGHT_COLOR)
            } else {
                Stroke::new(1.0, BOX_STROKE_COLOR)
            };
            painter.rect_stroke(screen_rect, 0.0, stroke, StrokeKind::Inside);

            self.draw_comment_text(&painter, comment_box, origin);
        }
    }

    fn draw_anchor(&self, painter: &egui::Painter, origin: Pos2) {
        let anchor_rect = Rect::from_min_size(origin + vec2(-50.0, -20.0), vec2(100.0, 40.0));
        painter.rect_filled(anchor_rect, 0.0, Color32::WHITE);
        painter.rect_stroke(
            anchor_rect,
            0.0,
            Stroke::new(1.0, BOX_STROKE_COLOR),
            StrokeKind::Inside,
        );
        painter.text(
            origin,
            Align2::CENTER_CENTER,
            &self.anchor,
            FontId::proportional(self.viewport.font_size),
            TEXT_COLOR,
        );
    }

    /// Text is anchored at the box's data point x and the box's vertical
    /// center, lines stacked around it.
    fn draw_comment_text(
        &self,
        painter: &egui::Painter,
        comment_box: &crate::pack::CommentBox,
        origin: Pos2,
    ) {
        let font_size = self.viewport.font_size;
        if font_size < 4.0 {
            // Unreadable at this zoom; skip the glyph work.
            return;
        }

        let lines = wrap_comment(&comment_box.text);
        let line_height = font_size * 1.2;
        let text_x = origin.x + comment_box.anchor.x;
        let box_center_y = origin.y + comment_box.rect.center().y;
        let first_y = box_center_y - (lines.len().saturating_sub(1)) as f32 * line_height / 2.0;

        for (row, line) in lines.iter().enumerate() {
            painter.text(
                pos2(text_x, first_y + row as f32 * line_height),
                Align2::CENTER_CENTER,
                line,
                FontId::proportional(font_size),
                TEXT_COLOR,
            );
        }
    }

    fn search_matches(&self) -> Option<Vec<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.boxes
                .iter()
                .enumerate()
                .filter_map(|(index, comment_box)| {
                    matcher
                        .fuzzy_match(&comment_box.text, query)
                        .or_else(|| {
                            matcher.fuzzy_match(
                                &comment_box.text.to_lowercase(),
                                &query.to_lowercase(),
                            )
                        })
                        .map(|_| index)
                })
                .collect(),
        )
    }
}
