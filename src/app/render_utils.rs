use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

/// Fifteen cluster fill colors, cycled by cluster id.
const CLUSTER_COLORS: [(u8, u8, u8); 15] = [
    (200, 200, 200),
    (255, 200, 200),
    (200, 255, 200),
    (200, 200, 255),
    (255, 255, 200),
    (200, 255, 255),
    (255, 200, 255),
    (255, 255, 255),
    (100, 100, 100),
    (255, 100, 100),
    (100, 255, 100),
    (100, 100, 255),
    (255, 255, 100),
    (100, 255, 255),
    (255, 100, 255),
];

pub(super) fn cluster_color(cluster_id: usize) -> Color32 {
    let (r, g, b) = CLUSTER_COLORS[cluster_id % CLUSTER_COLORS.len()];
    Color32::from_rgba_unmultiplied(r, g, b, 204)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center();

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        y += step;
    }
}

pub(super) fn rect_visible(panel: Rect, screen_rect: Rect) -> bool {
    !(screen_rect.max.x < panel.left()
        || screen_rect.min.x > panel.right()
        || screen_rect.max.y < panel.top()
        || screen_rect.min.y > panel.bottom())
}

pub(super) fn segment_visible(panel: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < panel.left() || min_x > panel.right() || max_y < panel.top() || min_y > panel.bottom())
}
