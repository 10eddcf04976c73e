use eframe::egui::Vec2;

/// Cosine similarity between two equal-length vectors. Returns 0.0 when
/// either vector has zero norm instead of propagating NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Unit-normalize a 2-D point. A zero vector is returned unchanged so that
/// downstream dot products stay finite.
pub fn normalize_or_keep(v: Vec2) -> Vec2 {
    let norm = v.length();
    if norm == 0.0 { v } else { v / norm }
}
