use std::f32::consts::TAU;

use anyhow::{Context, Result, anyhow};
use eframe::egui::{Vec2, vec2};

use crate::corpus::{Embedder, ReduceParams, Reducer};
use crate::similarity::cosine_similarity;

/// Scale applied to reduced embedding-mode coordinates to spread them over
/// canvas space. Anchor-mode radii are already in canvas units.
pub const COORDINATE_MULTIPLIER: f32 = 400.0;

const BAND_COUNT: usize = 5;
const BAND_LOWER_BOUNDS: [f32; BAND_COUNT] = [0.8, 0.6, 0.4, 0.2, 0.0];
const BAND_RADII: [f32; BAND_COUNT] = [500.0, 800.0, 1100.0, 1400.0, 1700.0];
const COMPACT_BASE_RADIUS: f32 = 500.0;
const COMPACT_RADIUS_STEP: f32 = 300.0;

/// Turn a comment batch plus an optional anchor into one 2-D point per text,
/// in input order.
///
/// With an empty anchor the texts are embedded, reduced to 2-D by the
/// external reducer, centered on their bounding-box midpoint, and scaled.
/// With a non-empty anchor each text is instead placed on one of five
/// concentric similarity bands around the origin.
pub fn solve_layout(
    texts: &[String],
    anchor: &str,
    embedder: &dyn Embedder,
    reducer: &dyn Reducer,
) -> Result<Vec<Vec2>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    if anchor.is_empty() {
        let vectors = embedder
            .embed(texts)
            .context("embedding service failed for the comment batch")?;
        if vectors.len() != texts.len() {
            return Err(anyhow!(
                "embedder returned {} vectors for {} comments",
                vectors.len(),
                texts.len()
            ));
        }

        let params = ReduceParams::for_batch(vectors.len());
        let mut points = reducer
            .reduce_to_2d(&vectors, &params)
            .context("dimensionality reduction failed")?;
        if points.len() != texts.len() {
            return Err(anyhow!(
                "reducer returned {} points for {} comments",
                points.len(),
                texts.len()
            ));
        }

        center_on_bounds_midpoint(&mut points);
        for point in &mut points {
            *point *= COORDINATE_MULTIPLIER;
        }
        Ok(points)
    } else {
        let similarities = anchor_similarities(texts, anchor, embedder)?;
        Ok(radial_layout(&similarities))
    }
}

/// Cosine similarity of each text's embedding against the anchor embedding.
pub fn anchor_similarities(
    texts: &[String],
    anchor: &str,
    embedder: &dyn Embedder,
) -> Result<Vec<f32>> {
    let anchor_batch = [anchor.to_owned()];
    let anchor_vectors = embedder
        .embed(&anchor_batch)
        .context("embedding service failed for the anchor text")?;
    let anchor_vector = anchor_vectors
        .first()
        .ok_or_else(|| anyhow!("embedder returned no vector for the anchor text"))?;

    let text_vectors = embedder
        .embed(texts)
        .context("embedding service failed for the comment batch")?;

    Ok(text_vectors
        .iter()
        .map(|vector| cosine_similarity(anchor_vector, vector))
        .collect())
}

/// Band index for a similarity score. Total over all floats: scores at or
/// above 1.0 land in the top band, negative scores in the bottom band.
fn band_index(similarity: f32) -> usize {
    BAND_LOWER_BOUNDS
        .iter()
        .position(|&lower| similarity >= lower)
        .unwrap_or(BAND_COUNT - 1)
}

/// When the top band(s) are empty, re-radius so the first non-empty band
/// starts at the innermost radius and later bands step outward by 300. Keeps
/// rings close to the anchor when no high-similarity matches exist.
fn compacted_radii(members: &[Vec<usize>; BAND_COUNT]) -> [f32; BAND_COUNT] {
    let Some(first) = members.iter().position(|band| !band.is_empty()) else {
        return BAND_RADII;
    };
    if first == 0 {
        return BAND_RADII;
    }

    let mut radii = BAND_RADII;
    for (step, radius) in radii[first..].iter_mut().enumerate() {
        *radius = COMPACT_BASE_RADIUS + step as f32 * COMPACT_RADIUS_STEP;
    }
    radii
}

/// Place each index on its similarity band, members of a band spaced at
/// equal angles around a full circle. Empty bands contribute nothing.
pub fn radial_layout(similarities: &[f32]) -> Vec<Vec2> {
    let mut members: [Vec<usize>; BAND_COUNT] = Default::default();
    for (index, similarity) in similarities.iter().enumerate() {
        members[band_index(*similarity)].push(index);
    }

    let radii = compacted_radii(&members);
    let mut points = vec![Vec2::ZERO; similarities.len()];

    for (band, indices) in members.iter().enumerate() {
        let count = indices.len();
        if count == 0 {
            continue;
        }
        for (position, &index) in indices.iter().enumerate() {
            let angle = TAU * position as f32 / count as f32;
            points[index] = radii[band] * vec2(angle.cos(), angle.sin());
        }
    }

    points
}

/// Shift all points so the midpoint of their bounding box sits at the
/// origin. Uses (min+max)/2 per axis rather than the centroid so symmetric
/// extremes stay symmetric regardless of density.
pub fn center_on_bounds_midpoint(points: &mut [Vec2]) {
    let Some(first) = points.first().copied() else {
        return;
    };

    let mut min = first;
    let mut max = first;
    for point in points.iter() {
        min = min.min(*point);
        max = max.max(*point);
    }

    let midpoint = (min + max) / 2.0;
    for point in points.iter_mut() {
        *point -= midpoint;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn band_index_is_total() {
        assert_eq!(band_index(0.95), 0);
        assert_eq!(band_index(0.8), 0);
        assert_eq!(band_index(0.5), 2);
        assert_eq!(band_index(0.0), 4);
        assert_eq!(band_index(1.0), 0);
        assert_eq!(band_index(-0.4), 4);
    }

    #[test]
    fn two_close_one_far_matches_band_geometry() {
        let points = radial_layout(&[0.9, 0.9, 0.1]);

        // Top band: two members at radius 500, angles 0 and pi.
        assert!(close(points[0], vec2(500.0, 0.0)));
        assert!(close(points[1], vec2(500.0 * PI.cos(), 500.0 * PI.sin())));
        // Bottom band: alone at radius 1700, angle 0.
        assert!(close(points[2], vec2(1700.0, 0.0)));
    }

    #[test]
    fn empty_top_bands_compact_radii() {
        let points = radial_layout(&[0.5, 0.3]);

        // [0.4,0.6) re-radiused to 500, [0.2,0.4) to 800.
        assert!(close(points[0], vec2(500.0, 0.0)));
        assert!(close(points[1], vec2(800.0, 0.0)));
    }

    #[test]
    fn full_top_band_keeps_default_radii() {
        let points = radial_layout(&[0.9, 0.1]);
        assert!(close(points[0], vec2(500.0, 0.0)));
        assert!(close(points[1], vec2(1700.0, 0.0)));
    }

    #[test]
    fn bottom_band_only_compacts_to_innermost_radius() {
        let points = radial_layout(&[0.05]);
        assert!(close(points[0], vec2(500.0, 0.0)));
    }

    #[test]
    fn band_members_are_equally_spaced() {
        let points = radial_layout(&[0.9, 0.85, 0.82, 0.95]);
        for point in &points {
            assert!((point.length() - 500.0).abs() < 1e-2);
        }
        // Four members a quarter-turn apart.
        assert!(close(points[1], vec2(0.0, 500.0)));
        assert!(close(points[2], vec2(-500.0, 0.0)));
        assert!(close(points[3], vec2(0.0, -500.0)));
    }

    #[test]
    fn centering_uses_bounds_midpoint_not_centroid() {
        let mut points = vec![vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(10.0, 4.0)];
        center_on_bounds_midpoint(&mut points);

        assert!(close(points[0], vec2(-5.0, -2.0)));
        assert!(close(points[2], vec2(5.0, 2.0)));
    }

    #[test]
    fn centering_tolerates_empty_and_single_inputs() {
        let mut empty: Vec<Vec2> = Vec::new();
        center_on_bounds_midpoint(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![vec2(3.0, -7.0)];
        center_on_bounds_midpoint(&mut single);
        assert!(close(single[0], Vec2::ZERO));
    }
}
