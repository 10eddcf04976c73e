use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cluster::cluster_points;
use crate::corpus::{Embedder, Reducer};
use crate::layout::solve_layout;
use crate::pack::{CommentBox, pack_boxes};
use crate::viewport::DEFAULT_FONT_SIZE;

pub const DEFAULT_MAX_GROUPS: usize = 15;

#[derive(Clone, Copy, Debug)]
pub struct SceneOptions {
    pub max_groups: usize,
    pub seed: Option<u64>,
    pub font_size: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            max_groups: DEFAULT_MAX_GROUPS,
            seed: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// The packed result of one layout request: everything the viewport needs
/// before the first zoom or pan.
#[derive(Clone, Debug)]
pub struct Scene {
    pub boxes: Vec<CommentBox>,
    pub cluster_count: usize,
    pub has_anchor: bool,
}

/// Run the full pipeline for one comment batch: solve the layout, cluster
/// the resulting points, and pack them into non-overlapping boxes.
pub fn build_scene(
    texts: &[String],
    anchor: &str,
    embedder: &dyn Embedder,
    reducer: &dyn Reducer,
    options: &SceneOptions,
) -> Result<Scene> {
    let points = solve_layout(texts, anchor, embedder, reducer)
        .context("failed to lay out the comment batch")?;

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let clustering = cluster_points(&points, options.max_groups, &mut rng);
    let boxes = pack_boxes(&points, &clustering, texts, options.font_size);

    Ok(Scene {
        cluster_count: clustering.cluster_count(),
        has_anchor: !anchor.is_empty(),
        boxes,
    })
}
