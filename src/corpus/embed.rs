use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use eframe::egui::{Vec2, vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// External embedding service: one vector per text, same order, same
/// dimensionality across the batch.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// External dimensionality-reduction algorithm consumed through a narrow
/// interface; implementations may ignore parameters they have no use for.
pub trait Reducer: Send + Sync {
    fn reduce_to_2d(&self, vectors: &[Vec<f32>], params: &ReduceParams) -> Result<Vec<Vec2>>;
}

#[derive(Clone, Copy, Debug)]
pub struct ReduceParams {
    pub n_components: usize,
    pub n_neighbors: usize,
    pub min_dist: f32,
}

impl ReduceParams {
    pub fn for_batch(batch_len: usize) -> Self {
        Self {
            n_components: 2,
            n_neighbors: batch_len.saturating_sub(1).clamp(1, 10),
            min_dist: 0.1,
        }
    }
}

/// Embeddings precomputed offline and stored as a JSON map from comment text
/// to vector.
pub struct StoredEmbeddings {
    vectors: HashMap<String, Vec<f32>>,
}

impl StoredEmbeddings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read embeddings file {}", path.display()))?;
        let vectors: HashMap<String, Vec<f32>> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in embeddings file {}", path.display()))?;

        if vectors.is_empty() {
            return Err(anyhow!("embeddings file {} is empty", path.display()));
        }

        Ok(Self { vectors })
    }
}

impl Embedder for StoredEmbeddings {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        let mut dimensions = None;

        for text in texts {
            let vector = self
                .vectors
                .get(text)
                .ok_or_else(|| anyhow!("no stored embedding for comment: {text:?}"))?;

            match dimensions {
                None => dimensions = Some(vector.len()),
                Some(expected) if expected != vector.len() => {
                    return Err(anyhow!(
                        "stored embedding for {text:?} has {} dimensions, expected {expected}",
                        vector.len()
                    ));
                }
                Some(_) => {}
            }

            out.push(vector.clone());
        }

        Ok(out)
    }
}

/// Deterministic fallback embedder: feature-hashed bag of words. Not a
/// semantic model, but stable across runs and good enough to exercise the
/// full layout pipeline without an embeddings file.
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(2),
        }
    }

    fn token_slot(&self, token: &str) -> (usize, f32) {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        let hash = hasher.finish();

        let bucket = (hash % self.dimensions as u64) as usize;
        let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Embedder for HashedEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let vectors = texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; self.dimensions];
                for token in text.to_lowercase().split_whitespace() {
                    let token = token.trim_matches(|c: char| !c.is_alphanumeric());
                    if token.is_empty() {
                        continue;
                    }
                    let (bucket, sign) = self.token_slot(token);
                    vector[bucket] += sign;
                }
                vector
            })
            .collect();
        Ok(vectors)
    }
}

/// Seeded random projection onto two fixed directions. Stands in for the
/// external manifold reducer; any other `Reducer` can be swapped in behind
/// the same interface.
pub struct RandomProjection {
    seed: u64,
}

impl RandomProjection {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Reducer for RandomProjection {
    fn reduce_to_2d(&self, vectors: &[Vec<f32>], params: &ReduceParams) -> Result<Vec<Vec2>> {
        if params.n_components != 2 {
            return Err(anyhow!(
                "random projection only produces 2 components, {} requested",
                params.n_components
            ));
        }

        let Some(first) = vectors.first() else {
            return Ok(Vec::new());
        };
        let dimensions = first.len();
        if dimensions == 0 {
            return Err(anyhow!("cannot project zero-dimensional vectors"));
        }
        if let Some(bad) = vectors.iter().find(|vector| vector.len() != dimensions) {
            return Err(anyhow!(
                "inconsistent embedding dimensionality: {} vs {dimensions}",
                bad.len()
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let axis_x: Vec<f32> = (0..dimensions).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let axis_y: Vec<f32> = (0..dimensions).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let scale = 1.0 / (dimensions as f32).sqrt();

        Ok(vectors
            .iter()
            .map(|vector| {
                let x: f32 = vector.iter().zip(&axis_x).map(|(v, a)| v * a).sum();
                let y: f32 = vector.iter().zip(&axis_y).map(|(v, a)| v * a).sum();
                vec2(x * scale, y * scale)
            })
            .collect())
    }
}
