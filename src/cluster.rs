use eframe::egui::Vec2;
use rand::Rng;

use crate::similarity::normalize_or_keep;

pub const MAX_ITERATIONS: usize = 400;

/// One cluster id per input point plus the final unit centroids.
#[derive(Clone, Debug)]
pub struct Clustering {
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec2>,
}

impl Clustering {
    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }
}

/// Cosine k-means over 2-D points. Points are unit-normalized before
/// comparison; zero vectors stay as-is. Initial centroids are distinct input
/// points drawn from the injected RNG, so runs are reproducible under a
/// seeded generator.
pub fn cluster_points<R: Rng + ?Sized>(
    points: &[Vec2],
    max_groups: usize,
    rng: &mut R,
) -> Clustering {
    let n = points.len();
    if n == 0 {
        return Clustering {
            assignments: Vec::new(),
            centroids: Vec::new(),
        };
    }

    let cluster_count = max_groups.clamp(1, n);
    let normalized: Vec<Vec2> = points.iter().map(|p| normalize_or_keep(*p)).collect();

    let mut centroids: Vec<Vec2> = rand::seq::index::sample(rng, n, cluster_count)
        .iter()
        .map(|index| normalized[index])
        .collect();
    let mut assignments = vec![usize::MAX; n];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;

        // Assignment: highest dot product wins, ties to the lowest index.
        for (index, point) in normalized.iter().enumerate() {
            let mut best_similarity = f32::NEG_INFINITY;
            let mut best_cluster = 0;
            for (cluster, centroid) in centroids.iter().enumerate() {
                let dot = point.dot(*centroid);
                if dot > best_similarity {
                    best_similarity = dot;
                    best_cluster = cluster;
                }
            }
            if assignments[index] != best_cluster {
                assignments[index] = best_cluster;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        // Update: mean of members, re-normalized; empty clusters keep their
        // previous centroid.
        let mut sums = vec![Vec2::ZERO; cluster_count];
        let mut counts = vec![0usize; cluster_count];
        for (index, point) in normalized.iter().enumerate() {
            sums[assignments[index]] += *point;
            counts[assignments[index]] += 1;
        }
        for cluster in 0..cluster_count {
            if counts[cluster] == 0 {
                continue;
            }
            let mean = sums[cluster] / counts[cluster] as f32;
            centroids[cluster] = normalize_or_keep(mean);
        }
    }

    Clustering {
        assignments,
        centroids,
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn sample_points() -> Vec<Vec2> {
        vec![
            vec2(100.0, 10.0),
            vec2(120.0, -5.0),
            vec2(-80.0, 90.0),
            vec2(-90.0, 100.0),
            vec2(5.0, -130.0),
            vec2(0.0, 0.0),
        ]
    }

    #[test]
    fn every_point_gets_exactly_one_assignment_in_range() {
        let points = sample_points();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let clustering = cluster_points(&points, 3, &mut rng);

        assert_eq!(clustering.assignments.len(), points.len());
        assert_eq!(clustering.cluster_count(), 3);
        for assignment in &clustering.assignments {
            assert!(*assignment < 3);
        }
    }

    #[test]
    fn cluster_count_is_clamped_to_point_count() {
        let points = vec![vec2(1.0, 0.0), vec2(0.0, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let clustering = cluster_points(&points, 15, &mut rng);

        assert_eq!(clustering.cluster_count(), 2);
        for assignment in &clustering.assignments {
            assert!(*assignment < 2);
        }
    }

    #[test]
    fn zero_max_groups_still_yields_one_cluster() {
        let points = sample_points();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let clustering = cluster_points(&points, 0, &mut rng);

        assert_eq!(clustering.cluster_count(), 1);
        assert!(clustering.assignments.iter().all(|a| *a == 0));
    }

    #[test]
    fn single_point_is_its_own_cluster() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let clustering = cluster_points(&[vec2(3.0, 4.0)], 15, &mut rng);

        assert_eq!(clustering.assignments, vec![0]);
        assert_eq!(clustering.cluster_count(), 1);
    }

    #[test]
    fn empty_input_yields_empty_clustering() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let clustering = cluster_points(&[], 15, &mut rng);
        assert!(clustering.assignments.is_empty());
        assert!(clustering.centroids.is_empty());
    }

    #[test]
    fn identical_seed_reproduces_assignments() {
        let points = sample_points();
        let first = cluster_points(&points, 3, &mut ChaCha8Rng::seed_from_u64(9));
        let second = cluster_points(&points, 3, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(first.assignments, second.assignments);
    }

    #[test]
    fn opposite_directions_end_up_in_different_clusters() {
        // With two points and two clusters, both points seed the centroids,
        // so antipodal directions must separate regardless of draw order.
        let points = vec![vec2(100.0, 0.0), vec2(-100.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let clustering = cluster_points(&points, 2, &mut rng);

        assert_ne!(clustering.assignments[0], clustering.assignments[1]);
    }

    #[test]
    fn centroids_are_unit_length_or_zero() {
        let points = sample_points();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let clustering = cluster_points(&points, 3, &mut rng);

        for centroid in &clustering.centroids {
            let len = centroid.length();
            assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
        }
    }
}
