//! Seeded synthetic object sets for tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::features::Graph;

/// A batch of object sets sharing one feature dimension.
#[derive(Debug, Clone)]
pub struct ObjectSets {
    /// Flat row-major feature values, one `Vec` per object set.
    pub objects: Vec<Vec<f32>>,
    /// Feature values per point.
    pub num_features: usize,
}

/// Uniform random object sets in `[0, 1]^f`.
///
/// A baseline workload; real feature data usually clusters, which
/// [`clustered_objects`] models better.
#[must_use]
pub fn random_objects(
    num_objects: usize,
    points_per_object: usize,
    num_features: usize,
    seed: u64,
) -> ObjectSets {
    let mut rng = StdRng::seed_from_u64(seed);
    let objects = (0..num_objects)
        .map(|_| {
            (0..points_per_object * num_features)
                .map(|_| rng.random::<f32>())
                .collect()
        })
        .collect();
    ObjectSets {
        objects,
        num_features,
    }
}

/// Object sets whose points cluster around a per-object centre.
///
/// Gaussian offsets via Box–Muller, clamped into the unit cube; small
/// `spread` values give dense neighbourhood graphs within an object and
/// meaningful overlap between objects with nearby centres.
#[must_use]
pub fn clustered_objects(
    num_objects: usize,
    points_per_object: usize,
    num_features: usize,
    spread: f32,
    seed: u64,
) -> ObjectSets {
    let mut rng = StdRng::seed_from_u64(seed);

    let sample_gaussian = |rng: &mut StdRng| -> f32 {
        let u1: f32 = rng.random::<f32>().max(1e-7);
        let u2: f32 = rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
    };

    let objects = (0..num_objects)
        .map(|_| {
            let centre: Vec<f32> = (0..num_features).map(|_| rng.random::<f32>()).collect();
            let mut features = Vec::with_capacity(points_per_object * num_features);
            for _ in 0..points_per_object {
                for &c in &centre {
                    let z = sample_gaussian(&mut rng);
                    features.push((c + z * spread).clamp(0.0, 1.0));
                }
            }
            features
        })
        .collect();
    ObjectSets {
        objects,
        num_features,
    }
}

/// Random neighbourhood graph with the given edge probability.
///
/// Bypasses feature space entirely; handy for exercising the enumerators
/// on topologies a distance threshold would rarely produce.
#[must_use]
pub fn random_graph(n: usize, density: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_vertices(n).expect("test graphs fit the universe");
    for i in 0..n {
        for j in i + 1..n {
            if rng.random::<f64>() < density {
                graph.add_edge(i, j);
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = random_objects(3, 4, 2, 7);
        let b = random_objects(3, 4, 2, 7);
        assert_eq!(a.objects, b.objects);
        let c = random_objects(3, 4, 2, 8);
        assert_ne!(a.objects, c.objects);
    }

    #[test]
    fn objects_have_the_requested_shape() {
        let sets = clustered_objects(5, 6, 3, 0.05, 42);
        assert_eq!(sets.objects.len(), 5);
        for object in &sets.objects {
            assert_eq!(object.len(), 6 * 3);
            assert!(object.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn random_graph_density_extremes() {
        assert_eq!(random_graph(6, 0.0, 1).edge_count(), 0);
        assert_eq!(random_graph(6, 1.0, 1).edge_count(), 15);
    }
}
