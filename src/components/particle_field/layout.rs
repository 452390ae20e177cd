//! Deterministic particle placement.
//!
//! Each layer scatters its particles around a set of random cluster anchors,
//! using rejection sampling to keep same-depth particles apart. A single
//! seeded random stream is shared across the whole pass, so the draw order
//! below is part of the output contract:
//!
//! 1. Layers are visited by ascending `layer_depth`; empty layers draw nothing.
//! 2. Per layer: the cluster anchors (`x` then `y` per anchor).
//! 3. Per particle, per attempt: radius, horizontal offset, vertical offset.
//! 4. Per particle, once placed: the vertical parallax jitter.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::seed::derive_seed;
use super::theme::{Color, LayerConfig};

/// Placement attempts per particle before the last proposal is accepted as is.
pub const PLACEMENT_ATTEMPTS: usize = 7;

/// Half-width of the per-particle vertical parallax jitter.
const PARALLAX_Y_JITTER: f64 = 0.25;

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal position, growing rightwards
	pub x: f64,
	/// Vertical position, growing downwards
	pub y: f64,
}

impl Point {
	/// Point at (`x`, `y`).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// One placed backdrop disc. Fixed once generated.
///
/// Everything except `id`, `initial_center`, `radius` and `parallax_factor_y`
/// is copied from the owning layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Sequential across the whole generation pass.
	pub id: u32,
	/// Placement before any parallax shift.
	pub initial_center: Point,
	/// Disc radius, within the layer's radius range.
	pub radius: f64,
	/// Gradient center stop
	pub color: Color,
	/// Alpha of the gradient's outer stop
	pub edge_alpha: f64,
	/// Horizontal response to the progress offset.
	pub parallax_factor_x: f64,
	/// Layer multiplier scaled by this particle's own jitter.
	pub parallax_factor_y: f64,
	/// Owning layer's `max_parallax_shift`.
	pub max_parallax_shift: f64,
	/// Spacing group and draw order.
	pub layer_depth: i32,
}

/// Counters collected while generating a particle set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
	/// Particles placed in total.
	pub particles: usize,
	/// Layers that contributed at least one particle.
	pub layers: usize,
	/// Particles accepted without satisfying the spacing rule.
	pub fallbacks: usize,
}

/// Generate the particle set for a canvas. Empty when either side is not positive.
pub fn generate(width: f64, height: f64, layers: &[LayerConfig]) -> Vec<Particle> {
	generate_with_stats(width, height, layers).0
}

/// Like [`generate`], also reporting how placement went.
pub fn generate_with_stats(
	width: f64,
	height: f64,
	layers: &[LayerConfig],
) -> (Vec<Particle>, LayoutStats) {
	let mut stats = LayoutStats::default();
	if width <= 0.0 || height <= 0.0 {
		return (Vec::new(), stats);
	}

	let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(width, height, layers));

	let mut ordered: Vec<&LayerConfig> = layers.iter().collect();
	ordered.sort_by_key(|layer| layer.layer_depth);

	let total = ordered.iter().map(|layer| layer.particle_count).sum();
	let mut particles: Vec<Particle> = Vec::with_capacity(total);
	let mut next_id = 0u32;
	// Start of the run of particles sharing the current depth. Layers are
	// sorted, so equal depths are contiguous and space against each other.
	let mut depth_start = 0;

	for layer in ordered {
		if layer.particle_count == 0 {
			continue;
		}
		if particles
			.last()
			.is_some_and(|p| p.layer_depth != layer.layer_depth)
		{
			depth_start = particles.len();
		}
		let anchors = cluster_anchors(&mut rng, layer.number_of_clusters, width, height);

		for i in 0..layer.particle_count {
			let anchor = anchors[i % anchors.len()];
			let placement = place(
				&mut rng,
				layer,
				anchor,
				width,
				height,
				&particles[depth_start..],
			);
			if !placement.settled {
				stats.fallbacks += 1;
			}
			let jitter = rng.random::<f64>() * 2.0 * PARALLAX_Y_JITTER - PARALLAX_Y_JITTER;

			particles.push(Particle {
				id: next_id,
				initial_center: placement.center,
				radius: placement.radius,
				color: layer.center_color,
				edge_alpha: layer.edge_alpha,
				parallax_factor_x: layer.parallax_x_multiplier,
				parallax_factor_y: layer.parallax_y_multiplier * jitter,
				max_parallax_shift: layer.max_parallax_shift,
				layer_depth: layer.layer_depth,
			});
			next_id += 1;
		}
		stats.layers += 1;
	}

	stats.particles = particles.len();
	(particles, stats)
}

/// Anchor points for one layer. Without clusters, everything gathers around
/// the canvas center and no randomness is consumed.
pub fn cluster_anchors<R: Rng>(rng: &mut R, count: usize, width: f64, height: f64) -> Vec<Point> {
	if count == 0 {
		return vec![Point::new(width / 2.0, height / 2.0)];
	}
	(0..count)
		.map(|_| {
			let x = rng.random::<f64>() * width;
			let y = rng.random::<f64>() * height;
			Point::new(x, y)
		})
		.collect()
}

struct Placement {
	center: Point,
	radius: f64,
	settled: bool,
}

/// Rejection-sample a spot near `anchor` that keeps clear of `placed`, which
/// holds only the particles sharing this layer's depth. Gives up after
/// [`PLACEMENT_ATTEMPTS`] and keeps the last proposal.
fn place<R: Rng>(
	rng: &mut R,
	layer: &LayerConfig,
	anchor: Point,
	width: f64,
	height: f64,
	placed: &[Particle],
) -> Placement {
	let mut proposal = Placement {
		center: anchor,
		radius: layer.min_radius,
		settled: false,
	};

	for _ in 0..PLACEMENT_ATTEMPTS {
		let radius = layer.min_radius + rng.random::<f64>() * (layer.max_radius - layer.min_radius);
		let dx = signed_unit(rng) * layer.cluster_spread_factor * width;
		let dy = signed_unit(rng) * layer.cluster_spread_factor * height;
		let center = Point::new(anchor.x + dx, anchor.y + dy);

		let clear = placed.iter().all(|other| {
			center.distance(other.initial_center)
				>= (radius + other.radius) * layer.min_distance_factor
		});

		proposal = Placement {
			center,
			radius,
			settled: clear,
		};
		if clear {
			break;
		}
	}

	proposal
}

fn signed_unit<R: Rng>(rng: &mut R) -> f64 {
	rng.random::<f64>() * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::theme::default_layers;

	fn layer(depth: i32, count: usize) -> LayerConfig {
		LayerConfig {
			layer_depth: depth,
			particle_count: count,
			min_radius: 5.0,
			max_radius: 10.0,
			center_color: Color::WHITE.with_alpha(0.1),
			edge_alpha: 0.05,
			parallax_x_multiplier: -0.4,
			parallax_y_multiplier: -0.1,
			max_parallax_shift: 200.0,
			number_of_clusters: 3,
			cluster_spread_factor: 0.3,
			min_distance_factor: 0.5,
		}
	}

	fn spacing_violations(particles: &[Particle], min_distance_factor: f64) -> usize {
		let mut violations = 0;
		for (i, a) in particles.iter().enumerate() {
			for b in &particles[i + 1..] {
				if a.layer_depth == b.layer_depth
					&& a.initial_center.distance(b.initial_center)
						< (a.radius + b.radius) * min_distance_factor
				{
					violations += 1;
				}
			}
		}
		violations
	}

	#[test]
	fn generation_is_deterministic() {
		let layers = default_layers();
		let first = generate(1080.0, 1920.0, &layers);
		let second = generate(1080.0, 1920.0, &layers);
		assert!(!first.is_empty());
		assert_eq!(first, second);
	}

	#[test]
	fn different_canvas_gives_different_layout() {
		let layers = default_layers();
		let a = generate(1080.0, 1920.0, &layers);
		let b = generate(1080.0, 1921.0, &layers);
		assert_eq!(a.len(), b.len());
		assert_ne!(a, b);
	}

	#[test]
	fn each_layer_gets_exactly_its_count() {
		let layers = default_layers();
		let particles = generate(720.0, 1280.0, &layers);
		for l in &layers {
			let placed = particles
				.iter()
				.filter(|p| p.layer_depth == l.layer_depth)
				.count();
			assert_eq!(placed, l.particle_count);
		}
		assert_eq!(
			particles.len(),
			layers.iter().map(|l| l.particle_count).sum::<usize>()
		);
	}

	#[test]
	fn ids_are_sequential_in_depth_order() {
		let layers = vec![layer(3, 4), layer(0, 5), layer(1, 2)];
		let particles = generate(500.0, 500.0, &layers);
		let ids: Vec<u32> = particles.iter().map(|p| p.id).collect();
		assert_eq!(ids, (0..11).collect::<Vec<u32>>());
		let depths: Vec<i32> = particles.iter().map(|p| p.layer_depth).collect();
		assert!(depths.windows(2).all(|w| w[0] <= w[1]));
		assert_eq!(depths.first(), Some(&0));
		assert_eq!(depths.last(), Some(&3));
	}

	#[test]
	fn count_holds_under_heavy_contention() {
		let mut crowded = layer(0, 50);
		crowded.min_radius = 100.0;
		crowded.max_radius = 100.0;
		crowded.number_of_clusters = 1;
		crowded.cluster_spread_factor = 0.0;
		crowded.min_distance_factor = 1.0;

		let (particles, stats) = generate_with_stats(100.0, 100.0, &[crowded]);
		assert_eq!(particles.len(), 50);
		// Every particle after the first lands on the same anchor.
		assert_eq!(stats.fallbacks, 49);
		assert_eq!(stats.particles, 50);
	}

	#[test]
	fn spacing_holds_at_reasonable_density() {
		let config = layer(0, 10);
		let (particles, stats) = generate_with_stats(1000.0, 1000.0, &[config.clone()]);
		assert_eq!(particles.len(), 10);

		let pairs = 10 * 9 / 2;
		let violations = spacing_violations(&particles, config.min_distance_factor);
		assert!(violations * 20 <= pairs, "{violations} of {pairs} pairs too close");
		if stats.fallbacks == 0 {
			assert_eq!(violations, 0);
		}
	}

	#[test]
	fn settled_particles_never_violate_spacing() {
		let layers = default_layers();
		let (particles, stats) = generate_with_stats(1080.0, 1920.0, &layers);
		if stats.fallbacks == 0 {
			for l in &layers {
				let in_layer: Vec<Particle> = particles
					.iter()
					.filter(|p| p.layer_depth == l.layer_depth)
					.cloned()
					.collect();
				assert_eq!(spacing_violations(&in_layer, l.min_distance_factor), 0);
			}
		}
	}

	#[test]
	fn layers_do_not_repel_each_other() {
		let mut below = layer(0, 1);
		below.number_of_clusters = 0;
		below.cluster_spread_factor = 0.0;
		below.min_distance_factor = 1.0;
		let above = LayerConfig {
			layer_depth: 1,
			..below.clone()
		};

		let (particles, stats) = generate_with_stats(400.0, 300.0, &[below, above]);
		assert_eq!(particles.len(), 2);
		assert_eq!(stats.fallbacks, 0);
		for p in &particles {
			assert_eq!(p.initial_center, Point::new(200.0, 150.0));
		}
	}

	#[test]
	fn layers_sharing_a_depth_space_against_each_other() {
		let mut first = layer(2, 1);
		first.number_of_clusters = 0;
		first.cluster_spread_factor = 0.0;
		first.min_distance_factor = 1.0;
		let second = first.clone();

		let (particles, stats) = generate_with_stats(1000.0, 1000.0, &[first, second]);
		assert_eq!(particles.len(), 2);
		// Both land on the canvas center; the second only gets there by fallback.
		assert_eq!(stats.fallbacks, 1);
		assert_eq!(stats.layers, 2);
	}

	#[test]
	fn particles_keep_their_own_layer_shift() {
		let mut near = layer(2, 1);
		near.max_parallax_shift = 200.0;
		let far = LayerConfig {
			max_parallax_shift: 20.0,
			..near.clone()
		};

		let particles = generate(800.0, 800.0, &[near, far]);
		let shifts: Vec<f64> = particles.iter().map(|p| p.max_parallax_shift).collect();
		assert_eq!(shifts, vec![200.0, 20.0]);
	}

	#[test]
	fn empty_canvas_yields_nothing() {
		let (particles, stats) = generate_with_stats(0.0, 0.0, &default_layers());
		assert!(particles.is_empty());
		assert_eq!(stats, LayoutStats::default());
		assert!(generate(800.0, 0.0, &default_layers()).is_empty());
	}

	#[test]
	fn empty_layer_is_skipped() {
		let layers = vec![layer(0, 0), layer(1, 4)];
		let (particles, stats) = generate_with_stats(600.0, 600.0, &layers);
		assert_eq!(particles.len(), 4);
		assert_eq!(stats.layers, 1);
		assert!(particles.iter().all(|p| p.layer_depth == 1));
	}

	#[test]
	fn particle_fields_follow_their_layer() {
		let config = layer(2, 25);
		let particles = generate(900.0, 700.0, &[config.clone()]);
		for p in &particles {
			assert!(p.radius >= config.min_radius && p.radius <= config.max_radius);
			assert_eq!(p.color, config.center_color);
			assert_eq!(p.edge_alpha, config.edge_alpha);
			assert_eq!(p.parallax_factor_x, config.parallax_x_multiplier);
			assert_eq!(p.max_parallax_shift, config.max_parallax_shift);
			let jitter_bound = config.parallax_y_multiplier.abs() * PARALLAX_Y_JITTER;
			assert!(p.parallax_factor_y.abs() <= jitter_bound);
		}
	}

	#[test]
	fn offsets_stay_within_cluster_spread() {
		let mut config = layer(0, 30);
		config.number_of_clusters = 0;
		config.cluster_spread_factor = 0.1;
		let particles = generate(1000.0, 500.0, &[config]);
		for p in &particles {
			assert!((p.initial_center.x - 500.0).abs() <= 100.0);
			assert!((p.initial_center.y - 250.0).abs() <= 50.0);
		}
	}

	#[test]
	fn anchors_cover_the_canvas() {
		let mut rng = ChaCha8Rng::seed_from_u64(7);
		let anchors = cluster_anchors(&mut rng, 64, 320.0, 240.0);
		assert_eq!(anchors.len(), 64);
		for a in &anchors {
			assert!((0.0..320.0).contains(&a.x));
			assert!((0.0..240.0).contains(&a.y));
		}
		let center = cluster_anchors(&mut rng, 0, 320.0, 240.0);
		assert_eq!(center, vec![Point::new(160.0, 120.0)]);
	}

	#[test]
	fn particles_round_robin_over_anchors() {
		let mut config = layer(0, 6);
		config.number_of_clusters = 3;
		config.cluster_spread_factor = 0.0;
		config.min_distance_factor = 0.0;
		let particles = generate(1000.0, 1000.0, &[config]);
		for i in 0..3 {
			assert_eq!(
				particles[i].initial_center,
				particles[i + 3].initial_center
			);
		}
		assert_ne!(particles[0].initial_center, particles[1].initial_center);
	}
}
