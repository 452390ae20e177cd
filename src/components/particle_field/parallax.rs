//! Per-frame parallax compositing.
//!
//! Turns the stored particle set plus two scalar inputs into an ordered list
//! of gradient-disc draws. Nothing here mutates the particles.

use super::layout::{Particle, Point};
use super::theme::Color;

/// Fraction of a layer's maximum shift applied per unit of entry/exit offset.
pub const ENTRY_EXIT_SHIFT_RATIO: f64 = 0.01;

/// Scalar inputs sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxOffsets {
	/// Position within the paged sequence, roughly in [-0.5, 0.5].
	pub progress: f64,
	/// Screen transition phase; zero at rest.
	pub entry_exit: f64,
}

/// A single radial-gradient disc to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
	/// Displaced disc center
	pub center: Point,
	/// Outer edge of the gradient.
	pub radius: f64,
	/// Gradient color at the center.
	pub inner: Color,
	/// Gradient color at `radius`.
	pub outer: Color,
}

/// Where a particle appears for the given offsets.
///
/// The shift scale is the one the particle took from its own layer.
pub fn displaced_center(particle: &Particle, offsets: ParallaxOffsets) -> Point {
	let max_shift = particle.max_parallax_shift;
	let shift = offsets.progress * max_shift;
	Point::new(
		particle.initial_center.x + particle.parallax_factor_x * shift,
		particle.initial_center.y
			+ particle.parallax_factor_y * shift
			+ offsets.entry_exit * (max_shift * ENTRY_EXIT_SHIFT_RATIO),
	)
}

/// Build the frame's draw list, back layers first.
pub fn compose(particles: &[Particle], offsets: ParallaxOffsets) -> Vec<DrawCommand> {
	let mut ordered: Vec<&Particle> = particles.iter().collect();
	ordered.sort_by_key(|p| p.layer_depth);

	ordered
		.into_iter()
		.map(|p| DrawCommand {
			center: displaced_center(p, offsets),
			radius: p.radius,
			inner: p.color,
			outer: p.color.with_alpha(p.edge_alpha),
		})
		.collect()
}
