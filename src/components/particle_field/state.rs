//! Particle set lifecycle.
//!
//! Holds the layer configuration, the last measured canvas size and the
//! generated particles. The set is empty until a usable size is known and is
//! rebuilt from scratch whenever the size or the layers change; in between,
//! frames only read it.

use log::debug;

use super::layout::{Particle, generate_with_stats};
use super::parallax::{DrawCommand, ParallaxOffsets, compose};
use super::theme::LayerConfig;

/// Backdrop state owned by the canvas component.
///
/// Created when the component mounts, then updated on resize and layer
/// changes. `frame` is called once per animation frame.
#[derive(Clone, Debug, Default)]
pub struct ParticleFieldState {
	layers: Vec<LayerConfig>,
	width: f64,
	height: f64,
	particles: Vec<Particle>,
	generation: u64,
}

impl ParticleFieldState {
	/// Unmeasured state for `layers`; no particles until the first resize.
	pub fn new(layers: Vec<LayerConfig>) -> Self {
		Self {
			layers,
			..Self::default()
		}
	}

	/// Record a canvas measurement. Returns whether the particles were rebuilt.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if self.width == width && self.height == height {
			return false;
		}
		self.width = width;
		self.height = height;
		self.regenerate();
		true
	}

	/// Swap in a new layer list. Returns whether the particles were rebuilt.
	pub fn set_layers(&mut self, layers: Vec<LayerConfig>) -> bool {
		if self.layers == layers {
			return false;
		}
		self.layers = layers;
		self.regenerate();
		true
	}

	/// Current particle set, in generation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Layers the set was generated from.
	pub fn layers(&self) -> &[LayerConfig] {
		&self.layers
	}

	/// Last measured canvas size as `(width, height)`.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Number of times the particle set has been rebuilt.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Draw list for the current frame.
	pub fn frame(&self, offsets: ParallaxOffsets) -> Vec<DrawCommand> {
		compose(&self.particles, offsets)
	}

	fn regenerate(&mut self) {
		let (particles, stats) = generate_with_stats(self.width, self.height, &self.layers);
		self.particles = particles;
		self.generation += 1;
		debug!(
			"particle-field: generation {} at {}x{}: {} particles in {} layers, {} fallbacks",
			self.generation,
			self.width,
			self.height,
			stats.particles,
			stats.layers,
			stats.fallbacks
		);
	}
}
