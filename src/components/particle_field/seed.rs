//! Reproducible seeds for particle layout.
//!
//! The seed is a hash over a textual description of the canvas size and every
//! layer field, so identical inputs lay out identically across re-renders and
//! page loads while any configuration or viewport change gives a new layout.

use std::fmt::Write;

use super::theme::LayerConfig;

const SEED_TAG: &str = "particle-field/v1";
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derive the layout seed for a canvas size and an ordered list of layers.
pub fn derive_seed(width: f64, height: f64, layers: &[LayerConfig]) -> u64 {
	fnv1a(FNV_OFFSET_BASIS, seed_key(width, height, layers).as_bytes())
}

/// Text hashed by [`derive_seed`]. Floats use shortest round-trip formatting,
/// which is identical on every platform.
fn seed_key(width: f64, height: f64, layers: &[LayerConfig]) -> String {
	let mut key = format!("{SEED_TAG}|{width}x{height}");
	for l in layers {
		let c = l.center_color;
		// Writing to a String cannot fail.
		let _ = write!(
			key,
			"|{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
			l.layer_depth,
			l.particle_count,
			l.min_radius,
			l.max_radius,
			c.r,
			c.g,
			c.b,
			c.a,
			l.edge_alpha,
			l.parallax_x_multiplier,
			l.parallax_y_multiplier,
			l.max_parallax_shift,
			l.number_of_clusters,
			l.cluster_spread_factor,
			l.min_distance_factor,
		);
	}
	key
}

fn fnv1a(mut state: u64, bytes: &[u8]) -> u64 {
	for byte in bytes {
		state ^= u64::from(*byte);
		state = state.wrapping_mul(FNV_PRIME);
	}
	state
}
