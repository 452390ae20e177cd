//! Visual configuration for the particle backdrop.
//!
//! Provides the RGBA color type, per-layer particle configuration, and the
//! background fill painted underneath the particles.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	/// Red channel (0-255)
	pub r: u8,
	/// Green channel (0-255)
	pub g: u8,
	/// Blue channel (0-255)
	pub b: u8,
	/// Alpha (0.0-1.0); opaque when omitted from JSON.
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same RGB with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// One population of backdrop particles sharing placement and parallax rules.
///
/// Lengths (`min_radius`, `max_radius`, `max_parallax_shift`) are in canvas
/// units. Values are trusted as given: `min_radius <= max_radius` and the
/// non-negative counts are the caller's responsibility.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LayerConfig {
	/// Ordering key for placement and drawing. Higher depths draw on top.
	pub layer_depth: i32,
	/// Exact number of particles placed in this layer.
	pub particle_count: usize,
	/// Smallest particle radius.
	pub min_radius: f64,
	/// Largest particle radius.
	pub max_radius: f64,
	/// Gradient center stop.
	pub center_color: Color,
	/// Alpha of the gradient's outer stop (same RGB as `center_color`).
	pub edge_alpha: f64,
	/// Horizontal response to the progress offset.
	pub parallax_x_multiplier: f64,
	/// Vertical response to the progress offset, jittered per particle.
	pub parallax_y_multiplier: f64,
	/// Largest displacement parallax may cause for this layer.
	pub max_parallax_shift: f64,
	/// Cluster anchors to scatter around. Zero scatters around the canvas center.
	pub number_of_clusters: usize,
	/// How far from its anchor a particle may land, as a fraction of the canvas size.
	pub cluster_spread_factor: f64,
	/// Minimum same-depth center distance as a fraction of the two radii summed.
	pub min_distance_factor: f64,
}

/// The four layers used behind the questionnaire and result screens.
///
/// Depth 0 is a handful of large, nearly transparent blobs that barely move;
/// each following layer is smaller, brighter and more responsive to parallax.
pub fn default_layers() -> Vec<LayerConfig> {
	vec![
		LayerConfig {
			layer_depth: 0,
			particle_count: 30,
			min_radius: 100.0,
			max_radius: 200.0,
			center_color: Color::WHITE.with_alpha(0.03),
			edge_alpha: 0.0,
			parallax_x_multiplier: 0.0,
			parallax_y_multiplier: 0.0,
			max_parallax_shift: 50.0,
			number_of_clusters: 5,
			cluster_spread_factor: 0.5,
			min_distance_factor: 0.1,
		},
		LayerConfig {
			layer_depth: 1,
			particle_count: 100,
			min_radius: 30.0,
			max_radius: 50.0,
			center_color: Color::WHITE.with_alpha(0.07),
			edge_alpha: 0.02,
			parallax_x_multiplier: -0.1,
			parallax_y_multiplier: -0.05,
			max_parallax_shift: 150.0,
			number_of_clusters: 10,
			cluster_spread_factor: 0.2,
			min_distance_factor: 0.2,
		},
		LayerConfig {
			layer_depth: 2,
			particle_count: 70,
			min_radius: 5.0,
			max_radius: 30.0,
			center_color: Color::WHITE.with_alpha(0.08),
			edge_alpha: 0.07,
			parallax_x_multiplier: -0.4,
			parallax_y_multiplier: -0.1,
			max_parallax_shift: 200.0,
			number_of_clusters: 10,
			cluster_spread_factor: 0.1,
			min_distance_factor: 0.25,
		},
		LayerConfig {
			layer_depth: 3,
			particle_count: 70,
			min_radius: 5.0,
			max_radius: 30.0,
			center_color: Color::WHITE.with_alpha(0.1),
			edge_alpha: 0.07,
			parallax_x_multiplier: -0.7,
			parallax_y_multiplier: -0.3,
			max_parallax_shift: 200.0,
			number_of_clusters: 10,
			cluster_spread_factor: 0.05,
			min_distance_factor: 0.1,
		},
	]
}

/// Background fill painted before any particle.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Center color when the gradient is enabled
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

impl Default for BackgroundStyle {
	fn default() -> Self {
		Self {
			color: Color::rgb(76, 46, 98),
			color_secondary: Color::rgb(92, 58, 116),
			use_gradient: true,
		}
	}
}
