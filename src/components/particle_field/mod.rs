//! Layered particle backdrop.
//!
//! Draws softly glowing discs behind a screen's content:
//! - Deterministic layout from the canvas size and layer configuration
//! - Clustered placement with same-depth spacing via rejection sampling
//! - Per-layer parallax driven by page progress and an entry/exit transition
//! - Radial-gradient discs composited back to front on an HTML canvas
//!
//! # Example
//!
//! ```ignore
//! use parallax_backdrop::components::particle_field::{ParticleBackdrop, default_layers};
//!
//! let page = RwSignal::new(0usize);
//! let progress = Signal::derive(move || progress_offset(page.get() as f64, 10));
//!
//! view! {
//!     <ParticleBackdrop layers=Signal::stored(default_layers()) progress=progress active=true fullscreen=true>
//!         <QuestionPage page=page />
//!     </ParticleBackdrop>
//! }
//! ```

mod component;
pub mod layout;
pub mod motion;
pub mod parallax;
mod render;
pub mod seed;
pub mod state;
pub mod theme;

pub use component::ParticleBackdrop;
pub use layout::{Particle, Point, generate};
pub use motion::{EntryExitTransition, progress_offset};
pub use parallax::{DrawCommand, ParallaxOffsets, compose};
pub use state::ParticleFieldState;
pub use theme::{BackgroundStyle, Color, LayerConfig, default_layers};
