//! parallax-backdrop: Layered particle backdrop for paged screens.
//!
//! This crate provides a WASM canvas component that lays out clustered,
//! softly glowing particles deterministically and shifts each layer with
//! parallax as the user moves through a paged questionnaire.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	LayerConfig, ParticleBackdrop, ParticleFieldState, default_layers, progress_offset,
};

/// Questions shown by the demo questionnaire.
const QUESTIONS: &[&str] = &[
	"How old are you?",
	"How many years of formal education have you completed?",
	"Do you have a history of high blood pressure?",
	"How many hours of physical activity do you get per week?",
	"Do you smoke, or have you smoked in the past?",
	"How would you rate your sleep quality?",
	"Has anyone in your close family been diagnosed with dementia?",
];

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("parallax-backdrop: logging initialized");
}

/// Load layer configuration from a script element with id="backdrop-layers".
/// Expected format: a JSON array of [`LayerConfig`] objects.
pub fn load_layer_config() -> Option<Vec<LayerConfig>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("backdrop-layers")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<Vec<LayerConfig>>(&json_text) {
		Ok(layers) => {
			info!("parallax-backdrop: loaded {} layers", layers.len());
			Some(layers)
		}
		Err(e) => {
			warn!("parallax-backdrop: failed to parse layer config: {}", e);
			None
		}
	}
}

/// Main application component.
/// A paged questionnaire whose backdrop follows the current question and
/// eases out once it is finished.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Page-supplied layers win over the built-in set
	let layers = load_layer_config().unwrap_or_else(default_layers);
	let layers_signal = Signal::derive(move || layers.clone());

	let last = QUESTIONS.len() - 1;
	let page = RwSignal::new(0usize);
	let active = RwSignal::new(true);
	let progress = Signal::derive(move || progress_offset(page.get() as f64, QUESTIONS.len()));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Questionnaire" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackdrop layers=layers_signal progress=progress active=active fullscreen=true>
			<main class="questionnaire">
				<p class="question-count">
					{move || format!("Question {} of {}", page.get() + 1, QUESTIONS.len())}
				</p>
				<h1>{move || QUESTIONS.get(page.get()).copied().unwrap_or_default()}</h1>
				<nav class="questionnaire-nav">
					<button
						disabled=move || page.get() == 0 || !active.get()
						on:click=move |_| page.update(|p| *p = p.saturating_sub(1))
					>
						"Previous"
					</button>
					<button
						disabled=move || !active.get()
						on:click=move |_| {
							if page.get_untracked() >= last {
								active.set(false);
							} else {
								page.update(|p| *p += 1);
							}
						}
					>
						{move || if page.get() >= last { "Finish" } else { "Next" }}
					</button>
				</nav>
			</main>
		</ParticleBackdrop>
	}
}
