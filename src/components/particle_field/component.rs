//! Leptos component wrapping the particle backdrop canvas.
//!
//! The component creates an HTML canvas behind its children, generates the
//! particle field once the canvas has a size, and redraws it every frame via
//! `requestAnimationFrame` with the current progress and transition offsets.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::motion::EntryExitTransition;
use super::parallax::ParallaxOffsets;
use super::render;
use super::state::ParticleFieldState;
use super::theme::{BackgroundStyle, LayerConfig};

/// Entry/exit magnitude while active, as a fraction of the canvas height.
const ENTRY_EXIT_HEIGHT_RATIO: f64 = 0.01;

/// Bundles the particle field with its per-frame animation state.
struct BackdropContext {
	ctx: CanvasRenderingContext2d,
	state: ParticleFieldState,
	background: BackgroundStyle,
	transition: EntryExitTransition,
	last_frame_ms: Option<f64>,
}

impl BackdropContext {
	fn frame(&mut self, now_ms: f64, progress: f64, active: bool) -> ParallaxOffsets {
		let dt = self
			.last_frame_ms
			.map(|last| (now_ms - last) / 1000.0)
			.unwrap_or(0.0);
		self.last_frame_ms = Some(now_ms);

		if active {
			let (_, height) = self.state.size();
			self.transition.enter(height * ENTRY_EXIT_HEIGHT_RATIO);
		} else {
			self.transition.exit();
		}
		self.transition.tick(dt);

		ParallaxOffsets {
			progress,
			entry_exit: self.transition.value(),
		}
	}
}

/// Stop switch for the animation loop, flipped when the component unmounts.
#[derive(Clone, Debug, Default)]
struct FrameLoop {
	stopped: Arc<AtomicBool>,
}

impl FrameLoop {
	fn stop(&self) {
		self.stopped.store(true, Ordering::Relaxed);
	}

	/// Inputs for the next frame, or `None` once the loop has to end because
	/// it was stopped or its signals were disposed.
	fn inputs(&self, progress: Signal<f64>, active: Signal<bool>) -> Option<(f64, bool)> {
		if self.stopped.load(Ordering::Relaxed) {
			return None;
		}
		Some((progress.try_get_untracked()?, active.try_get_untracked()?))
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Renders the layered particle backdrop with `children` drawn on top.
///
/// `progress` is the parallax progress offset (see
/// [`progress_offset`](super::motion::progress_offset)); `active` eases the
/// entry/exit shift in and out. The backdrop sizes itself to its parent by
/// default; `fullscreen = true` fills the viewport and follows window
/// resizes. Explicit `width`/`height` override automatic sizing. Unmounting
/// stops the frame loop and removes the resize listener.
#[component]
pub fn ParticleBackdrop(
	#[prop(into)] layers: Signal<Vec<LayerConfig>>,
	#[prop(into)] progress: Signal<f64>,
	#[prop(into)] active: Signal<bool>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<BackdropContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let frame_loop = FrameLoop::default();
	let frame_loop_cleanup = frame_loop.clone();
	on_cleanup(move || frame_loop_cleanup.stop());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-backdrop: no window, backdrop disabled");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((0.0, 0.0))
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.unwrap_or(0.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.unwrap_or(0.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("particle-backdrop: 2d context unavailable");
				return;
			}
		};

		let mut state = ParticleFieldState::new(layers.get_untracked());
		state.resize(w, h);
		*context_init.borrow_mut() = Some(BackdropContext {
			ctx,
			state,
			background: BackgroundStyle::default(),
			transition: EntryExitTransition::default(),
			last_frame_ms: None,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, resize_cb_anim) =
			(context_init.clone(), animate_init.clone(), resize_cb_init.clone());
		let frame_loop = frame_loop.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some((progress, active)) = frame_loop.inputs(progress, active) else {
				// Unmounted: detach from the window and stop rescheduling.
				let resize = resize_cb_anim.borrow_mut().take();
				if let (Some(win), Some(cb)) = (web_sys::window(), resize) {
					let _ =
						win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				context_anim.borrow_mut().take();
				debug!("particle-backdrop: animation loop stopped");
				return;
			};
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let offsets = c.frame(js_sys::Date::now(), progress, active);
				let (w, h) = c.state.size();
				let commands = c.state.frame(offsets);
				if let Err(e) = render::render(&c.ctx, w, h, &c.background, &commands) {
					warn!("particle-backdrop: render failed: {:?}", e);
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_layers = context.clone();
	Effect::new(move |_| {
		let layers = layers.get();
		if let Some(ref mut c) = *context_layers.borrow_mut() {
			c.state.set_layers(layers);
		}
	});

	view! {
		<div class="particle-backdrop" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="particle-backdrop-canvas"
				style="position: absolute; inset: 0; display: block;"
			/>
			<div class="particle-backdrop-content" style="position: relative; height: 100%;">
				{children.map(|children| children())}
			</div>
		</div>
	}
}
