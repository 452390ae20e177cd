//! Canvas rendering for the particle backdrop.
//!
//! Paints the background fill, then every draw command in order so later
//! (higher-depth) discs cover earlier ones.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::parallax::DrawCommand;
use super::theme::BackgroundStyle;

/// Renders one frame to the canvas.
pub fn render(
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	background: &BackgroundStyle,
	commands: &[DrawCommand],
) -> Result<(), JsValue> {
	draw_background(ctx, width, height, background)?;
	for command in commands {
		draw_disc(ctx, command)?;
	}
	Ok(())
}

fn draw_background(
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	background: &BackgroundStyle,
) -> Result<(), JsValue> {
	if background.use_gradient {
		let gradient = ctx.create_radial_gradient(
			width / 2.0,
			height / 2.0,
			0.0,
			width / 2.0,
			height / 2.0,
			width.max(height) * 0.8,
		)?;
		gradient.add_color_stop(0.0, &background.color_secondary.to_css())?;
		gradient.add_color_stop(1.0, &background.color.to_css())?;

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, width, height);
	Ok(())
}

fn draw_disc(ctx: &CanvasRenderingContext2d, command: &DrawCommand) -> Result<(), JsValue> {
	let DrawCommand {
		center,
		radius,
		inner,
		outer,
	} = *command;

	let gradient = ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)?;
	gradient.add_color_stop(0.0, &inner.to_css())?;
	gradient.add_color_stop(1.0, &outer.to_css())?;

	ctx.begin_path();
	ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
	Ok(())
}
