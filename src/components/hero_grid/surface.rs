//! Immediate-mode drawing target.
//!
//! The renderer only ever talks to a [`Surface`]. The browser canvas context
//! implements it directly; [`RecordingSurface`] captures the command stream so
//! frames can be compared without a display.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A radial gradient with two colour stops, at offsets 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
	/// Centre x.
	pub cx: f64,
	/// Centre y.
	pub cy: f64,
	/// Radius of the inner stop.
	pub inner_radius: f64,
	/// Radius of the outer stop.
	pub outer_radius: f64,
	/// Colour at the inner radius.
	pub inner: Color,
	/// Colour at the outer radius.
	pub outer: Color,
}

/// 2-D path and fill primitives the hero grid draws with.
pub trait Surface {
	/// Erase the `width` x `height` area from the origin.
	fn clear(&mut self, width: f64, height: f64);
	/// Start a new path, discarding the current one.
	fn begin_path(&mut self);
	/// Start a sub-path at `(x, y)`.
	fn move_to(&mut self, x: f64, y: f64);
	/// Extend the current sub-path to `(x, y)`.
	fn line_to(&mut self, x: f64, y: f64);
	/// Full circle as a new sub-path.
	fn circle(&mut self, x: f64, y: f64, radius: f64);
	/// Stroke the current path.
	fn stroke(&mut self, color: Color, width: f64);
	/// Fill the current path.
	fn fill(&mut self, color: Color);
	/// Draw `text` with its baseline starting at `(x, y)`.
	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color);
	/// Fill the `width` x `height` area from the origin with `gradient`.
	fn fill_rect_gradient(&mut self, gradient: &RadialGradient, width: f64, height: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn begin_path(&mut self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		CanvasRenderingContext2d::move_to(self, x + radius, y);
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
	}

	fn stroke(&mut self, color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		CanvasRenderingContext2d::stroke(self);
	}

	fn fill(&mut self, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill(self);
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.set_font(font);
		self.set_fill_style_str(&color.to_css());
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn fill_rect_gradient(&mut self, g: &RadialGradient, width: f64, height: f64) {
		let Ok(gradient) =
			self.create_radial_gradient(g.cx, g.cy, g.inner_radius, g.cx, g.cy, g.outer_radius)
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &g.inner.to_css());
		let _ = gradient.add_color_stop(1.0, &g.outer.to_css());

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(0.0, 0.0, width, height);
	}
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs, reason = "variant fields mirror the Surface method arguments")]
pub enum DrawCommand {
	/// See [`Surface::clear`].
	Clear { width: f64, height: f64 },
	/// See [`Surface::begin_path`].
	BeginPath,
	/// See [`Surface::move_to`].
	MoveTo { x: f64, y: f64 },
	/// See [`Surface::line_to`].
	LineTo { x: f64, y: f64 },
	/// See [`Surface::circle`].
	Circle { x: f64, y: f64, radius: f64 },
	/// See [`Surface::stroke`].
	Stroke { color: Color, width: f64 },
	/// See [`Surface::fill`].
	Fill { color: Color },
	/// See [`Surface::fill_text`].
	Text { text: String, x: f64, y: f64, font: String, color: Color },
	/// See [`Surface::fill_rect_gradient`].
	Gradient { gradient: RadialGradient, width: f64, height: f64 },
}

/// Surface that records every call instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
	/// Commands in call order.
	pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
	/// Take the commands recorded so far, leaving the surface empty.
	pub fn take(&mut self) -> Vec<DrawCommand> {
		std::mem::take(&mut self.commands)
	}
}

impl Surface for RecordingSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.commands.push(DrawCommand::Clear { width, height });
	}

	fn begin_path(&mut self) {
		self.commands.push(DrawCommand::BeginPath);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.commands.push(DrawCommand::MoveTo { x, y });
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.commands.push(DrawCommand::LineTo { x, y });
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		self.commands.push(DrawCommand::Circle { x, y, radius });
	}

	fn stroke(&mut self, color: Color, width: f64) {
		self.commands.push(DrawCommand::Stroke { color, width });
	}

	fn fill(&mut self, color: Color) {
		self.commands.push(DrawCommand::Fill { color });
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.commands.push(DrawCommand::Text {
			text: text.to_string(),
			x,
			y,
			font: font.to_string(),
			color,
		});
	}

	fn fill_rect_gradient(&mut self, gradient: &RadialGradient, width: f64, height: f64) {
		self.commands.push(DrawCommand::Gradient {
			gradient: *gradient,
			width,
			height,
		});
	}
}
