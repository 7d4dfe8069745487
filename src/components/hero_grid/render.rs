//! Frame rendering for the hero grid.
//!
//! Draw order, back to front:
//! 1. Grid lines (one batched stroke) and node dots (one batched fill)
//! 2. Per signal: fading trail segments, the lit part of the current edge, the head
//! 3. Value popups
//! 4. Vignette over the whole frame

use super::config::GridConfig;
use super::grid::Grid;
use super::popups::PopupField;
use super::signals::Signal;
use super::state::HeroGridState;
use super::surface::{RadialGradient, Surface};
use super::theme::Theme;

/// Renders the complete frame. Never mutates the simulation.
pub fn render<S: Surface + ?Sized>(state: &HeroGridState, surface: &mut S, theme: &Theme) {
	let config = state.config();
	surface.clear(state.width, state.height);

	draw_grid(state.grid(), surface, config, theme);
	for sig in state.signals() {
		draw_signal(sig, state.grid(), surface, config, theme);
	}
	draw_popups(state.popups(), surface, config, theme);
	draw_vignette(state.width, state.height, surface, config, theme);
}

fn draw_grid<S: Surface + ?Sized>(grid: &Grid, surface: &mut S, config: &GridConfig, theme: &Theme) {
	surface.begin_path();
	for (a, b) in grid.edges() {
		surface.move_to(a.x, a.y);
		surface.line_to(b.x, b.y);
	}
	surface.stroke(theme.line.with_alpha(config.line_opacity), config.line_width);

	surface.begin_path();
	for (_, p) in grid.nodes() {
		surface.circle(p.x, p.y, config.dot_radius);
	}
	surface.fill(theme.dot.with_alpha(config.dot_opacity));
}

fn draw_signal<S: Surface + ?Sized>(
	sig: &Signal,
	grid: &Grid,
	surface: &mut S,
	config: &GridConfig,
	theme: &Theme,
) {
	let (Some(from), Some(head)) = (grid.node(sig.pos), sig.head(grid)) else {
		return;
	};

	for seg in &sig.trail {
		let alpha = seg.alpha(config.trail_opacity, config.trail_fade_time);
		if alpha <= 0.0 {
			continue;
		}
		let (Some(a), Some(b)) = (grid.node(seg.from), grid.node(seg.to)) else {
			continue;
		};
		surface.begin_path();
		surface.move_to(a.x, a.y);
		surface.line_to(b.x, b.y);
		surface.stroke(theme.signal.with_alpha(alpha), config.trail_width);
	}

	// Lit part of the current edge, node to head.
	surface.begin_path();
	surface.move_to(from.x, from.y);
	surface.line_to(head.x, head.y);
	surface.stroke(
		theme.signal.with_alpha(config.trail_opacity),
		config.trail_width,
	);

	surface.begin_path();
	surface.circle(head.x, head.y, config.signal_radius);
	surface.fill(theme.signal.with_alpha(config.signal_opacity));
}

fn draw_popups<S: Surface + ?Sized>(
	popups: &PopupField,
	surface: &mut S,
	config: &GridConfig,
	theme: &Theme,
) {
	for popup in popups.iter() {
		let alpha = popup.alpha(config);
		if alpha <= 0.0 {
			continue;
		}
		let at = popup.text_origin(config);
		surface.fill_text(
			&popup.label,
			at.x,
			at.y,
			&config.popup_font,
			theme.popup.with_alpha(alpha),
		);
	}
}

fn draw_vignette<S: Surface + ?Sized>(
	width: f64,
	height: f64,
	surface: &mut S,
	config: &GridConfig,
	theme: &Theme,
) {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let max_r = cx.hypot(cy);
	let gradient = RadialGradient {
		cx,
		cy,
		inner_radius: max_r * config.vignette_start,
		outer_radius: max_r,
		inner: theme.vignette.with_alpha(0.0),
		outer: theme.vignette.with_alpha(theme.vignette_alpha),
	};
	surface.fill_rect_gradient(&gradient, width, height);
}
