//! Simulation state for the hero grid.
//!
//! Owns the lattice, the signal population, the popups and the random source.
//! Created once when the component mounts, rebuilt on (debounced) resize, and
//! advanced each frame by the animation loop.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::GridConfig;
use super::grid::{Grid, Zone};
use super::popups::PopupField;
use super::render;
use super::signals::{Hop, Signal};
use super::surface::Surface;
use super::theme::Theme;

/// Core simulation state: grid, signals, popups and the seeded RNG.
pub struct HeroGridState {
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	config: GridConfig,
	zone: Option<Zone>,
	grid: Grid,
	signals: Vec<Signal>,
	popups: PopupField,
	rng: SmallRng,
}

impl HeroGridState {
	/// Lay out the grid for a `width` x `height` canvas and spawn the initial
	/// signal population.
	pub fn new(config: GridConfig, width: f64, height: f64, zone: Option<Zone>, seed: u64) -> Self {
		let mut state = Self {
			width,
			height,
			config,
			zone,
			grid: Grid::default(),
			signals: Vec::new(),
			popups: PopupField::default(),
			rng: SmallRng::seed_from_u64(seed),
		};
		state.regenerate();
		state
	}

	/// Adopt a new canvas size and zone. Always a full rebuild: every signal
	/// and popup is discarded and the population respawned.
	pub fn resize(&mut self, width: f64, height: f64, zone: Option<Zone>) {
		self.width = width;
		self.height = height;
		self.zone = zone;
		self.regenerate();
	}

	fn regenerate(&mut self) {
		self.grid = Grid::build(
			self.width,
			self.height,
			self.config.spacing(),
			self.zone.as_ref(),
		);
		self.signals.clear();
		self.popups.clear();

		for _ in 0..self.config.signal_count {
			if let Some(sig) = Signal::spawn(&self.grid, &self.config, &mut self.rng) {
				self.signals.push(sig);
			}
		}

		debug!(
			"hero-grid: regenerated {}x{} grid ({} nodes), {} of {} signals",
			self.grid.rows(),
			self.grid.cols(),
			self.grid.node_count(),
			self.signals.len(),
			self.config.signal_count
		);
	}

	/// Advance the simulation by `dt` seconds.
	///
	/// Trails and popups age first, then every signal steps in order. The
	/// population is then topped up with one spawn attempt per missing signal,
	/// so a failed attempt is retried on the next frame.
	pub fn advance(&mut self, dt: f64) {
		let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
		let Self {
			config,
			grid,
			signals,
			popups,
			rng,
			..
		} = self;

		popups.advance(dt, config.popup_duration);

		signals.retain_mut(|sig| {
			sig.age_trail(dt, config.trail_fade_time);
			sig.step(dt, grid, config, rng, popups) != Hop::Retired
		});

		for _ in signals.len()..config.signal_count {
			if let Some(sig) = Signal::spawn(grid, config, rng) {
				signals.push(sig);
			}
		}
	}

	/// Draw the current state. Read-only; calling it repeatedly without
	/// [`advance`](Self::advance) produces identical frames.
	pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, theme: &Theme) {
		render::render(self, surface, theme);
	}

	/// Active configuration.
	pub fn config(&self) -> &GridConfig {
		&self.config
	}

	/// Exclusion zone of the current layout, if any.
	pub fn zone(&self) -> Option<&Zone> {
		self.zone.as_ref()
	}

	/// Current lattice.
	pub fn grid(&self) -> &Grid {
		&self.grid
	}

	/// Live signals, in step order.
	pub fn signals(&self) -> &[Signal] {
		&self.signals
	}

	/// Live popups.
	pub fn popups(&self) -> &PopupField {
		&self.popups
	}

	#[cfg(test)]
	pub(crate) fn insert_signal(&mut self, sig: Signal) {
		self.signals.push(sig);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hero_grid::grid::Rect;

	#[test]
	fn starts_with_full_population() {
		let state = HeroGridState::new(GridConfig::default(), 800.0, 600.0, None, 11);
		assert_eq!(state.signals().len(), 24);
		assert!(state.popups().is_empty());
	}

	#[test]
	fn population_is_constant_across_frames() {
		let mut state = HeroGridState::new(GridConfig::default(), 800.0, 600.0, None, 12);
		for _ in 0..2_000 {
			state.advance(1.0 / 60.0);
			assert_eq!(state.signals().len(), 24);
			assert!(state.popups().len() <= state.config().popup_max_active);
		}
	}

	#[test]
	fn resize_rebuilds_everything() {
		let mut state = HeroGridState::new(GridConfig::default(), 520.0, 520.0, None, 13);
		for _ in 0..300 {
			state.advance(0.05);
		}
		let zone = Zone {
			rect: Rect::new(100.0, 100.0, 200.0, 100.0),
		};
		state.resize(1040.0, 520.0, Some(zone));
		assert_eq!((state.grid().rows(), state.grid().cols()), (11, 21));
		assert!(state.popups().is_empty());
		assert_eq!(state.signals().len(), 24);
		assert!(state.signals().iter().all(|s| s.trail.is_empty()));
		assert!(
			state
				.signals()
				.iter()
				.all(|s| !zone.contains(state.grid().layout_position(s.pos.row as usize, s.pos.col as usize)))
		);
	}

	#[test]
	fn fully_excluded_grid_has_no_signals_and_recovers_on_resize() {
		let everything = Zone {
			rect: Rect::new(-1000.0, -1000.0, 5000.0, 5000.0),
		};
		let mut state = HeroGridState::new(GridConfig::default(), 520.0, 520.0, Some(everything), 14);
		assert!(state.signals().is_empty());
		state.advance(0.1);
		assert!(state.signals().is_empty());

		state.resize(520.0, 520.0, None);
		assert_eq!(state.signals().len(), 24);
	}

	#[test]
	fn sparse_grid_refills_short_population() {
		let config = GridConfig {
			grid_spacing: 20.0,
			..GridConfig::default()
		};
		// Only the leftmost column survives: 101 of 10201 nodes.
		let zone = Zone {
			rect: Rect::new(10.0, -100.0, 3000.0, 3000.0),
		};
		let mut state = HeroGridState::new(config, 2000.0, 2000.0, Some(zone), 1);
		assert_eq!(state.grid().node_count(), 101);

		let mut short_frames = 0;
		for _ in 0..5_000 {
			state.advance(1.0 / 60.0);
			assert!(state.signals().len() <= 24);
			if state.signals().len() < 24 {
				short_frames += 1;
				assert!(short_frames < 60, "population stuck at {}", state.signals().len());
			} else {
				short_frames = 0;
			}
		}
		assert!(state.signals().iter().all(|s| s.pos.col == 0 && s.target.col == 0));
	}

	#[test]
	fn same_seed_same_simulation() {
		let run = |seed| {
			let mut state = HeroGridState::new(GridConfig::default(), 640.0, 480.0, None, seed);
			for _ in 0..120 {
				state.advance(1.0 / 60.0);
			}
			state.signals().to_vec()
		};
		assert_eq!(run(99), run(99));
	}

	#[test]
	fn non_finite_dt_is_ignored() {
		let mut state = HeroGridState::new(GridConfig::default(), 520.0, 520.0, None, 15);
		let before = state.signals().to_vec();
		state.advance(f64::NAN);
		state.advance(-1.0);
		assert_eq!(state.signals(), before.as_slice());
	}
}
