//! Signals: pulses that random-walk along grid edges leaving a fading trail.
//!
//! Each signal is always somewhere on the edge between `pos` and `target`,
//! `progress` of the way along. Completing an edge is a *hop*: the trail grows,
//! the lifetime shrinks, a popup may appear, and the next edge is picked with a
//! bias towards going straight. A signal with no way forward or no lifetime
//! left retires; the owner replaces it.

use log::trace;
use rand::Rng;

use super::config::GridConfig;
use super::grid::{Direction, Grid, GridPos, Point};
use super::popups::PopupField;

/// A traversed edge that is fading out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
	/// Node the hop started from.
	pub from: GridPos,
	/// Node the hop ended at.
	pub to: GridPos,
	/// Seconds since the edge was completed.
	pub age: f64,
}

impl TrailSegment {
	/// Linear fade from `peak` to zero over `fade_time`.
	pub fn alpha(&self, peak: f64, fade_time: f64) -> f64 {
		if fade_time <= 0.0 {
			return 0.0;
		}
		peak * (1.0 - self.age / fade_time)
	}
}

/// Result of advancing a signal by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hop {
	/// Still mid-edge.
	Traveling,
	/// Completed an edge and set off along the next one.
	Arrived,
	/// Completed an edge with nowhere to go or no lifetime left.
	Retired,
}

/// A pulse travelling across the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
	/// Node the signal is leaving.
	pub pos: GridPos,
	/// Node the signal is heading to.
	pub target: GridPos,
	/// Fraction of the current edge covered, in `[0, 1)`.
	pub progress: f64,
	/// Edges per second.
	pub speed: f64,
	/// Direction of travel along the current edge.
	pub direction: Direction,
	/// Segments of completed hops, oldest first.
	pub trail: Vec<TrailSegment>,
	/// Hops left before forced retirement.
	pub life: u32,
}

impl Signal {
	/// Spawn a signal at a random node that has at least one neighbour.
	///
	/// Gives up after `spawn_attempts` misses, which is expected while the grid
	/// is (nearly) fully excluded.
	pub fn spawn<R: Rng + ?Sized>(grid: &Grid, config: &GridConfig, rng: &mut R) -> Option<Self> {
		if grid.rows() == 0 || grid.cols() == 0 {
			return None;
		}

		for _ in 0..config.spawn_attempts {
			let pos = GridPos::new(
				rng.random_range(0..grid.rows()) as i32,
				rng.random_range(0..grid.cols()) as i32,
			);
			if !grid.has_node(pos) {
				continue;
			}
			let exits: Vec<Direction> = grid.exits(pos).collect();
			if exits.is_empty() {
				continue;
			}

			let direction = exits[rng.random_range(0..exits.len())];
			let (speed_min, speed_max) = config.speed_range();
			let (life_min, life_max) = config.life_range();
			return Some(Self {
				pos,
				target: pos.step(direction),
				progress: rng.random::<f64>(),
				speed: if speed_max > speed_min {
					rng.random_range(speed_min..speed_max)
				} else {
					speed_min
				},
				direction,
				trail: Vec::new(),
				life: rng.random_range(life_min..life_max),
			});
		}

		trace!(
			"hero-grid: no spawn node after {} attempts",
			config.spawn_attempts
		);
		None
	}

	/// Advance along the current edge by `dt` seconds, handling a hop if the
	/// edge is completed. At most one hop happens per call.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		dt: f64,
		grid: &Grid,
		config: &GridConfig,
		rng: &mut R,
		popups: &mut PopupField,
	) -> Hop {
		self.progress += self.speed * dt;
		if self.progress < 1.0 {
			return Hop::Traveling;
		}

		self.progress = 0.0;
		self.life = self.life.saturating_sub(1);
		self.trail.push(TrailSegment {
			from: self.pos,
			to: self.target,
			age: 0.0,
		});
		self.pos = self.target;

		if let Some(anchor) = grid.node(self.pos) {
			if !popups.is_full(config) && rng.random_bool(config.popup_chance.clamp(0.0, 1.0)) {
				popups.try_spawn(anchor, config, rng);
			}
		}

		if self.life == 0 {
			return Hop::Retired;
		}

		let mut choices: Vec<(Direction, u32)> = Vec::with_capacity(3);
		if grid.has_node(self.pos.step(self.direction)) {
			choices.push((self.direction, config.straight_weight));
		}
		for turn in self.direction.perpendicular() {
			if grid.has_node(self.pos.step(turn)) {
				choices.push((turn, config.turn_weight));
			}
		}

		let total: u32 = choices.iter().map(|&(_, w)| w).sum();
		if total == 0 {
			return Hop::Retired;
		}
		let draw = rng.random::<f64>() * total as f64;
		let Some(next) = weighted_choice(&choices, draw) else {
			return Hop::Retired;
		};

		self.direction = next;
		self.target = self.pos.step(next);
		Hop::Arrived
	}

	/// Age the trail by `dt` and drop segments older than `fade_time`.
	pub fn age_trail(&mut self, dt: f64, fade_time: f64) {
		self.trail.retain_mut(|seg| {
			seg.age += dt;
			seg.age <= fade_time
		});
	}

	/// Current head position, interpolated along the edge.
	pub fn head(&self, grid: &Grid) -> Option<Point> {
		let from = grid.node(self.pos)?;
		let to = grid.node(self.target)?;
		Some(from.lerp(to, self.progress))
	}
}

/// Pick from weighted `options` given a `draw` in `[0, total_weight)`.
///
/// Returns the first option whose cumulative weight is at least `draw`.
/// Zero-weight options are never picked. If rounding pushes `draw` past the
/// total, the last positive-weight option wins.
pub fn weighted_choice<T: Copy>(options: &[(T, u32)], draw: f64) -> Option<T> {
	let mut cumulative = 0.0;
	let mut last = None;
	for &(option, weight) in options {
		if weight == 0 {
			continue;
		}
		cumulative += weight as f64;
		last = Some(option);
		if draw <= cumulative {
			return last;
		}
	}
	last
}
