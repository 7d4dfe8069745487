//! Floating value labels spawned by signal hops.

use rand::Rng;

use super::config::GridConfig;
use super::grid::Point;

/// A single floating label.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
	/// Node the popup was spawned at.
	pub anchor: Point,
	/// Text drawn for this popup.
	pub label: String,
	/// Seconds since spawn.
	pub age: f64,
}

impl Popup {
	/// Opacity envelope: linear fade in, hold, linear fade out before expiry.
	pub fn alpha(&self, config: &GridConfig) -> f64 {
		let fade_in = if config.popup_fade_in > 0.0 {
			(self.age / config.popup_fade_in).min(1.0)
		} else {
			1.0
		};
		let remaining = config.popup_duration - self.age;
		let fade_out = if config.popup_fade_out > 0.0 && remaining < config.popup_fade_out {
			remaining / config.popup_fade_out
		} else {
			1.0
		};
		config.popup_max_opacity * (fade_in * fade_out).max(0.0)
	}

	/// Where the label text is drawn: offset from the anchor and risen
	/// proportionally to age.
	pub fn text_origin(&self, config: &GridConfig) -> Point {
		let progress = if config.popup_duration > 0.0 {
			self.age / config.popup_duration
		} else {
			0.0
		};
		Point {
			x: self.anchor.x + config.popup_offset,
			y: self.anchor.y - config.popup_offset - config.popup_float_distance * progress,
		}
	}
}

/// Capped population of live popups.
#[derive(Clone, Debug, Default)]
pub struct PopupField {
	popups: Vec<Popup>,
}

impl PopupField {
	/// Number of live popups.
	pub fn len(&self) -> usize {
		self.popups.len()
	}

	/// True when no popup is live.
	pub fn is_empty(&self) -> bool {
		self.popups.is_empty()
	}

	/// Live popups, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &Popup> {
		self.popups.iter()
	}

	/// Drop every popup.
	pub fn clear(&mut self) {
		self.popups.clear();
	}

	/// Whether the active cap has been reached.
	pub fn is_full(&self, config: &GridConfig) -> bool {
		self.popups.len() >= config.popup_max_active
	}

	/// Add a popup at `anchor` with a label drawn uniformly from the configured
	/// set. Dropped when the field is full or there are no labels.
	pub fn try_spawn<R: Rng + ?Sized>(
		&mut self,
		anchor: Point,
		config: &GridConfig,
		rng: &mut R,
	) -> bool {
		if self.is_full(config) || config.popup_labels.is_empty() {
			return false;
		}
		let label = config.popup_labels[rng.random_range(0..config.popup_labels.len())].clone();
		self.popups.push(Popup {
			anchor,
			label,
			age: 0.0,
		});
		true
	}

	/// Age every popup by `dt` and drop the ones that reached `duration`.
	pub fn advance(&mut self, dt: f64, duration: f64) {
		self.popups.retain_mut(|p| {
			p.age += dt;
			p.age < duration
		});
	}
}
