//! Tunable parameters for the hero grid.
//!
//! Every constant the simulation and renderer use lives here so a page can
//! override any of them (see [`crate::load_grid_config`]). Fields missing from
//! an override fall back to [`GridConfig::default`].

use serde::Deserialize;

/// Default value labels shown by popups.
pub const DEFAULT_POPUP_LABELS: [&str; 8] = [
	"+$0.0001", "+$0.0003", "+$0.0006", "+$0.0008", "+$0.0012", "+$0.0024", "+$0.0048",
	"+$0.0096",
];

/// Complete configuration for one hero grid instance.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
	/// Distance between adjacent nodes, in CSS pixels.
	pub grid_spacing: f64,

	/// Radius of the static node dots.
	pub dot_radius: f64,
	/// Alpha of the node dots.
	pub dot_opacity: f64,

	/// Alpha of the grid lines.
	pub line_opacity: f64,
	/// Stroke width of the grid lines.
	pub line_width: f64,

	/// Number of live signals the simulation keeps alive.
	pub signal_count: usize,
	/// Radius of a signal's head.
	pub signal_radius: f64,
	/// Alpha of a signal's head and of the edge it is crossing.
	pub signal_opacity: f64,
	/// Base speed in edges per second. Each signal draws its own speed from
	/// `0.7..1.4` times this value.
	pub signal_speed: f64,
	/// Seconds for a trail segment to fade out completely.
	pub trail_fade_time: f64,
	/// Alpha of a freshly laid trail segment.
	pub trail_opacity: f64,
	/// Stroke width of trail segments.
	pub trail_width: f64,
	/// Shortest lifetime in hops (inclusive).
	pub signal_min_life: u32,
	/// Longest lifetime in hops (exclusive).
	pub signal_max_life: u32,
	/// Weight of continuing straight when picking the next edge.
	pub straight_weight: u32,
	/// Weight of each perpendicular turn when picking the next edge.
	pub turn_weight: u32,
	/// Rejection-sampling budget when looking for a spawn node.
	pub spawn_attempts: u32,

	/// Probability that a completed hop spawns a popup.
	pub popup_chance: f64,
	/// CSS font shorthand for popup text.
	pub popup_font: String,
	/// Peak alpha reached between fade-in and fade-out.
	pub popup_max_opacity: f64,
	/// Popup lifetime in seconds.
	pub popup_duration: f64,
	/// Upward travel over a popup's lifetime, in pixels.
	pub popup_float_distance: f64,
	/// Popups past this count are dropped, not queued.
	pub popup_max_active: usize,
	/// Seconds to fade in after spawning.
	pub popup_fade_in: f64,
	/// Seconds spent fading out before expiry.
	pub popup_fade_out: f64,
	/// Text offset from the anchor node (right and up).
	pub popup_offset: f64,
	/// Labels to pick from. Empty disables popups.
	pub popup_labels: Vec<String>,

	/// Fraction of the frame's outer radius where the vignette starts.
	pub vignette_start: f64,

	/// Upper bound on the device pixel ratio used for the backing store.
	pub max_dpr: f64,
	/// Longest frame delta fed to the simulation, in seconds.
	pub max_frame_dt: f64,
	/// Quiet period after the last resize event before rebuilding.
	pub resize_debounce_ms: i32,
	/// Fraction of the hero that must be on screen for frames to run.
	pub visibility_threshold: f64,
	/// Margin added around the content element when carving the exclusion zone.
	pub exclusion_padding: f64,
	/// CSS selector of the content element, looked up inside the canvas parent.
	pub content_selector: String,

	/// Fixed RNG seed. When absent the host supplies one.
	pub seed: Option<u64>,
}

impl Default for GridConfig {
	fn default() -> Self {
		Self {
			grid_spacing: 52.0,
			dot_radius: 1.2,
			dot_opacity: 0.10,
			line_opacity: 0.04,
			line_width: 0.5,
			signal_count: 24,
			signal_radius: 2.5,
			signal_opacity: 0.55,
			signal_speed: 1.2,
			trail_fade_time: 1.2,
			trail_opacity: 0.18,
			trail_width: 1.0,
			signal_min_life: 12,
			signal_max_life: 25,
			straight_weight: 3,
			turn_weight: 1,
			spawn_attempts: 100,
			popup_chance: 0.12,
			popup_font: r#"9px "JetBrains Mono", monospace"#.to_string(),
			popup_max_opacity: 0.30,
			popup_duration: 2.5,
			popup_float_distance: 14.0,
			popup_max_active: 15,
			popup_fade_in: 0.3,
			popup_fade_out: 0.5,
			popup_offset: 8.0,
			popup_labels: DEFAULT_POPUP_LABELS.iter().map(|s| s.to_string()).collect(),
			vignette_start: 0.35,
			max_dpr: 2.0,
			max_frame_dt: 0.1,
			resize_debounce_ms: 200,
			visibility_threshold: 0.05,
			exclusion_padding: 30.0,
			content_selector: ".hero-content".to_string(),
			seed: None,
		}
	}
}

impl GridConfig {
	/// Spacing clamped to something the grid builder can divide by.
	pub fn spacing(&self) -> f64 {
		if self.grid_spacing.is_finite() && self.grid_spacing >= 1.0 {
			self.grid_spacing
		} else {
			1.0
		}
	}

	/// Speed range for newly spawned signals.
	pub fn speed_range(&self) -> (f64, f64) {
		(self.signal_speed * 0.7, self.signal_speed * 1.4)
	}

	/// Lifetime range for newly spawned signals, `min..max`, never empty.
	pub fn life_range(&self) -> (u32, u32) {
		let min = self.signal_min_life.clamp(1, u32::MAX - 1);
		(min, self.signal_max_life.max(min.saturating_add(1)))
	}

	/// Frame delta cap. Negative or non-finite overrides fall back to the default.
	pub fn max_dt(&self) -> f64 {
		if self.max_frame_dt.is_finite() && self.max_frame_dt >= 0.0 {
			self.max_frame_dt
		} else {
			Self::default().max_frame_dt
		}
	}
}
