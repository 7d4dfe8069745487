//! Frame driver: decides when frames run.
//!
//! The browser side only schedules and cancels `requestAnimationFrame`
//! callbacks; every decision about whether a frame should run, and with what
//! time step, is made here so it can be exercised without a display.

use super::state::HeroGridState;
use super::surface::Surface;
use super::theme::Theme;

/// What the host should do after a visibility or motion-preference change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCommand {
	/// Schedule the next frame (no-op if one is already scheduled).
	Start,
	/// Cancel any scheduled frame.
	Stop,
	/// Cancel any scheduled frame and draw one static frame.
	RenderStatic,
}

/// Running state of the per-frame loop.
#[derive(Clone, Debug)]
pub struct AnimationLoop {
	running: bool,
	visible: bool,
	reduced_motion: bool,
	prev_time: Option<f64>,
	max_dt: f64,
}

impl AnimationLoop {
	/// `max_dt` caps the step fed to the simulation after long pauses. A
	/// negative or non-finite cap freezes the simulation instead of panicking.
	pub fn new(reduced_motion: bool, max_dt: f64) -> Self {
		Self {
			running: false,
			visible: true,
			reduced_motion,
			prev_time: None,
			max_dt: if max_dt.is_finite() { max_dt.max(0.0) } else { 0.0 },
		}
	}

	/// Whether a frame is currently expected.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Whether the hero is on screen.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Whether the user asked for reduced motion.
	pub fn reduced_motion(&self) -> bool {
		self.reduced_motion
	}

	/// Begin running. Returns `true` when the caller must schedule a frame;
	/// repeated calls while running, hidden or in reduced motion return `false`.
	pub fn start(&mut self) -> bool {
		if self.running || !self.visible || self.reduced_motion {
			return false;
		}
		self.running = true;
		self.prev_time = None;
		true
	}

	/// Stop scheduling frames. Simulation state is left as is.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Called from the frame callback with the host timestamp in milliseconds.
	/// Returns the step in seconds, or `None` if the loop has ended and no
	/// further frame should be scheduled. The first frame after a start steps 0.
	pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
		if !self.running {
			return None;
		}
		if !self.visible || self.reduced_motion {
			self.running = false;
			return None;
		}
		let dt = self
			.prev_time
			.map(|prev| (now_ms - prev) / 1000.0)
			.filter(|dt| dt.is_finite())
			.map(|dt| dt.min(self.max_dt).max(0.0))
			.unwrap_or(0.0);
		self.prev_time = Some(now_ms);
		Some(dt)
	}

	/// The animated surface scrolled in or out of view.
	pub fn set_visible(&mut self, visible: bool) -> LoopCommand {
		self.visible = visible;
		if visible && !self.reduced_motion {
			LoopCommand::Start
		} else {
			self.stop();
			LoopCommand::Stop
		}
	}

	/// The reduced-motion preference changed.
	pub fn set_reduced_motion(&mut self, reduced: bool) -> LoopCommand {
		self.reduced_motion = reduced;
		if reduced {
			self.stop();
			LoopCommand::RenderStatic
		} else {
			LoopCommand::Start
		}
	}
}

/// Run one frame: advance the simulation if the loop yields a step, then draw.
/// Returns whether another frame should be scheduled.
pub fn run_frame<S: Surface + ?Sized>(
	frames: &mut AnimationLoop,
	state: &mut HeroGridState,
	surface: &mut S,
	theme: &Theme,
	now_ms: f64,
) -> bool {
	let Some(dt) = frames.tick(now_ms) else {
		return false;
	};
	state.advance(dt);
	state.render(surface, theme);
	true
}
