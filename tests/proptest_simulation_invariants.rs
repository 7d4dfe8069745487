//! Property-based invariant tests for the hero grid simulation.
//!
//! Verifies:
//! 1. The lattice covers the canvas on both axes, with nodes at
//!    `origin + index * spacing`
//! 2. Nodes strictly inside the zone are holes, nodes strictly outside are present
//! 3. Every signal's (pos, target) pair is adjacent and resolves to present nodes
//! 4. Signal population stays at the configured count on a non-empty grid
//! 5. Trail segments never outlive the fade time and always render with positive alpha
//! 6. Popup count never exceeds the cap and every popup is younger than its duration
//! 7. Frozen frames (reduced motion) are identical draw for draw

use hero_grid::components::hero_grid::{
	AnimationLoop, DrawCommand, Grid, GridConfig, GridPos, HeroGridState, LoopCommand, Point,
	RecordingSurface, Rect, Theme, Zone, run_frame,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_canvas() -> impl Strategy<Value = (f64, f64)> {
	(0.0f64..1600.0, 0.0f64..1000.0)
}

fn arb_spacing() -> impl Strategy<Value = f64> {
	20.0f64..120.0
}

fn arb_zone() -> impl Strategy<Value = Zone> {
	(-100.0f64..1200.0, -100.0f64..800.0, 0.0f64..600.0, 0.0f64..400.0)
		.prop_map(|(x, y, w, h)| Zone {
			rect: Rect::new(x, y, w, h),
		})
}

fn arb_frame_steps() -> impl Strategy<Value = Vec<f64>> {
	prop::collection::vec(0.0f64..0.1, 1..240)
}

fn strictly_inside(zone: &Zone, p: Point) -> bool {
	let r = zone.rect;
	p.x > r.x && p.x < r.x + r.w && p.y > r.y && p.y < r.y + r.h
}

fn strictly_outside(zone: &Zone, p: Point) -> bool {
	let r = zone.rect;
	p.x < r.x || p.x > r.x + r.w || p.y < r.y || p.y > r.y + r.h
}

fn assert_state_invariants(state: &HeroGridState) -> Result<(), TestCaseError> {
	let grid = state.grid();
	let config = state.config();
	for sig in state.signals() {
		prop_assert_eq!(sig.pos.distance(sig.target), 1);
		prop_assert!(grid.has_node(sig.pos), "pos {:?} is a hole", sig.pos);
		prop_assert!(grid.has_node(sig.target), "target {:?} is a hole", sig.target);
		prop_assert!((0.0..1.0).contains(&sig.progress));
		for seg in &sig.trail {
			prop_assert!(seg.age >= 0.0 && seg.age <= config.trail_fade_time);
			prop_assert_eq!(seg.from.distance(seg.to), 1);
		}
	}
	prop_assert!(state.popups().len() <= config.popup_max_active);
	for popup in state.popups().iter() {
		prop_assert!(popup.age < config.popup_duration);
	}
	Ok(())
}

// ── 1. Coverage ───────────────────────────────────────────────────────

proptest! {
	#[test]
	fn grid_covers_canvas((w, h) in arb_canvas(), spacing in arb_spacing()) {
		let grid = Grid::build(w, h, spacing, None);
		let first = grid.node(GridPos::new(0, 0)).unwrap();
		let last = grid
			.node(GridPos::new(grid.rows() as i32 - 1, grid.cols() as i32 - 1))
			.unwrap();
		prop_assert!(first.x <= 1e-9 && first.y <= 1e-9);
		prop_assert!(last.x >= w - 1e-9 && last.y >= h - 1e-9);
		prop_assert_eq!(grid.node_count(), grid.rows() * grid.cols());

		for r in 0..grid.rows() {
			for c in 0..grid.cols() {
				let p = grid.node(GridPos::new(r as i32, c as i32)).unwrap();
				prop_assert!((p.x - (first.x + c as f64 * spacing)).abs() < 1e-6);
				prop_assert!((p.y - (first.y + r as f64 * spacing)).abs() < 1e-6);
				prop_assert_eq!(p, grid.layout_position(r, c));
			}
		}
	}
}

// ── 2. Zone exclusion ─────────────────────────────────────────────────

proptest! {
	#[test]
	fn zone_excludes_exactly_its_interior(
		(w, h) in arb_canvas(),
		spacing in arb_spacing(),
		zone in arb_zone(),
	) {
		let grid = Grid::build(w, h, spacing, Some(&zone));
		for r in 0..grid.rows() {
			for c in 0..grid.cols() {
				let p = grid.layout_position(r, c);
				let present = grid.has_node(GridPos::new(r as i32, c as i32));
				if strictly_inside(&zone, p) {
					prop_assert!(!present, "{:?} inside zone but present", p);
				}
				if strictly_outside(&zone, p) {
					prop_assert!(present, "{:?} outside zone but absent", p);
				}
			}
		}
	}
}

// ── 3-6. Entity invariants over many frames ───────────────────────────

proptest! {
	#![proptest_config(ProptestConfig::with_cases(48))]

	#[test]
	fn invariants_hold_every_frame(
		seed in any::<u64>(),
		(w, h) in (200.0f64..1200.0, 200.0f64..800.0),
		zone in proptest::option::of(arb_zone()),
		steps in arb_frame_steps(),
	) {
		let config = GridConfig {
			popup_chance: 0.5,
			popup_max_active: 4,
			..GridConfig::default()
		};
		let mut state = HeroGridState::new(config, w, h, zone, seed);
		assert_state_invariants(&state)?;
		for dt in steps {
			state.advance(dt);
			assert_state_invariants(&state)?;
		}
	}

	#[test]
	fn population_is_constant_without_a_zone(
		seed in any::<u64>(),
		steps in arb_frame_steps(),
	) {
		let mut state = HeroGridState::new(GridConfig::default(), 960.0, 540.0, None, seed);
		prop_assert_eq!(state.signals().len(), 24);
		for dt in steps {
			state.advance(dt);
			prop_assert_eq!(state.signals().len(), 24);
		}
	}

	#[test]
	fn rendered_trails_are_never_transparent(
		seed in any::<u64>(),
		steps in arb_frame_steps(),
	) {
		let mut state = HeroGridState::new(GridConfig::default(), 640.0, 480.0, None, seed);
		let theme = Theme::default();
		let mut surface = RecordingSurface::default();
		for dt in steps {
			state.advance(dt);
			state.render(&mut surface, &theme);
			for cmd in surface.take() {
				match cmd {
					DrawCommand::Stroke { color, .. } | DrawCommand::Fill { color } => {
						prop_assert!(color.a > 0.0);
					}
					DrawCommand::Text { color, .. } => prop_assert!(color.a > 0.0),
					_ => {}
				}
			}
		}
	}
}

// ── 7. Reduced motion ─────────────────────────────────────────────────

#[test]
fn reduced_motion_frames_are_identical() {
	let mut state = HeroGridState::new(GridConfig::default(), 800.0, 600.0, None, 5);
	let theme = Theme::default();
	let mut frames = AnimationLoop::new(true, 0.1);
	let mut surface = RecordingSurface::default();

	state.render(&mut surface, &theme);
	let first = surface.take();
	assert!(!first.is_empty());

	for i in 1..=30 {
		let scheduled = run_frame(&mut frames, &mut state, &mut surface, &theme, i as f64 * 16.0);
		assert!(!scheduled);
		state.render(&mut surface, &theme);
		assert_eq!(surface.take(), first);
	}
}

#[test]
fn stop_and_restart_preserve_entities() {
	let mut state = HeroGridState::new(GridConfig::default(), 800.0, 600.0, None, 6);
	let theme = Theme::default();
	let mut frames = AnimationLoop::new(false, 0.1);
	let mut surface = RecordingSurface::default();

	assert!(frames.start());
	for i in 0..60 {
		assert!(run_frame(&mut frames, &mut state, &mut surface, &theme, i as f64 * 16.0));
	}
	let snapshot = state.signals().to_vec();

	assert_eq!(frames.set_visible(false), LoopCommand::Stop);
	assert!(!run_frame(&mut frames, &mut state, &mut surface, &theme, 2_000.0));
	assert_eq!(state.signals(), snapshot.as_slice());

	assert_eq!(frames.set_visible(true), LoopCommand::Start);
	assert!(frames.start());
	assert!(!frames.start());
	// First frame after a restart steps zero, so nothing moves.
	assert!(run_frame(&mut frames, &mut state, &mut surface, &theme, 60_000.0));
	assert_eq!(state.signals(), snapshot.as_slice());
	assert!(run_frame(&mut frames, &mut state, &mut surface, &theme, 60_016.0));
	assert_ne!(state.signals(), snapshot.as_slice());
}
