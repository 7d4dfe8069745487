//! Leptos component wrapping the hero grid canvas.
//!
//! The component sizes its canvas to the parent element (scaled by the device
//! pixel ratio), measures the exclusion zone around the hero copy, and drives
//! the simulation from `requestAnimationFrame`. Frames stop while the hero is
//! scrolled out of view; with `prefers-reduced-motion` a single static frame is
//! drawn instead. Window resizes are debounced into one full rebuild.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, IntersectionObserver,
	IntersectionObserverEntry, IntersectionObserverInit, MediaQueryListEvent, Window,
};

use super::config::GridConfig;
use super::driver::{AnimationLoop, LoopCommand, run_frame};
use super::grid::{Rect, Zone};
use super::state::HeroGridState;
use super::theme::Theme;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Bundles the simulation with the canvas it draws to and the loop state.
struct GridContext {
	state: HeroGridState,
	theme: Theme,
	frames: AnimationLoop,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	frame_handle: Option<i32>,
	resize_timer: Option<i32>,
}

impl GridContext {
	fn start(&mut self, window: &Window, animate: &FrameCallback) {
		if !self.frames.start() {
			return;
		}
		if let Some(ref cb) = *animate.borrow() {
			self.frame_handle = window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.ok();
		}
	}

	fn stop(&mut self, window: &Window) {
		self.frames.stop();
		if let Some(id) = self.frame_handle.take() {
			let _ = window.cancel_animation_frame(id);
		}
	}

	fn apply(&mut self, command: LoopCommand, window: &Window, animate: &FrameCallback) {
		match command {
			LoopCommand::Start => self.start(window, animate),
			LoopCommand::Stop => self.stop(window),
			LoopCommand::RenderStatic => {
				self.stop(window);
				self.render_static();
			}
		}
	}

	fn render_static(&mut self) {
		self.state.render(&mut self.ctx, &self.theme);
	}

	/// Re-measure the container and rebuild the simulation from scratch.
	fn relayout(&mut self, window: &Window) {
		let Some(layout) = measure(&self.canvas, self.state.config()) else {
			return;
		};
		let dpr = device_pixel_ratio(window, self.state.config());
		size_canvas(&self.canvas, &self.ctx, layout.width, layout.height, dpr);
		self.state.resize(layout.width, layout.height, layout.zone);
		if self.frames.reduced_motion() {
			self.render_static();
		}
	}
}

/// Closures that must outlive the effect that registered them.
#[derive(Default)]
#[allow(dead_code, reason = "fields are held only to keep the JS callbacks alive")]
struct Listeners {
	resize: Option<Closure<dyn FnMut()>>,
	rebuild: Option<Closure<dyn FnMut()>>,
	motion: Option<Closure<dyn FnMut(MediaQueryListEvent)>>,
	visibility: Option<Closure<dyn FnMut(js_sys::Array)>>,
	observer: Option<IntersectionObserver>,
}

struct Layout {
	width: f64,
	height: f64,
	zone: Option<Zone>,
}

fn client_rect(el: &Element) -> Rect {
	let r = el.get_bounding_client_rect();
	Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Canvas size from its parent, plus the zone around the content element if
/// the parent contains one.
fn measure(canvas: &HtmlCanvasElement, config: &GridConfig) -> Option<Layout> {
	let parent = canvas.parent_element()?;
	let bounds = client_rect(&parent);
	let zone = parent
		.query_selector(&config.content_selector)
		.ok()
		.flatten()
		.map(|content| Zone::from_bounds(bounds, client_rect(&content), config.exclusion_padding));
	Some(Layout {
		width: bounds.w,
		height: bounds.h,
		zone,
	})
}

fn device_pixel_ratio(window: &Window, config: &GridConfig) -> f64 {
	let dpr = window.device_pixel_ratio();
	if dpr.is_finite() && dpr > 0.0 {
		dpr.min(config.max_dpr)
	} else {
		1.0
	}
}

fn size_canvas(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	dpr: f64,
) {
	canvas.set_width((width * dpr) as u32);
	canvas.set_height((height * dpr) as u32);
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

fn entropy_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(hi << 32) | lo
}

/// Renders the animated circuit grid behind the hero content.
///
/// Place it inside the hero container; the canvas fills that container and
/// leaves a hole around the element matching `config.content_selector`.
#[component]
pub fn HeroGridCanvas(
	/// Tunables; defaults when omitted.
	#[prop(optional)]
	config: Option<GridConfig>,
	/// Palette; dark when omitted.
	#[prop(optional)]
	theme: Option<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GridContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Listeners>> = Rc::new(RefCell::new(Listeners::default()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("hero-grid: no 2d context, animation disabled");
			return;
		};

		let config = config.clone().unwrap_or_default();
		let theme = theme.clone().unwrap_or_default();
		let Some(layout) = measure(&canvas, &config) else {
			warn!("hero-grid: canvas has no parent element, animation disabled");
			return;
		};
		let dpr = device_pixel_ratio(&window, &config);
		size_canvas(&canvas, &ctx, layout.width, layout.height, dpr);

		let motion_query = window.match_media(REDUCED_MOTION_QUERY).ok().flatten();
		let reduced_motion = motion_query.as_ref().is_some_and(|mq| mq.matches());
		let seed = config.seed.unwrap_or_else(entropy_seed);
		let (debounce_ms, threshold, max_dt) = (
			config.resize_debounce_ms,
			config.visibility_threshold,
			config.max_dt(),
		);

		info!(
			"hero-grid: {}x{} canvas at dpr {}, reduced motion {}",
			layout.width, layout.height, dpr, reduced_motion
		);
		*context.borrow_mut() = Some(GridContext {
			state: HeroGridState::new(config, layout.width, layout.height, layout.zone, seed),
			theme,
			frames: AnimationLoop::new(reduced_motion, max_dt),
			canvas: canvas.clone(),
			ctx,
			frame_handle: None,
			resize_timer: None,
		});

		let (context_anim, animate_inner) = (context.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			let Some(window) = web_sys::window() else {
				return;
			};
			let mut guard = context_anim.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			c.frame_handle = None;
			if run_frame(&mut c.frames, &mut c.state, &mut c.ctx, &c.theme, now) {
				if let Some(ref cb) = *animate_inner.borrow() {
					c.frame_handle = window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok();
				}
			}
		}));

		let mut l = listeners.borrow_mut();

		let context_rebuild = context.clone();
		let rebuild = Closure::<dyn FnMut()>::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref mut c) = *context_rebuild.borrow_mut() {
				c.resize_timer = None;
				c.relayout(&window);
			}
		});
		let rebuild_fn: js_sys::Function = rebuild.as_ref().unchecked_ref::<js_sys::Function>().clone();
		l.rebuild = Some(rebuild);

		let context_resize = context.clone();
		let resize = Closure::<dyn FnMut()>::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				if let Some(id) = c.resize_timer.take() {
					window.clear_timeout_with_handle(id);
				}
				c.resize_timer = window
					.set_timeout_with_callback_and_timeout_and_arguments_0(&rebuild_fn, debounce_ms)
					.ok();
			}
		});
		let _ = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
		l.resize = Some(resize);

		if let Some(mq) = motion_query {
			let (context_motion, animate_motion) = (context.clone(), animate.clone());
			let motion = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |ev: MediaQueryListEvent| {
				let Some(window) = web_sys::window() else {
					return;
				};
				if let Some(ref mut c) = *context_motion.borrow_mut() {
					let command = c.frames.set_reduced_motion(ev.matches());
					debug!("hero-grid: reduced motion {} -> {:?}", ev.matches(), command);
					c.apply(command, &window, &animate_motion);
				}
			});
			let _ = mq.add_event_listener_with_callback("change", motion.as_ref().unchecked_ref());
			l.motion = Some(motion);
		}

		let (context_vis, animate_vis) = (context.clone(), animate.clone());
		let visibility = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			let Ok(entry) = entries.get(0).dyn_into::<IntersectionObserverEntry>() else {
				return;
			};
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref mut c) = *context_vis.borrow_mut() {
				let command = c.frames.set_visible(entry.is_intersecting());
				c.apply(command, &window, &animate_vis);
			}
		});
		let init = IntersectionObserverInit::new();
		init.set_threshold(&JsValue::from_f64(threshold));
		match (
			canvas.parent_element(),
			IntersectionObserver::new_with_options(visibility.as_ref().unchecked_ref(), &init),
		) {
			(Some(parent), Ok(observer)) => {
				observer.observe(&parent);
				l.observer = Some(observer);
			}
			_ => debug!("hero-grid: no intersection observer, treating hero as always visible"),
		}
		l.visibility = Some(visibility);
		drop(l);

		if let Some(ref mut c) = *context.borrow_mut() {
			if reduced_motion {
				c.render_static();
			} else {
				c.start(&window, &animate);
			}
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="hero-grid-canvas"
			aria-hidden="true"
			style="display: block; position: absolute; inset: 0; pointer-events: none;"
		/>
	}
}
