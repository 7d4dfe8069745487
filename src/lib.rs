//! hero-grid: animated circuit-grid background for a marketing hero section.
//!
//! This crate provides a WASM canvas component that draws a faint node lattice
//! with signal pulses random-walking across it, fading trails, and floating
//! value popups, leaving a hole behind the hero copy.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::hero_grid::{
	AnimationLoop, GridConfig, HeroGridCanvas, HeroGridState, RecordingSurface, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hero-grid: logging initialized");
}

/// Parse a JSON config override. Missing fields keep their defaults.
pub fn parse_grid_config(json_text: &str) -> Option<GridConfig> {
	match serde_json::from_str::<GridConfig>(json_text) {
		Ok(config) => Some(config),
		Err(e) => {
			warn!("hero-grid: failed to parse grid config: {}", e);
			None
		}
	}
}

/// Load config overrides from a script element with id="hero-grid-config".
/// Falls back to the defaults when the element is absent or unparsable.
pub fn load_grid_config() -> GridConfig {
	fn script_text() -> Option<String> {
		let window: Window = web_sys::window()?;
		let document = window.document()?;
		let element = document.get_element_by_id("hero-grid-config")?;
		let script: HtmlScriptElement = element.dyn_into().ok()?;
		script.text().ok()
	}

	match script_text().and_then(|text| parse_grid_config(&text)) {
		Some(config) => {
			info!("hero-grid: loaded config overrides");
			config
		}
		None => GridConfig::default(),
	}
}

/// Main application component.
/// Renders the hero section with the grid behind its content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_grid_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="hero-grid" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero" style="position: relative; min-height: 100vh;">
			<HeroGridCanvas config=config />
			<div class="hero-content" style="position: relative;">
				<h1>"hero-grid"</h1>
				<p class="subtitle">"Signals travel the grid; the copy stays clear."</p>
			</div>
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_override_parses() {
		let config = parse_grid_config(
			r##"{ "signal_count": 4, "popup_labels": ["+1"], "content_selector": "#copy" }"##,
		)
		.unwrap();
		assert_eq!(config.signal_count, 4);
		assert_eq!(config.popup_labels, vec!["+1".to_string()]);
		assert_eq!(config.content_selector, "#copy");
		assert_eq!(config.grid_spacing, 52.0);
	}

	#[test]
	fn bad_config_is_rejected() {
		assert!(parse_grid_config("{ not json").is_none());
		assert!(parse_grid_config(r#"{ "signal_count": -3 }"#).is_none());
	}
}
