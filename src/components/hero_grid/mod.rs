//! Animated circuit-grid hero background.
//!
//! Renders a lattice of faint nodes and links on an HTML canvas with:
//! - Signal pulses that random-walk along the links, preferring to go straight
//! - Fading trails behind every signal
//! - Occasional floating value popups where a signal lands
//! - A hole in the lattice behind the hero copy, and a radial vignette
//!
//! The simulation ([`HeroGridState`]) and the frame driver ([`AnimationLoop`])
//! have no browser dependency and can be advanced and rendered into a
//! [`RecordingSurface`] natively.
//!
//! # Example
//!
//! ```ignore
//! use hero_grid::{GridConfig, HeroGridCanvas};
//!
//! view! {
//!     <section class="hero">
//!         <HeroGridCanvas config=GridConfig { signal_count: 16, ..Default::default() } />
//!         <div class="hero-content">...</div>
//!     </section>
//! }
//! ```

mod component;
pub mod config;
pub mod driver;
pub mod grid;
pub mod popups;
mod render;
pub mod signals;
mod state;
pub mod surface;
pub mod theme;

pub use component::HeroGridCanvas;
pub use config::GridConfig;
pub use driver::{AnimationLoop, LoopCommand, run_frame};
pub use grid::{Direction, Grid, GridPos, Point, Rect, Zone};
pub use popups::{Popup, PopupField};
pub use signals::{Hop, Signal, TrailSegment, weighted_choice};
pub use state::HeroGridState;
pub use surface::{DrawCommand, RadialGradient, RecordingSurface, Surface};
pub use theme::{Color, Theme};
