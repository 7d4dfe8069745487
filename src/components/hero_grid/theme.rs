//! Colours for the hero grid.
//!
//! The site is dark-mode only, so a single palette ships as the default.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with alpha replaced by `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` string. Alpha is always emitted since nearly every stroke
	/// in the grid is translucent.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Display name.
	pub name: &'static str,
	/// Static node dots
	pub dot: Color,
	/// Static grid lines
	pub line: Color,
	/// Signal heads and trails
	pub signal: Color,
	/// Popup text
	pub popup: Color,
	/// Vignette edge color
	pub vignette: Color,
	/// Vignette alpha at the outer radius
	pub vignette_alpha: f64,
}

impl Theme {
	/// Blue circuit on near-black (default)
	pub fn dark() -> Self {
		Self {
			name: "dark",
			dot: Color::rgb(59, 130, 246),
			line: Color::rgb(59, 130, 246),
			signal: Color::rgb(96, 165, 250),
			popup: Color::rgb(74, 222, 128),
			vignette: Color::rgb(10, 10, 11),
			vignette_alpha: 0.85,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
