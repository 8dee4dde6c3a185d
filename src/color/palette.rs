//! Colors and ordinal palettes for category coloring.

/// RGB color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Color {
	/// Construct from channel values.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Lighten by a factor (0.0 = unchanged, 1.0 = white). The factor is
	/// clamped to that range.
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
		}
	}

	/// Darken by a factor (0.0 = unchanged, 1.0 = black). The factor is
	/// clamped to that range.
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
		}
	}

	/// CSS hex form, e.g. "#1f77b4".
	pub fn to_css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// An ordinal color range: a finite list of colors that cycles when the
/// domain outgrows it.
#[derive(Clone, Debug)]
pub struct Palette {
	/// The colors, in assignment order.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Ten-color categorical palette, the default for category coloring.
	pub fn categorical() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // #1f77b4
				Color::rgb(255, 127, 14),  // #ff7f0e
				Color::rgb(44, 160, 44),   // #2ca02c
				Color::rgb(214, 39, 40),   // #d62728
				Color::rgb(148, 103, 189), // #9467bd
				Color::rgb(140, 86, 75),   // #8c564b
				Color::rgb(227, 119, 194), // #e377c2
				Color::rgb(127, 127, 127), // #7f7f7f
				Color::rgb(188, 189, 34),  // #bcbd22
				Color::rgb(23, 190, 207),  // #17becf
			],
		}
	}

	/// Muted slate alternative for dense charts where the categorical
	/// palette reads too loud.
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// The color at an index, cycling past the end of the range.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::categorical()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_cycles_past_its_range() {
		let palette = Palette::categorical();
		assert_eq!(palette.get(0), palette.get(10));
		assert_eq!(palette.get(3), palette.get(13));
	}

	#[test]
	fn css_form_is_lowercase_hex() {
		assert_eq!(Color::rgb(31, 119, 180).to_css(), "#1f77b4");
	}

	#[test]
	fn darken_and_lighten_clamp_their_factor() {
		let color = Color::rgb(100, 100, 100);
		assert_eq!(color.darken(2.0), Color::rgb(0, 0, 0));
		assert_eq!(color.lighten(2.0), Color::rgb(255, 255, 255));
		assert_eq!(color.darken(0.0), color);
	}
}
