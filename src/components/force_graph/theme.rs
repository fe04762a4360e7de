//! Visual theming for the force graph.
//!
//! Node fill colors come from the node groups; the theme covers everything
//! else (background, default edge color, labels, tooltip).

use crate::config::ThemeName;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, new opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS form: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string. Supports `#RGB`, `#RRGGBB` and
	/// `rgb()`/`rgba()` functional notation; anything else is mid gray.
	pub fn parse(color_str: &str) -> Color {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#').filter(|h| h.is_ascii()) {
			let channel = |h: &str| u8::from_str_radix(h, 16).unwrap_or(128);
			match hex.len() {
				6 => Color::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
				3 => {
					let short = |i: usize| {
						u8::from_str_radix(&hex[i..i + 1], 16)
							.map(|v| v * 17)
							.unwrap_or(128)
					};
					Color::rgb(short(0), short(1), short(2))
				}
				_ => Color::rgb(128, 128, 128),
			}
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let part = |i: usize| nums.get(i).and_then(|s| s.trim().parse().ok());
			Color::rgba(
				part(0).unwrap_or(128),
				part(1).unwrap_or(128),
				part(2).unwrap_or(128),
				nums.get(3)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(1.0),
			)
		} else {
			Color::named(s).unwrap_or(Color::rgb(128, 128, 128))
		}
	}

	/// A handful of CSS color keywords that show up in edge and node data.
	fn named(name: &str) -> Option<Color> {
		let (r, g, b) = match name.to_ascii_lowercase().as_str() {
			"black" => (0, 0, 0),
			"white" => (255, 255, 255),
			"gray" | "grey" => (128, 128, 128),
			"red" => (255, 0, 0),
			"green" => (0, 128, 0),
			"blue" => (0, 0, 255),
			"yellow" => (255, 255, 0),
			"orange" => (255, 165, 0),
			"purple" => (128, 0, 128),
			"gold" => (255, 215, 0),
			"tomato" => (255, 99, 71),
			"lightblue" => (173, 216, 230),
			"lightgreen" => (144, 238, 144),
			"lightsalmon" => (255, 160, 122),
			"transparent" => return Some(Color::rgba(0, 0, 0, 0.0)),
			_ => return None,
		};
		Some(Color::rgb(r, g, b))
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Fill, or the gradient's center color.
	pub color: Color,
	/// Secondary color for the radial gradient.
	pub color_secondary: Color,
	/// Radial gradient instead of a flat fill.
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Used when an edge carries no color of its own.
	pub color: Color,
	/// Edge label text.
	pub label_color: Color,
	/// Halo drawn behind edge labels so they stay legible over lines.
	pub label_halo: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Shade node fills with a radial gradient.
	pub use_gradient: bool,
	/// Border/stroke width in screen pixels (0 = no border)
	pub border_width: f64,
	/// Border darkening relative to the fill color.
	pub border_darken: f64,
	/// Node label text.
	pub label_color: Color,
	/// Drop shadow color; fully transparent disables the shadow.
	pub shadow: Color,
}

/// Hover tooltip style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border: Color,
	/// Tooltip text.
	pub text: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme identifier.
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Edges and edge labels.
	pub edge: EdgeStyle,
	/// Node borders, labels and shadow.
	pub node: NodeStyle,
	/// Hover tooltip.
	pub tooltip: TooltipStyle,
}

impl Theme {
	/// Paper-white theme matching the rest of the analysis pages (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgb(132, 132, 132),
				label_color: Color::rgb(51, 51, 51),
				label_halo: Color::rgb(255, 255, 255),
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 2.0,
				border_darken: 0.2,
				label_color: Color::rgb(51, 51, 51),
				shadow: Color::rgba(0, 0, 0, 0.25),
			},
			tooltip: TooltipStyle {
				background: Color::rgb(245, 244, 215),
				border: Color::rgb(128, 128, 128),
				text: Color::rgb(0, 0, 0),
			},
		}
	}

	/// Dark theme for presentation screens
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.8),
				label_color: Color::rgb(220, 225, 230),
				label_halo: Color::rgb(22, 27, 34),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 1.0,
				border_darken: 0.35,
				label_color: Color::rgba(255, 255, 255, 0.9),
				shadow: Color::rgba(0, 0, 0, 0.0),
			},
			tooltip: TooltipStyle {
				background: Color::rgb(40, 46, 56),
				border: Color::rgb(90, 100, 115),
				text: Color::rgb(230, 232, 235),
			},
		}
	}

	/// Theme for a configured name.
	pub fn from_name(name: ThemeName) -> Self {
		match name {
			ThemeName::Light => Self::light(),
			ThemeName::Dark => Self::dark(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_colors() {
		assert_eq!(Color::parse("#FFD700"), Color::rgb(255, 215, 0));
		assert_eq!(Color::parse("#fff"), Color::rgb(255, 255, 255));
		assert_eq!(
			Color::parse("rgba(10, 20, 30, 0.5)"),
			Color::rgba(10, 20, 30, 0.5)
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Color::rgb(1, 2, 3));
		assert_eq!(Color::parse("Tomato"), Color::rgb(255, 99, 71));
		assert_eq!(Color::parse("transparent").a, 0.0);
		assert_eq!(Color::parse("papayawhip"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn css_output_drops_opaque_alpha() {
		assert_eq!(Color::rgb(167, 83, 245).to_css(), "#a753f5");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.25).to_css(),
			"rgba(0, 0, 0, 0.25)"
		);
	}

	#[test]
	fn theme_by_name() {
		assert_eq!(Theme::from_name(ThemeName::Dark).name, "dark");
		assert_eq!(Theme::default().name, "light");
	}
}
