//! Visual theming for the graph canvas.

/// An sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

fn mix_channel(from: u8, to: u8, t: f64) -> u8 {
	(f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
}

impl Color {
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Move `t` of the way towards `other`, alpha included. `t` is clamped to 0..=1.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: mix_channel(self.r, other.r, t),
			g: mix_channel(self.g, other.g, t),
			b: mix_channel(self.b, other.b, t),
			a: self.a + (other.a - self.a) * t,
		}
	}

	/// Blend towards white, keeping alpha.
	pub fn lighten(self, amount: f64) -> Self {
		Self {
			a: self.a,
			..self.lerp(Self::WHITE, amount)
		}
	}

	/// `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		let Color { r, g, b, a } = self;
		if a >= 0.999 {
			format!("#{r:02x}{g:02x}{b:02x}")
		} else {
			format!("rgba({r}, {g}, {b}, {a})")
		}
	}
}

/// Canvas background: flat color with a dot grid.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Fill behind everything.
	pub color: Color,
	/// Grid dot color.
	pub dot_color: Color,
	/// Dot spacing in world units.
	pub dot_gap: f64,
	/// Dot radius in world units.
	pub dot_radius: f64,
}

/// Subject box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Box fill.
	pub fill: Color,
	/// Resting border color.
	pub border: Color,
	/// Border color when fully highlighted.
	pub border_highlight: Color,
	/// Label color.
	pub text: Color,
	/// Border width in world units.
	pub border_width: f64,
	/// Corner radius in world units.
	pub corner_radius: f64,
	/// CSS font shorthand for labels.
	pub font: &'static str,
}

/// Dependency edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke and arrowhead color.
	pub color: Color,
	/// Stroke width in world units.
	pub width: f64,
	/// Dash pattern (dash, gap) in world units.
	pub dash: (f64, f64),
	/// Flow animation speed (world units per second).
	pub flow_speed: f64,
	/// Arrowhead length in world units.
	pub arrow_size: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Backdrop.
	pub background: BackgroundStyle,
	/// Subject boxes.
	pub node: NodeStyle,
	/// Prerequisite edges.
	pub edge: EdgeStyle,
}

impl Theme {
	/// Dark theme with violet borders and teal edges.
	pub fn dark() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(18, 18, 18),
				dot_color: Color::rgb(85, 85, 85),
				dot_gap: 20.0,
				dot_radius: 1.0,
			},
			node: NodeStyle {
				fill: Color::rgb(30, 30, 30),
				border: Color::rgb(187, 134, 252),
				border_highlight: Color::rgb(3, 218, 198),
				text: Color::WHITE,
				border_width: 1.0,
				corner_radius: 8.0,
				font: "13px sans-serif",
			},
			edge: EdgeStyle {
				color: Color::rgb(3, 218, 198),
				width: 2.0,
				dash: (5.0, 5.0),
				flow_speed: 20.0,
				arrow_size: 8.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(3, 218, 198).to_css(), "#03dac6");
		assert_eq!(
			Color::rgb(3, 218, 198).with_alpha(0.5).to_css(),
			"rgba(3, 218, 198, 0.5)"
		);
	}

	#[test]
	fn lerp_hits_endpoints() {
		let a = Color::rgb(0, 0, 0);
		let b = Color::rgb(200, 100, 50);
		assert_eq!(a.lerp(b, 0.0), a);
		assert_eq!(a.lerp(b, 1.0), b);
		assert_eq!(a.lighten(1.0), Color::WHITE);
		assert_eq!(a.with_alpha(0.2).lighten(1.0).a, 0.2);
	}
}
