//! Sequential color scale for community values.

/// Light yellow through green to dark blue.
const YL_GN_BU: &[(u8, u8, u8)] = &[
	(255, 255, 217),
	(237, 248, 217),
	(199, 233, 180),
	(127, 205, 187),
	(65, 182, 196),
	(29, 145, 192),
	(34, 94, 168),
	(37, 52, 148),
	(8, 29, 88),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
	pub min: f64,
	pub max: f64,
}

impl ColorScale {
	pub fn new((min, max): (f64, f64)) -> Self {
		Self { min, max }
	}

	/// Position of `value` in the scale, clamped to `[0, 1]`. A degenerate
	/// range maps everything to the low end.
	pub fn normalize(&self, value: f64) -> f64 {
		let span = self.max - self.min;
		if span <= 0.0 || !span.is_finite() {
			return 0.0;
		}
		((value - self.min) / span).clamp(0.0, 1.0)
	}

	pub fn color(&self, value: f64) -> String {
		color_at(self.normalize(value))
	}
}

/// CSS color at `t` in `[0, 1]`, linearly interpolated between stops.
pub fn color_at(t: f64) -> String {
	let last = YL_GN_BU.len() - 1;
	let pos = t.clamp(0.0, 1.0) * last as f64;
	let i = (pos.floor() as usize).min(last - 1);
	let f = pos - i as f64;
	let (a, b) = (YL_GN_BU[i], YL_GN_BU[i + 1]);
	let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
	format!("rgb({}, {}, {})", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
