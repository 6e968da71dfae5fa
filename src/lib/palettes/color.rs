use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// An RGBA color with normalized `f64` channels.
///
/// The default value is opaque white, which is also what a palette grows with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: f64,
	pub g: f64,
	pub b: f64,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
	pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

	pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
		Self::from_rgba8(r, g, b, 255)
	}

	pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r: r as f64 / 255.0,
			g: g as f64 / 255.0,
			b: b as f64 / 255.0,
			a: a as f64 / 255.0,
		}
	}

	pub fn to_rgb8(&self) -> [u8; 3] {
		[quantize(self.r), quantize(self.g), quantize(self.b)]
	}

	pub fn to_rgba8(&self) -> [u8; 4] {
		[quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
	}

	/// Packs the color channels into `0xRRGGBB`.
	pub fn to_u32(&self) -> u32 {
		let [r, g, b] = self.to_rgb8();
		((r as u32) << 16) | ((g as u32) << 8) | b as u32
	}

	pub(crate) fn from_6bits(v: [u8; 3]) -> Self {
		Self::from_rgb8(scale_6bits_to_8bits(v[0]), scale_6bits_to_8bits(v[1]), scale_6bits_to_8bits(v[2]))
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::WHITE
	}
}

impl From<[u8; 3]> for Color {
	fn from(v: [u8; 3]) -> Self {
		Self::from_rgb8(v[0], v[1], v[2])
	}
}

impl From<u32> for Color {
	fn from(v: u32) -> Self {
		Self::from_rgb8(((v >> 16) & 0xFF) as u8, ((v >> 8) & 0xFF) as u8, (v & 0xFF) as u8)
	}
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("\"{0}\" is not a valid hexadecimal color value")]
pub struct ParseColorError(pub String);

/// Parses `RRGGBB` or `RRGGBBAA`, with an optional `#` or `0x` prefix.
impl FromStr for Color {
	type Err = ParseColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		// remove common hexadecimal prefixes from the string prior to parsing
		let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
		let digits = digits.strip_prefix("#").unwrap_or(digits);

		let err = || ParseColorError(trimmed.to_string());
		if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(err());
		}

		let v = u32::from_str_radix(digits, 16).map_err(|_| err())?;
		match digits.len() {
			6 => Ok(Color::from(v)),
			8 => Ok(Color::from_rgba8((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)),
			_ => Err(err()),
		}
	}
}

fn quantize(c: f64) -> u8 {
	(c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn scale_6bits_to_8bits(v: u8) -> u8 {
	let v = v & 0b111111;
	(v << 2) | (v >> 4)
}

impl Display for Color {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{:06X}", self.to_u32())
	}
}
