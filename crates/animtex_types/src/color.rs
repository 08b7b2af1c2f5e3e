//! Packed ARGB color support.
//!
//! Images exchange pixels as [`Color`] values. The packed form used by
//! uploads and test fixtures is `alpha << 24 | red << 16 | green << 8 | blue`.

use std::fmt;

/// ARGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
	/// Alpha component (0-255)
	pub a: u8,
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
}

impl Color {
	/// Fully transparent black, the background value of every image.
	pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);

	/// Creates a new color from its components.
	///
	/// # Arguments
	///
	/// * `a` - Alpha component (0-255)
	/// * `r` - Red component (0-255)
	/// * `g` - Green component (0-255)
	/// * `b` - Blue component (0-255)
	pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
		Self {
			a,
			r,
			g,
			b,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::argb(255, r, g, b)
	}

	/// Unpacks a color from a 32-bit ARGB value.
	pub const fn from_argb32(value: u32) -> Self {
		Self::argb((value >> 24) as u8, (value >> 16) as u8, (value >> 8) as u8, value as u8)
	}

	/// Returns the color as a 32-bit ARGB value.
	pub const fn to_argb32(&self) -> u32 {
		((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
	}

	/// Returns true if every channel is zero.
	#[inline]
	pub const fn is_transparent_black(&self) -> bool {
		self.to_argb32() == 0
	}

	/// Blends linearly towards `end`, channel by channel.
	///
	/// Each channel is computed as `start + (end - start) * step / steps`
	/// with integer division truncating towards zero.
	///
	/// `steps` must be non-zero.
	pub fn lerp(&self, end: Color, step: u32, steps: u32) -> Color {
		let blend = |start: u8, end: u8| -> u8 {
			let start = i64::from(start);
			let delta = i64::from(end) - start;
			(start + delta * i64::from(step) / i64::from(steps)) as u8
		};

		Color::argb(
			blend(self.a, end.a),
			blend(self.r, end.r),
			blend(self.g, end.g),
			blend(self.b, end.b),
		)
	}
}

impl From<u32> for Color {
	fn from(value: u32) -> Self {
		Self::from_argb32(value)
	}
}

impl From<Color> for u32 {
	fn from(color: Color) -> Self {
		color.to_argb32()
	}
}

impl From<image::Rgba<u8>> for Color {
	fn from(pixel: image::Rgba<u8>) -> Self {
		let [r, g, b, a] = pixel.0;
		Self::argb(a, r, g, b)
	}
}

impl From<Color> for image::Rgba<u8> {
	fn from(color: Color) -> Self {
		image::Rgba([color.r, color.g, color.b, color.a])
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:08X}", self.to_argb32())
	}
}
