//! The closeable image capability and a CPU-backed implementation.
//!
//! Frames never touch pixel storage directly. They go through
//! [`CloseableImage`], which a GPU-adjacent native wrapper or the in-memory
//! [`PixelImage`] can satisfy. Uploads are pushed to an [`UploadTarget`],
//! such as a [`Canvas`] standing in for one mip level of a texture.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::color::Color;
use crate::point::{Area, Point};

/// A rectangular pixel buffer with an explicit lifetime.
///
/// An image is owned by exactly one frame slot and is closed exactly once
/// when that slot releases it. Coordinates passed to [`color`] and
/// [`set_color`] must lie inside the image.
///
/// [`color`]: CloseableImage::color
/// [`set_color`]: CloseableImage::set_color
pub trait CloseableImage {
	/// Returns the width in pixels.
	fn width(&self) -> u32;

	/// Returns the height in pixels.
	fn height(&self) -> u32;

	/// Returns the color of a pixel.
	fn color(&self, x: u32, y: u32) -> Color;

	/// Sets the color of a pixel.
	fn set_color(&mut self, x: u32, y: u32, color: Color);

	/// Returns the pixels that differ from transparent black.
	fn visible_area(&self) -> &Area;

	/// Uploads the whole image to its render target with its top-left
	/// corner at `(x, y)`.
	fn upload(&self, x: u32, y: u32);

	/// Releases the image's resources. Closing twice is harmless.
	fn close(&mut self);

	/// Returns true once the image has been closed.
	fn is_closed(&self) -> bool;
}

/// Receiver of image uploads, typically one mip level of a GPU texture.
pub trait UploadTarget {
	/// Copies a `width`×`height` block of pixels to `(x, y)`.
	fn receive(&mut self, x: u32, y: u32, width: u32, height: u32, pixels: &[Color]);
}

/// Shared handle to an upload target.
pub type SharedUploadTarget = Rc<RefCell<dyn UploadTarget>>;

/// An in-memory image that tracks its visible area.
pub struct PixelImage {
	width: u32,
	height: u32,
	pixels: Vec<Color>,
	visible: Area,
	closed: bool,
	target: Option<SharedUploadTarget>,
}

impl PixelImage {
	/// Creates a transparent image.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			pixels: vec![Color::TRANSPARENT; (width as usize) * (height as usize)],
			visible: Area::new(),
			closed: false,
			target: None,
		}
	}

	/// Creates an image from packed ARGB values in row-major order.
	///
	/// # Panics
	///
	/// Panics if the number of values doesn't match the dimensions.
	pub fn from_argb(width: u32, height: u32, values: &[u32]) -> Self {
		assert_eq!(values.len(), (width as usize) * (height as usize), "Pixel data size mismatch");

		let mut image = Self::new(width, height);
		for (index, &value) in values.iter().enumerate() {
			let index = index as u32;
			image.set_color(index % width, index / width, Color::from_argb32(value));
		}
		image
	}

	/// Copies pixels out of an RGBA image.
	pub fn from_rgba(source: &image::RgbaImage) -> Self {
		let mut image = Self::new(source.width(), source.height());
		for (x, y, pixel) in source.enumerate_pixels() {
			image.set_color(x, y, Color::from(*pixel));
		}
		image
	}

	/// Copies a rectangular region out of an RGBA image.
	///
	/// The region is clipped to the source bounds.
	pub fn from_rgba_region(
		source: &image::RgbaImage,
		x_offset: u32,
		y_offset: u32,
		width: u32,
		height: u32,
	) -> Self {
		let mut image = Self::new(width, height);
		for y in 0..height {
			for x in 0..width {
				if let Some(pixel) = source.get_pixel_checked(x_offset + x, y_offset + y) {
					image.set_color(x, y, Color::from(*pixel));
				}
			}
		}
		image
	}

	/// Converts the image to an RGBA image.
	pub fn to_rgba(&self) -> image::RgbaImage {
		image::RgbaImage::from_fn(self.width, self.height, |x, y| self.color(x, y).into())
	}

	/// Sets the target that receives this image's uploads.
	pub fn set_target(&mut self, target: SharedUploadTarget) {
		self.target = Some(target);
	}

	/// Builder-style variant of [`set_target`](Self::set_target).
	pub fn with_target(mut self, target: SharedUploadTarget) -> Self {
		self.set_target(target);
		self
	}

	#[inline]
	fn index(&self, x: u32, y: u32) -> usize {
		assert!(x < self.width && y < self.height, "Pixel ({x}, {y}) out of bounds");
		(y as usize) * (self.width as usize) + (x as usize)
	}
}

impl CloseableImage for PixelImage {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn color(&self, x: u32, y: u32) -> Color {
		self.pixels[self.index(x, y)]
	}

	fn set_color(&mut self, x: u32, y: u32, color: Color) {
		let index = self.index(x, y);
		self.pixels[index] = color;

		let point = Point::new(x as i32, y as i32);
		if color.is_transparent_black() {
			self.visible.remove(point);
		} else {
			self.visible.insert(point);
		}
	}

	fn visible_area(&self) -> &Area {
		&self.visible
	}

	fn upload(&self, x: u32, y: u32) {
		if self.closed {
			log::warn!("Ignoring upload of closed {}×{} image", self.width, self.height);
			return;
		}

		log::trace!("Uploading {}×{} image at ({}, {})", self.width, self.height, x, y);
		if let Some(target) = &self.target {
			target.borrow_mut().receive(x, y, self.width, self.height, &self.pixels);
		}
	}

	fn close(&mut self) {
		if self.closed {
			return;
		}
		self.closed = true;
		self.pixels = Vec::new();
		self.visible = Area::new();
	}

	fn is_closed(&self) -> bool {
		self.closed
	}
}

impl fmt::Debug for PixelImage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PixelImage")
			.field("width", &self.width)
			.field("height", &self.height)
			.field("visible", &self.visible.len())
			.field("closed", &self.closed)
			.finish()
	}
}

/// An in-memory upload target.
///
/// Uploaded blocks are copied into an RGBA image; pixels that fall outside
/// the canvas are dropped.
#[derive(Debug, Clone)]
pub struct Canvas {
	image: image::RgbaImage,
	uploads: usize,
}

impl Canvas {
	/// Creates a transparent canvas.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			image: image::RgbaImage::new(width, height),
			uploads: 0,
		}
	}

	/// Wraps a canvas in a shared handle suitable for [`PixelImage::set_target`].
	pub fn shared(width: u32, height: u32) -> Rc<RefCell<Canvas>> {
		Rc::new(RefCell::new(Self::new(width, height)))
	}

	/// Returns the canvas contents.
	pub fn image(&self) -> &image::RgbaImage {
		&self.image
	}

	/// Returns the color at a canvas position.
	pub fn color(&self, x: u32, y: u32) -> Option<Color> {
		self.image.get_pixel_checked(x, y).map(|pixel| Color::from(*pixel))
	}

	/// Returns how many uploads the canvas has received.
	pub fn upload_count(&self) -> usize {
		self.uploads
	}
}

impl UploadTarget for Canvas {
	fn receive(&mut self, x: u32, y: u32, width: u32, height: u32, pixels: &[Color]) {
		self.uploads += 1;
		for row in 0..height {
			for column in 0..width {
				let Some(&color) = pixels.get((row as usize) * (width as usize) + column as usize)
				else {
					return;
				};
				if let Some(pixel) = self.image.get_pixel_mut_checked(x + column, y + row) {
					*pixel = color.into();
				}
			}
		}
	}
}
