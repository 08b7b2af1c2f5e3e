//! Partitioning of a source image into a grid of animation frames.
//!
//! Animated textures store their frames side by side in one image. The
//! reader walks the image in row-major order and hands a [`FrameData`]
//! describing each full frame to a caller-provided factory.
//!
//! ```text
//! image 100×70, frames 30×35
//!
//!  0      30     60     90  100
//!  +------+------+------+---+
//!  |  0   |  1   |  2   |   |   row 0
//!  +------+------+------+   |
//!  |  3   |  4   |  5   |   |   row 1
//!  +------+------+------+---+
//! ```
//!
//! Trailing strips that cannot hold a full frame (the last 10 pixel columns
//! above) are skipped.

use std::fmt;

use crate::error::TextureError;

/// Layout and timing of a single frame inside a larger image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameData {
	width: u32,
	height: u32,
	x_offset: u32,
	y_offset: u32,
	time: Option<u32>,
}

impl FrameData {
	/// Creates frame data without a frame time.
	///
	/// # Arguments
	///
	/// * `width` - Frame width in pixels
	/// * `height` - Frame height in pixels
	/// * `x_offset` - Horizontal offset of the frame inside its source image
	/// * `y_offset` - Vertical offset of the frame inside its source image
	pub const fn new(width: u32, height: u32, x_offset: u32, y_offset: u32) -> Self {
		Self {
			width,
			height,
			x_offset,
			y_offset,
			time: None,
		}
	}

	/// Returns a copy of this frame data with the given frame time.
	///
	/// `None` means "use the animation's default frame time".
	pub const fn with_time(mut self, time: Option<u32>) -> Self {
		self.time = time;
		self
	}

	/// Returns the frame width.
	#[inline]
	pub const fn width(&self) -> u32 {
		self.width
	}

	/// Returns the frame height.
	#[inline]
	pub const fn height(&self) -> u32 {
		self.height
	}

	/// Returns the horizontal offset.
	#[inline]
	pub const fn x_offset(&self) -> u32 {
		self.x_offset
	}

	/// Returns the vertical offset.
	#[inline]
	pub const fn y_offset(&self) -> u32 {
		self.y_offset
	}

	/// Returns the frame time in ticks, if one was specified.
	#[inline]
	pub const fn time(&self) -> Option<u32> {
		self.time
	}
}

impl fmt::Display for FrameData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} at ({}, {})", self.width, self.height, self.x_offset, self.y_offset)?;
		if let Some(time) = self.time {
			write!(f, " for {time} ticks")?;
		}
		Ok(())
	}
}

/// Reads frames out of an image using a frame factory.
///
/// # Examples
///
/// ```
/// use animtex_types::frame_reader::{FrameData, FrameReader};
///
/// let reader = FrameReader::new(|data: FrameData| Some(data));
/// let frames = reader.read(100, 70, 30, 35)?;
///
/// assert_eq!(frames.len(), 6);
/// assert_eq!(frames[2], FrameData::new(30, 35, 60, 0));
/// # Ok::<(), animtex_types::TextureError>(())
/// ```
pub struct FrameReader<F> {
	factory: Box<dyn Fn(FrameData) -> Option<F>>,
}

impl<F> FrameReader<F> {
	/// Creates a reader around a frame factory.
	///
	/// The factory is called once per frame, in frame order. Returning `None`
	/// aborts the read with [`TextureError::MissingFrame`].
	pub fn new(factory: impl Fn(FrameData) -> Option<F> + 'static) -> Self {
		Self {
			factory: Box::new(factory),
		}
	}

	/// Reads every full frame out of an image.
	///
	/// # Arguments
	///
	/// * `image_width` - Width of the whole image
	/// * `image_height` - Height of the whole image
	/// * `frame_width` - Width of one frame
	/// * `frame_height` - Height of one frame
	///
	/// # Returns
	///
	/// `floor(image_width / frame_width) * floor(image_height / frame_height)`
	/// frames, with the column index incrementing fastest.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - Any dimension is zero or negative
	/// - The factory returns `None` for any frame
	pub fn read(
		&self,
		image_width: i32,
		image_height: i32,
		frame_width: i32,
		frame_height: i32,
	) -> Result<Vec<F>, TextureError> {
		let image_width = require_positive("image width", image_width)?;
		let image_height = require_positive("image height", image_height)?;
		let frame_width = require_positive("frame width", frame_width)?;
		let frame_height = require_positive("frame height", frame_height)?;

		let columns = image_width / frame_width;
		let rows = image_height / frame_height;
		// Grids can exceed u32 cells, so the length is not preallocated.
		let mut frames = Vec::new();

		for row in 0..rows {
			for column in 0..columns {
				let index = frames.len();
				let data =
					FrameData::new(frame_width, frame_height, column * frame_width, row * frame_height);

				let frame = (self.factory)(data).ok_or(TextureError::MissingFrame {
					index,
				})?;
				frames.push(frame);
			}
		}

		log::trace!(
			"Read {} frames of {}×{} from {}×{} image",
			frames.len(),
			frame_width,
			frame_height,
			image_width,
			image_height
		);
		Ok(frames)
	}
}

impl<F> fmt::Debug for FrameReader<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FrameReader").finish_non_exhaustive()
	}
}

fn require_positive(name: &'static str, value: i32) -> Result<u32, TextureError> {
	if value <= 0 {
		return Err(TextureError::InvalidDimension {
			name,
			value: i64::from(value),
		});
	}
	Ok(value as u32)
}
