//! Linear blending between two frames.

use crate::closeable_image::CloseableImage;
use crate::color::Color;
use crate::error::TextureError;
use crate::frame::CloseableImageFrame;

/// Synthesizes in-between frames by blending ARGB channels.
///
/// The interpolator owns a reusable result frame. Each call overwrites the
/// result's pixels at every level both input frames share; the result's own
/// visible pixels are always revisited so nothing from an earlier call
/// survives.
///
/// When the inputs expose fewer mipmap levels than the result, the result
/// is lowered to match. Levels never grow back.
#[derive(Debug)]
pub struct RgbaInterpolator {
	result: CloseableImageFrame,
}

impl RgbaInterpolator {
	/// Creates an interpolator that writes into `result`.
	pub fn new(result: CloseableImageFrame) -> Self {
		Self {
			result,
		}
	}

	/// Blends `start` towards `end`.
	///
	/// # Arguments
	///
	/// * `steps` - Number of steps between the two frames, usually the
	///   duration of `start` in ticks
	/// * `step` - Position between the frames, strictly between 0 and `steps`
	/// * `start` - Frame at step 0
	/// * `end` - Frame at step `steps`
	///
	/// # Returns
	///
	/// The result frame, where every channel equals
	/// `start + (end - start) * step / steps`, truncated.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `step` is not in `1..steps`
	/// - Any involved frame has been closed
	pub fn interpolate(
		&mut self,
		steps: u32,
		step: u32,
		start: &CloseableImageFrame,
		end: &CloseableImageFrame,
	) -> Result<&CloseableImageFrame, TextureError> {
		if step < 1 || step >= steps {
			return Err(TextureError::InvalidInterpolationStep {
				step,
				steps,
			});
		}

		let shared_levels = start.mipmap_level().min(end.mipmap_level());
		if self.result.mipmap_level() > shared_levels {
			log::debug!(
				"Lowering interpolation result to mipmap level {} to match its inputs",
				shared_levels
			);
			self.result.lower_mipmap_level(shared_levels)?;
		}

		for level in 0..=self.result.mipmap_level() {
			let from = start.image(level)?;
			let to = end.image(level)?;
			let mut output = self.result.image_mut(level)?;

			let mut area = output.visible_area().union(from.visible_area());
			area.extend_from(to.visible_area());

			for point in &area {
				let (x, y) = (point.x() as u32, point.y() as u32);
				if x >= output.width() || y >= output.height() {
					continue;
				}

				let sample = |image: &dyn CloseableImage| {
					if x < image.width() && y < image.height() {
						image.color(x, y)
					} else {
						Color::TRANSPARENT
					}
				};
				let color = sample(&*from).lerp(sample(&*to), step, steps);
				output.set_color(x, y, color);
			}
		}

		Ok(&self.result)
	}

	/// Returns the result of the last interpolation.
	pub fn result(&self) -> &CloseableImageFrame {
		&self.result
	}

	/// Gives back the result frame.
	pub fn into_result(self) -> CloseableImageFrame {
		self.result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::closeable_image::PixelImage;
	use crate::frame_reader::FrameData;
	use crate::mipmap::SharedMipmapLevel;

	fn frame(values: &[u32], levels: Vec<PixelImage>, shared: &SharedMipmapLevel) -> CloseableImageFrame {
		let mut chain = vec![PixelImage::from_argb(2, 1, values)];
		chain.extend(levels);
		CloseableImageFrame::from_images(FrameData::new(2, 1, 0, 0), chain, shared.clone()).unwrap()
	}

	fn result_frame(max_level: usize) -> CloseableImageFrame {
		let shared = SharedMipmapLevel::new(max_level);
		let mut chain = vec![PixelImage::new(2, 1), PixelImage::new(1, 1)];
		chain.truncate(max_level + 1);
		CloseableImageFrame::from_images(FrameData::new(2, 1, 0, 0), chain, shared).unwrap()
	}

	#[test_log::test]
	fn test_rejects_endpoints() {
		let shared = SharedMipmapLevel::new(0);
		let start = frame(&[0, 0], Vec::new(), &shared);
		let end = frame(&[0, 0], Vec::new(), &shared);
		let mut interpolator = RgbaInterpolator::new(result_frame(0));

		assert!(matches!(
			interpolator.interpolate(4, 0, &start, &end),
			Err(TextureError::InvalidInterpolationStep {
				step: 0,
				steps: 4
			})
		));
		assert!(interpolator.interpolate(4, 4, &start, &end).is_err());
		assert!(interpolator.interpolate(4, 5, &start, &end).is_err());
		assert!(interpolator.interpolate(1, 1, &start, &end).is_err());
		assert!(interpolator.interpolate(4, 3, &start, &end).is_ok());
	}

	#[test_log::test]
	fn test_blends_each_channel() {
		let shared = SharedMipmapLevel::new(0);
		let start = frame(&[0x0A14_1E28, 0xFF00_0000], Vec::new(), &shared);
		let end = frame(&[0x1E14_0A00, 0x0000_0000], Vec::new(), &shared);
		let mut interpolator = RgbaInterpolator::new(result_frame(0));

		let result = interpolator.interpolate(3, 1, &start, &end).unwrap();
		let image = result.image(0).unwrap();

		// a: 10 + 20/3, r: 20, g: 30 - 20/3, b: 40 - 40/3
		assert_eq!(image.color(0, 0), Color::argb(16, 20, 24, 27));
		assert_eq!(image.color(1, 0), Color::argb(170, 0, 0, 0));
	}

	#[test_log::test]
	fn test_clears_stale_pixels() {
		let shared = SharedMipmapLevel::new(0);
		let visible = frame(&[0xFFFF_FFFF, 0xFFFF_FFFF], Vec::new(), &shared);
		let empty = frame(&[0, 0], Vec::new(), &shared);
		let other_empty = frame(&[0, 0], Vec::new(), &shared);
		let mut interpolator = RgbaInterpolator::new(result_frame(0));

		interpolator.interpolate(2, 1, &visible, &empty).unwrap();
		assert_eq!(interpolator.result().image(0).unwrap().visible_area().len(), 2);

		interpolator.interpolate(2, 1, &empty, &other_empty).unwrap();
		assert!(interpolator.result().image(0).unwrap().visible_area().is_empty());
	}

	#[test_log::test]
	fn test_lowers_result_to_shortest_chain() {
		let long_level = SharedMipmapLevel::new(1);
		let short_level = SharedMipmapLevel::new(0);
		let start = frame(&[0xFF00_0000, 0], vec![PixelImage::from_argb(1, 1, &[0xFF00_0000])], &long_level);
		let end = frame(&[0, 0], Vec::new(), &short_level);
		let mut interpolator = RgbaInterpolator::new(result_frame(1));

		let result = interpolator.interpolate(2, 1, &start, &end).unwrap();
		assert_eq!(result.mipmap_level(), 0);
		assert!(result.image(1).is_err());

		let longer = frame(&[0, 0], vec![PixelImage::new(1, 1)], &long_level);
		let result = interpolator.interpolate(2, 1, &start, &longer).unwrap();
		assert_eq!(result.mipmap_level(), 0);
	}

	#[test_log::test]
	fn test_interpolates_every_shared_level() {
		let shared = SharedMipmapLevel::new(1);
		let start = frame(&[0, 0], vec![PixelImage::from_argb(1, 1, &[0x6400_0000])], &shared);
		let end = frame(&[0, 0], vec![PixelImage::from_argb(1, 1, &[0xC800_0000])], &shared);
		let mut interpolator = RgbaInterpolator::new(result_frame(1));

		let result = interpolator.interpolate(4, 1, &start, &end).unwrap();
		assert_eq!(result.image(1).unwrap().color(0, 0), Color::argb(125, 0, 0, 0));
		assert!(result.image(0).unwrap().visible_area().is_empty());
	}
}
