//! Frames backed by a closeable mipmap chain.

use std::cell::{Ref, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::closeable_image::CloseableImage;
use crate::color::Color;
use crate::error::TextureError;
use crate::frame_reader::FrameData;
use crate::mipmap::{FrameChain, MipmapChain, SharedMipmapLevel};
use crate::point::Point;

/// Shared borrow of one mipmap image.
pub type ImageRef<'a> = Ref<'a, dyn CloseableImage + 'static>;

/// Exclusive borrow of one mipmap image.
pub type ImageRefMut<'a> = RefMut<'a, dyn CloseableImage + 'static>;

/// A frame that owns a chain of same-content images at decreasing resolutions.
///
/// Level 0 is full resolution; level `L` is scaled by `1 / 2^L` in each
/// dimension. The frame follows a [`SharedMipmapLevel`]: whenever the
/// shared level is lowered, images above it are closed. Dropping the frame
/// closes every image it still holds.
pub struct CloseableImageFrame {
	data: FrameData,
	chain: Rc<FrameChain>,
	shared_level: SharedMipmapLevel,
}

impl CloseableImageFrame {
	/// Creates a frame and subscribes it to the shared mipmap level.
	///
	/// If the shared level is already below the top of `mipmaps`, the extra
	/// images are closed right away.
	///
	/// # Arguments
	///
	/// * `data` - Size and offset of the frame at level 0
	/// * `mipmaps` - Images from full resolution downwards
	/// * `shared_level` - Level shared by all frames of the texture
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `mipmaps` is empty
	/// - The shared level is not a valid index into `mipmaps`
	pub fn new(
		data: FrameData,
		mipmaps: Vec<Box<dyn CloseableImage>>,
		shared_level: SharedMipmapLevel,
	) -> Result<Self, TextureError> {
		if mipmaps.is_empty() {
			return Err(TextureError::EmptyMipmapChain);
		}

		let level = shared_level.level();
		if level >= mipmaps.len() {
			return Err(TextureError::SharedLevelTooHigh {
				level,
				count: mipmaps.len(),
			});
		}

		let mut chain = MipmapChain::new(mipmaps);
		chain.lower_to(level);

		let chain = Rc::new(FrameChain::new(chain));
		shared_level.subscribe(&chain);

		Ok(Self {
			data,
			chain,
			shared_level,
		})
	}

	/// Creates a frame from concrete images.
	///
	/// See [`new`](Self::new) for the errors.
	pub fn from_images<I: CloseableImage + 'static>(
		data: FrameData,
		mipmaps: Vec<I>,
		shared_level: SharedMipmapLevel,
	) -> Result<Self, TextureError> {
		let mipmaps = mipmaps.into_iter().map(|image| Box::new(image) as Box<dyn CloseableImage>);
		Self::new(data, mipmaps.collect(), shared_level)
	}

	/// Returns the frame layout.
	#[inline]
	pub fn data(&self) -> &FrameData {
		&self.data
	}

	/// Returns the width at level 0.
	#[inline]
	pub fn width(&self) -> u32 {
		self.data.width()
	}

	/// Returns the height at level 0.
	#[inline]
	pub fn height(&self) -> u32 {
		self.data.height()
	}

	/// Returns the horizontal offset at level 0.
	#[inline]
	pub fn x_offset(&self) -> u32 {
		self.data.x_offset()
	}

	/// Returns the vertical offset at level 0.
	#[inline]
	pub fn y_offset(&self) -> u32 {
		self.data.y_offset()
	}

	/// Returns the frame time, if one was specified.
	#[inline]
	pub fn frame_time(&self) -> Option<u32> {
		self.data.time()
	}

	/// Returns the highest mipmap level still available.
	pub fn mipmap_level(&self) -> usize {
		self.chain.ceiling(&self.chain.borrow())
	}

	/// Returns the number of mipmaps the frame was created with.
	pub fn mipmap_count(&self) -> usize {
		self.chain.borrow().count()
	}

	/// Returns the shared level this frame follows.
	pub fn shared_level(&self) -> &SharedMipmapLevel {
		&self.shared_level
	}

	/// Borrows the image at a mipmap level.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `level` is not below the mipmap count
	/// - `level` is above the current mipmap level
	/// - The frame has been closed
	pub fn image(&self, level: usize) -> Result<ImageRef<'_>, TextureError> {
		let chain = self.chain.borrow();
		chain.check_level(level, self.chain.ceiling(&chain))?;
		Ref::filter_map(chain, |chain| chain.get(level)).map_err(|_| TextureError::ImageClosed {
			level,
		})
	}

	/// Mutably borrows the image at a mipmap level.
	///
	/// Fails in the same cases as [`image`](Self::image).
	pub fn image_mut(&mut self, level: usize) -> Result<ImageRefMut<'_>, TextureError> {
		let chain = self.chain.borrow_mut();
		chain.check_level(level, self.chain.ceiling(&chain))?;
		RefMut::filter_map(chain, |chain| chain.get_mut(level)).map_err(|_| {
			TextureError::ImageClosed {
				level,
			}
		})
	}

	/// Uploads every available mipmap, with level 0 placed at `point`.
	///
	/// Level `L` is uploaded at `point >> L`. Levels whose image has no
	/// pixels are skipped.
	///
	/// # Errors
	///
	/// Returns [`TextureError::NegativePoint`] if either coordinate is negative.
	pub fn upload_at(&self, point: Point) -> Result<(), TextureError> {
		point.require_non_negative()?;

		let chain = self.chain.borrow();
		for level in 0..=self.chain.ceiling(&chain) {
			let Some(image) = chain.get(level) else {
				continue;
			};
			if image.width() == 0 || image.height() == 0 {
				log::trace!("Skipping upload of empty mipmap level {level}");
				continue;
			}

			let scaled = point.scale_to_level(level);
			image.upload(scaled.x() as u32, scaled.y() as u32);
		}
		Ok(())
	}

	/// Lowers this frame's mipmap level, closing the images above it.
	///
	/// Lowering to the current level does nothing. The shared level is
	/// not affected.
	///
	/// # Errors
	///
	/// Returns [`TextureError::RaiseMipmapLevel`] if `new_level` is above the
	/// current level.
	pub fn lower_mipmap_level(&mut self, new_level: usize) -> Result<(), TextureError> {
		let mut chain = self.chain.borrow_mut();
		if new_level > chain.level() {
			return Err(TextureError::RaiseMipmapLevel {
				requested: new_level,
				current: chain.level(),
			});
		}
		chain.lower_to(new_level);
		Ok(())
	}

	/// Copies the pixels of another frame into this one.
	///
	/// Every level available in both frames is copied. Only pixels visible
	/// in either frame are visited; positions outside `source` become
	/// transparent.
	///
	/// # Errors
	///
	/// Returns [`TextureError::ImageClosed`] if either frame has been closed.
	pub fn copy_from(&mut self, source: &CloseableImageFrame) -> Result<(), TextureError> {
		let source_chain = source.chain.borrow();
		let mut chain = self.chain.borrow_mut();
		let levels = chain.level().min(source.chain.ceiling(&source_chain));

		for level in 0..=levels {
			let from = source_chain.get(level).ok_or(TextureError::ImageClosed {
				level,
			})?;
			let to = chain.get_mut(level).ok_or(TextureError::ImageClosed {
				level,
			})?;

			let area = to.visible_area().union(from.visible_area());
			for point in &area {
				let (x, y) = (point.x() as u32, point.y() as u32);
				if x >= to.width() || y >= to.height() {
					continue;
				}

				let color = if x < from.width() && y < from.height() {
					from.color(x, y)
				} else {
					Color::TRANSPARENT
				};
				to.set_color(x, y, color);
			}
		}
		Ok(())
	}

	/// Closes every image the frame still holds. Closing twice is harmless.
	pub fn close(&mut self) {
		let mut chain = self.chain.borrow_mut();
		if !chain.is_closed() {
			log::debug!("Closing frame {}", self.data);
			chain.close_all();
		}
	}

	/// Returns true once every image has been closed.
	pub fn is_closed(&self) -> bool {
		self.chain.borrow().is_closed()
	}

	pub(crate) fn chain(&self) -> &Rc<FrameChain> {
		&self.chain
	}
}

impl fmt::Debug for CloseableImageFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CloseableImageFrame")
			.field("data", &self.data)
			.field("mipmap_level", &self.mipmap_level())
			.field("mipmap_count", &self.mipmap_count())
			.finish()
	}
}
