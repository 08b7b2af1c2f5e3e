//! The mutable view of a texture handed to listeners.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::frame::CloseableImageFrame;

/// Process-unique identifier of an [`EventDrivenTexture`](super::EventDrivenTexture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
	pub(crate) fn next() -> Self {
		static NEXT_ID: AtomicU64 = AtomicU64::new(1);
		Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw identifier.
	#[inline]
	pub fn get(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for TextureId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "texture#{}", self.0)
	}
}

/// Texture state seen by one listener during one dispatch.
///
/// Reading the image through [`image`](Self::image) conservatively marks
/// the texture as needing an upload, since the caller may change pixels.
pub struct TextureState<'a> {
	texture_id: TextureId,
	image: &'a mut CloseableImageFrame,
	needs_upload: &'a mut bool,
}

impl<'a> TextureState<'a> {
	pub(crate) fn new(
		texture_id: TextureId,
		image: &'a mut CloseableImageFrame,
		needs_upload: &'a mut bool,
	) -> Self {
		Self {
			texture_id,
			image,
			needs_upload,
		}
	}

	/// Returns the texture's current frame and marks it for upload.
	pub fn image(&mut self) -> &mut CloseableImageFrame {
		*self.needs_upload = true;
		&mut *self.image
	}

	/// Swaps in a new frame and marks the texture for upload.
	///
	/// Returns the previous frame. Dropping it closes its images.
	pub fn replace_image(&mut self, frame: CloseableImageFrame) -> CloseableImageFrame {
		*self.needs_upload = true;
		std::mem::replace(self.image, frame)
	}

	/// Requests an upload before the texture is next bound.
	#[inline]
	pub fn mark_needs_upload(&mut self) {
		*self.needs_upload = true;
	}

	/// Returns true if an upload has been requested since the last one.
	#[inline]
	pub fn needs_upload(&self) -> bool {
		*self.needs_upload
	}

	/// Returns the identifier of the texture being dispatched.
	#[inline]
	pub fn texture_id(&self) -> TextureId {
		self.texture_id
	}
}

impl fmt::Debug for TextureState<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextureState")
			.field("texture_id", &self.texture_id)
			.field("image", &self.image)
			.field("needs_upload", &self.needs_upload)
			.finish()
	}
}
