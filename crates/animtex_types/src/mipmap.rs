//! Mipmap chains and the mipmap level shared by the frames of one texture.
//!
//! Every frame of an animation owns its own chain of images, but all of
//! them must expose the same number of levels. [`SharedMipmapLevel`] holds
//! that ceiling. Lowering it closes the now-unreachable images of every
//! subscribed frame, right away unless that frame has an image borrowed.
//!
//! Subscribers are held weakly, so frames own the shared level and never the
//! other way round.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::closeable_image::{CloseableImage, PixelImage};
use crate::color::Color;
use crate::error::TextureError;
use crate::frame::CloseableImageFrame;

/// The images of one frame, index 0 being full resolution.
///
/// Slots above `level` are closed and emptied.
pub(crate) struct MipmapChain {
	images: Vec<Option<Box<dyn CloseableImage>>>,
	level: usize,
}

impl MipmapChain {
	pub(crate) fn new(images: Vec<Box<dyn CloseableImage>>) -> Self {
		let level = images.len().saturating_sub(1);
		Self {
			images: images.into_iter().map(Some).collect(),
			level,
		}
	}

	#[inline]
	pub(crate) fn level(&self) -> usize {
		self.level
	}

	#[inline]
	pub(crate) fn count(&self) -> usize {
		self.images.len()
	}

	/// Checks that `level` exists and is not above `ceiling`.
	pub(crate) fn check_level(&self, level: usize, ceiling: usize) -> Result<(), TextureError> {
		if level >= self.images.len() {
			return Err(TextureError::MipmapLevelOutOfRange {
				level,
				count: self.images.len(),
			});
		}
		if level > ceiling {
			return Err(TextureError::MipmapLevelAboveCeiling {
				level,
				current: ceiling,
			});
		}
		Ok(())
	}

	pub(crate) fn get(&self, level: usize) -> Option<&(dyn CloseableImage + 'static)> {
		self.images.get(level).and_then(|slot| slot.as_deref())
	}

	pub(crate) fn get_mut(&mut self, level: usize) -> Option<&mut (dyn CloseableImage + 'static)> {
		self.images.get_mut(level).and_then(|slot| slot.as_deref_mut())
	}

	/// Closes every image above `new_level`. Levels at or above the
	/// current one are left alone.
	pub(crate) fn lower_to(&mut self, new_level: usize) {
		if new_level >= self.level {
			return;
		}

		for slot in &mut self.images[new_level + 1..=self.level] {
			if let Some(mut image) = slot.take() {
				image.close();
			}
		}
		log::debug!("Lowered mipmap level from {} to {}", self.level, new_level);
		self.level = new_level;
	}

	pub(crate) fn close_all(&mut self) {
		for slot in &mut self.images {
			if let Some(mut image) = slot.take() {
				image.close();
			}
		}
	}

	pub(crate) fn is_closed(&self) -> bool {
		self.images.iter().all(Option::is_none)
	}
}

impl Drop for MipmapChain {
	fn drop(&mut self) {
		self.close_all();
	}
}

/// A frame's mipmap chain as seen by its [`SharedMipmapLevel`].
///
/// A broadcast can reach a frame while one of its images is borrowed. The
/// lowering is then kept as pending and applied on the next access that can
/// take the chain mutably. Until then, [`ceiling`](Self::ceiling) already
/// reports the lowered level, so images above it are never handed out.
pub(crate) struct FrameChain {
	chain: RefCell<MipmapChain>,
	pending: Cell<Option<usize>>,
}

impl FrameChain {
	pub(crate) fn new(chain: MipmapChain) -> Self {
		Self {
			chain: RefCell::new(chain),
			pending: Cell::new(None),
		}
	}

	/// Lowers the chain now, or as soon as no image borrow is alive.
	pub(crate) fn lower_to(&self, new_level: usize) {
		match self.chain.try_borrow_mut() {
			Ok(mut chain) => chain.lower_to(new_level),
			Err(_) => {
				let level = self.pending.get().map_or(new_level, |pending| pending.min(new_level));
				log::debug!("Chain busy, deferring lowering to mipmap level {level}");
				self.pending.set(Some(level));
			}
		}
	}

	pub(crate) fn borrow(&self) -> Ref<'_, MipmapChain> {
		self.apply_pending();
		self.chain.borrow()
	}

	pub(crate) fn borrow_mut(&self) -> RefMut<'_, MipmapChain> {
		self.apply_pending();
		self.chain.borrow_mut()
	}

	/// Highest level that may be accessed, counting a pending lowering.
	pub(crate) fn ceiling(&self, chain: &MipmapChain) -> usize {
		self.pending.get().map_or(chain.level(), |pending| pending.min(chain.level()))
	}

	fn apply_pending(&self) {
		let Some(level) = self.pending.get() else {
			return;
		};
		if let Ok(mut chain) = self.chain.try_borrow_mut() {
			self.pending.set(None);
			chain.lower_to(level);
		}
	}
}

struct LevelState {
	level: usize,
	subscribers: Vec<Weak<FrameChain>>,
}

/// A mipmap level that can only be lowered, shared by reference.
///
/// Cloning the handle shares the same level.
///
/// # Examples
///
/// ```
/// use animtex_types::mipmap::SharedMipmapLevel;
///
/// let level = SharedMipmapLevel::new(4);
/// level.lower_mipmap_level(2)?;
/// assert_eq!(level.level(), 2);
/// assert!(level.lower_mipmap_level(3).is_err());
/// # Ok::<(), animtex_types::TextureError>(())
/// ```
#[derive(Clone)]
pub struct SharedMipmapLevel {
	state: Rc<RefCell<LevelState>>,
}

impl SharedMipmapLevel {
	/// Creates a shared level, usually the highest index of a mipmap chain.
	pub fn new(level: usize) -> Self {
		Self {
			state: Rc::new(RefCell::new(LevelState {
				level,
				subscribers: Vec::new(),
			})),
		}
	}

	/// Returns the current level.
	pub fn level(&self) -> usize {
		self.state.borrow().level
	}

	/// Lowers the level and closes the extra mipmaps of every subscribed frame.
	///
	/// Subscribers are notified synchronously, in subscription order. Lowering
	/// to the current level does nothing.
	///
	/// # Errors
	///
	/// Returns [`TextureError::RaiseMipmapLevel`] if `new_level` is above the
	/// current level.
	pub fn lower_mipmap_level(&self, new_level: usize) -> Result<(), TextureError> {
		let subscribers = {
			let mut state = self.state.borrow_mut();
			if new_level > state.level {
				return Err(TextureError::RaiseMipmapLevel {
					requested: new_level,
					current: state.level,
				});
			}
			if new_level == state.level {
				return Ok(());
			}

			state.level = new_level;
			state.subscribers.retain(|subscriber| subscriber.strong_count() > 0);
			state.subscribers.clone()
		};

		// The state borrow is released so subscribers may re-enter. Frames
		// dropped by an earlier subscriber's close fail to upgrade.
		for subscriber in subscribers {
			if let Some(chain) = subscriber.upgrade() {
				chain.lower_to(new_level);
			}
		}
		Ok(())
	}

	/// Subscribes a frame to future lowering of this level.
	///
	/// Subscribing the same frame twice has no effect.
	pub fn add_subscriber(&self, frame: &CloseableImageFrame) {
		self.subscribe(frame.chain());
	}

	/// Returns the number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.state
			.borrow()
			.subscribers
			.iter()
			.filter(|subscriber| subscriber.strong_count() > 0)
			.count()
	}

	pub(crate) fn subscribe(&self, chain: &Rc<FrameChain>) {
		let weak = Rc::downgrade(chain);
		let mut state = self.state.borrow_mut();
		if state.subscribers.iter().any(|subscriber| subscriber.ptr_eq(&weak)) {
			return;
		}
		state.subscribers.push(weak);
	}
}

impl fmt::Debug for SharedMipmapLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SharedMipmapLevel")
			.field("level", &self.level())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

/// Halves an image in both dimensions with a 2×2 box filter.
///
/// Odd trailing rows and columns are dropped, so a 1 pixel wide image
/// becomes 0 pixels wide.
pub fn downsample(source: &dyn CloseableImage) -> PixelImage {
	let width = source.width() / 2;
	let height = source.height() / 2;
	let mut image = PixelImage::new(width, height);

	for y in 0..height {
		for x in 0..width {
			let samples = [
				source.color(x * 2, y * 2),
				source.color(x * 2 + 1, y * 2),
				source.color(x * 2, y * 2 + 1),
				source.color(x * 2 + 1, y * 2 + 1),
			];
			let average = |channel: fn(&Color) -> u8| -> u8 {
				(samples.iter().map(|color| u32::from(channel(color))).sum::<u32>() / 4) as u8
			};

			image.set_color(
				x,
				y,
				Color::argb(
					average(|color| color.a),
					average(|color| color.r),
					average(|color| color.g),
					average(|color| color.b),
				),
			);
		}
	}
	image
}

/// Builds a mipmap chain from a full-resolution image.
///
/// The result holds `max_level + 1` images, level `L` being
/// `(width >> L)×(height >> L)`.
pub fn generate_chain(base: PixelImage, max_level: usize) -> Vec<PixelImage> {
	let mut chain = Vec::with_capacity(max_level + 1);
	chain.push(base);
	for _ in 0..max_level {
		let next = match chain.last() {
			Some(previous) => downsample(previous),
			None => break,
		};
		chain.push(next);
	}
	chain
}

/// Creates a transparent mipmap chain for a `width`×`height` frame.
pub fn blank_chain(width: u32, height: u32, max_level: usize) -> Vec<PixelImage> {
	(0..=max_level)
		.map(|level| {
			let shift = level.min(31) as u32;
			PixelImage::new(width >> shift, height >> shift)
		})
		.collect()
}
