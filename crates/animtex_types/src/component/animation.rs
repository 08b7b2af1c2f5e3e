//! Animation playback component.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::animation::{AnimationFrameManager, RgbaInterpolator};
use crate::error::TextureError;
use crate::frame::CloseableImageFrame;
use crate::texture::{TextureComponent, TextureEvent, TextureListener};

/// Where an animation gets its time from.
pub enum AnimationClock {
	/// Advance one tick per `Tick` event
	FreeRunning,
	/// Follow an external absolute tick count, such as the time of day
	Synced(Box<dyn FnMut() -> i64>),
}

impl fmt::Debug for AnimationClock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AnimationClock::FreeRunning => f.write_str("FreeRunning"),
			AnimationClock::Synced(_) => f.write_str("Synced"),
		}
	}
}

/// Plays a sequence of predefined frames on a texture.
///
/// - `Registration`: shows the first frame
/// - `Tick`: advances the clock and, if the displayed frame changed,
///   copies it (or a blend of it and the next frame) into the texture
/// - `Close`: closes the predefined frames and the interpolation buffer
pub struct AnimationComponent {
	manager: AnimationFrameManager<CloseableImageFrame>,
	interpolator: Option<RgbaInterpolator>,
	clock: AnimationClock,
	shown: Option<(usize, u32)>,
}

impl AnimationComponent {
	/// Creates a free-running animation without interpolation.
	///
	/// Frames without their own time last `default_time` ticks.
	///
	/// # Errors
	///
	/// Returns an error if `frames` is empty or a frame lasts zero ticks.
	pub fn new(frames: Vec<CloseableImageFrame>, default_time: u32) -> Result<Self, TextureError> {
		let manager = AnimationFrameManager::new(frames, CloseableImageFrame::frame_time, default_time)?;
		Ok(Self {
			manager,
			interpolator: None,
			clock: AnimationClock::FreeRunning,
			shown: None,
		})
	}

	/// Blends between frames, writing blends into `buffer` first.
	///
	/// `buffer` should match the frames in size and mipmap count.
	pub fn with_interpolation(mut self, buffer: CloseableImageFrame) -> Self {
		self.interpolator = Some(RgbaInterpolator::new(buffer));
		self
	}

	/// Follows an external clock instead of counting ticks.
	pub fn with_clock(mut self, clock: impl FnMut() -> i64 + 'static) -> Self {
		self.clock = AnimationClock::Synced(Box::new(clock));
		self
	}

	/// Returns the frame manager.
	pub fn manager(&self) -> &AnimationFrameManager<CloseableImageFrame> {
		&self.manager
	}

	fn advance(&mut self) {
		match &mut self.clock {
			AnimationClock::FreeRunning => self.manager.tick(1),
			AnimationClock::Synced(clock) => {
				let now = clock();
				self.manager.sync_to(now);
			}
		}
	}

	/// Position to display: the frame index and, when blending, the tick.
	fn target(&self) -> (usize, u32) {
		let ticks = if self.interpolator.is_some() {
			self.manager.ticks_in_frame()
		} else {
			0
		};
		(self.manager.current_index(), ticks)
	}

	fn show(&mut self, image: &mut CloseableImageFrame) -> Result<(), TextureError> {
		let resolved = self.manager.resolve();
		match &mut self.interpolator {
			Some(interpolator) if !resolved.is_on_frame_start() => {
				let blended = interpolator.interpolate(
					resolved.duration,
					resolved.ticks_in_frame,
					resolved.current,
					resolved.next,
				)?;
				image.copy_from(blended)?;
			}
			_ => image.copy_from(resolved.current)?,
		}

		self.shown = Some(self.target());
		Ok(())
	}

	fn close(&mut self) {
		for frame in self.manager.frames_mut() {
			frame.close();
		}
		if let Some(interpolator) = self.interpolator.take() {
			interpolator.into_result().close();
		}
	}
}

impl TextureComponent for AnimationComponent {
	fn listeners(self: Box<Self>) -> Vec<TextureListener> {
		let playback = Rc::new(RefCell::new(*self));
		let (on_load, on_tick, on_close) = (playback.clone(), playback.clone(), playback);

		vec![
			TextureListener::new(TextureEvent::Registration, move |state| {
				on_load.borrow_mut().show(state.image())
			}),
			TextureListener::new(TextureEvent::Tick, move |state| {
				let mut playback = on_tick.borrow_mut();
				playback.advance();
				if playback.shown == Some(playback.target()) {
					return Ok(());
				}
				playback.show(state.image())
			}),
			TextureListener::new(TextureEvent::Close, move |_| {
				on_close.borrow_mut().close();
				Ok(())
			}),
		]
	}
}

impl fmt::Debug for AnimationComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnimationComponent")
			.field("manager", &self.manager)
			.field("interpolating", &self.interpolator.is_some())
			.field("clock", &self.clock)
			.finish()
	}
}
