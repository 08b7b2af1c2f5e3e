//! Time keeping for a looping sequence of frames.

use std::fmt;

use crate::error::TextureError;

/// The frames surrounding the current animation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFrame<'a, F> {
	/// Frame the animation is currently in
	pub current: &'a F,
	/// Frame the animation moves to next
	pub next: &'a F,
	/// Ticks elapsed since `current` started
	pub ticks_in_frame: u32,
	/// Duration of `current` in ticks
	pub duration: u32,
}

impl<F> ResolvedFrame<'_, F> {
	/// Returns true if the time falls exactly on the start of `current`.
	#[inline]
	pub fn is_on_frame_start(&self) -> bool {
		self.ticks_in_frame == 0
	}
}

/// Tracks elapsed ticks over a looping list of frames.
///
/// The elapsed time is kept modulo the total animation length, so ticking
/// forward or backward by any amount wraps around the sequence.
///
/// # Examples
///
/// ```
/// use animtex_types::animation::AnimationFrameManager;
///
/// let mut manager = AnimationFrameManager::new(vec![Some(2), None, Some(3)], |time| *time, 1)?;
/// assert_eq!(manager.total_duration(), 6);
///
/// manager.tick(4);
/// assert_eq!(manager.current_index(), 2);
/// assert_eq!(manager.ticks_in_frame(), 1);
///
/// manager.tick(-3);
/// assert_eq!(manager.current_index(), 0);
/// assert_eq!(manager.ticks_in_frame(), 1);
/// # Ok::<(), animtex_types::TextureError>(())
/// ```
pub struct AnimationFrameManager<F> {
	frames: Vec<F>,
	durations: Vec<u32>,
	total: u64,
	position: u64,
	index: usize,
	ticks_in_frame: u32,
}

impl<F> AnimationFrameManager<F> {
	/// Creates a manager positioned at the start of the first frame.
	///
	/// # Arguments
	///
	/// * `frames` - Frames in playback order
	/// * `frame_time` - Duration of a frame in ticks, `None` for the default
	/// * `default_time` - Duration used for frames without their own
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `frames` is empty
	/// - Any frame resolves to a duration of zero ticks
	pub fn new(
		frames: Vec<F>,
		frame_time: impl Fn(&F) -> Option<u32>,
		default_time: u32,
	) -> Result<Self, TextureError> {
		if frames.is_empty() {
			return Err(TextureError::EmptyAnimation);
		}

		let durations = frames
			.iter()
			.enumerate()
			.map(|(index, frame)| match frame_time(frame).unwrap_or(default_time) {
				0 => Err(TextureError::InvalidFrameTime {
					index,
				}),
				time => Ok(time),
			})
			.collect::<Result<Vec<_>, _>>()?;
		let total = durations.iter().map(|&time| u64::from(time)).sum();

		Ok(Self {
			frames,
			durations,
			total,
			position: 0,
			index: 0,
			ticks_in_frame: 0,
		})
	}

	/// Advances the animation by a signed number of ticks.
	///
	/// Negative values move the animation backward.
	pub fn tick(&mut self, ticks: i64) {
		let total = i128::from(self.total);
		let position = (i128::from(self.position) + i128::from(ticks)).rem_euclid(total);
		self.seek(position as u64);
	}

	/// Moves the animation to an absolute tick count from an external clock.
	///
	/// The difference to the current position is applied through
	/// [`tick`](Self::tick), which may move backward.
	pub fn sync_to(&mut self, absolute_ticks: i64) {
		let target = i128::from(absolute_ticks).rem_euclid(i128::from(self.total));
		let delta = target - i128::from(self.position);
		self.tick(delta as i64);
	}

	fn seek(&mut self, position: u64) {
		self.position = position;

		let mut remaining = position;
		for (index, &duration) in self.durations.iter().enumerate() {
			let duration = u64::from(duration);
			if remaining < duration {
				self.index = index;
				self.ticks_in_frame = remaining as u32;
				return;
			}
			remaining -= duration;
		}

		// Unreachable while position < total; stay on the first frame.
		self.index = 0;
		self.ticks_in_frame = 0;
	}

	/// Returns the current frame.
	#[inline]
	pub fn current(&self) -> &F {
		&self.frames[self.index]
	}

	/// Returns the frame after the current one, wrapping to the start.
	#[inline]
	pub fn next(&self) -> &F {
		&self.frames[self.next_index()]
	}

	/// Returns the index of the current frame.
	#[inline]
	pub fn current_index(&self) -> usize {
		self.index
	}

	/// Returns the index of the next frame.
	#[inline]
	pub fn next_index(&self) -> usize {
		(self.index + 1) % self.frames.len()
	}

	/// Returns how many ticks have passed since the current frame started.
	#[inline]
	pub fn ticks_in_frame(&self) -> u32 {
		self.ticks_in_frame
	}

	/// Returns the duration of the current frame.
	#[inline]
	pub fn current_duration(&self) -> u32 {
		self.durations[self.index]
	}

	/// Returns the duration of a frame.
	pub fn duration(&self, index: usize) -> Option<u32> {
		self.durations.get(index).copied()
	}

	/// Returns the length of one loop of the animation.
	#[inline]
	pub fn total_duration(&self) -> u64 {
		self.total
	}

	/// Returns the ticks elapsed in the current loop.
	#[inline]
	pub fn position(&self) -> u64 {
		self.position
	}

	/// Returns the current and next frames with the time between them.
	pub fn resolve(&self) -> ResolvedFrame<'_, F> {
		ResolvedFrame {
			current: self.current(),
			next: self.next(),
			ticks_in_frame: self.ticks_in_frame,
			duration: self.current_duration(),
		}
	}

	/// Returns the frames in playback order.
	pub fn frames(&self) -> &[F] {
		&self.frames
	}

	/// Returns the frames mutably, in playback order.
	pub fn frames_mut(&mut self) -> &mut [F] {
		&mut self.frames
	}

	/// Returns the number of frames.
	#[inline]
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Always false: a manager holds at least one frame.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

impl<F> fmt::Debug for AnimationFrameManager<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnimationFrameManager")
			.field("frames", &self.frames.len())
			.field("total", &self.total)
			.field("index", &self.index)
			.field("ticks_in_frame", &self.ticks_in_frame)
			.finish()
	}
}
