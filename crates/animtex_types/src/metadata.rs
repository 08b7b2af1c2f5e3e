//! Animation metadata, as found in the `animation` section of a texture's
//! metadata file.
//!
//! ```json
//! {
//!   "frame_width": 16,
//!   "frametime": 4,
//!   "interpolate": true,
//!   "frames": [0, 1, { "index": 2, "time": 10 }, 1]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TextureError;

fn default_frametime() -> u32 {
	1
}

/// One entry of the `frames` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameEntry {
	/// A bare frame index using the default frame time
	Index(usize),
	/// A frame index with its own time
	Timed {
		/// Index of the frame in reader order
		index: usize,
		/// Ticks the frame is shown for
		time: u32,
	},
}

impl FrameEntry {
	/// Returns the referenced frame index.
	pub fn index(&self) -> usize {
		match self {
			FrameEntry::Index(index) => *index,
			FrameEntry::Timed {
				index, ..
			} => *index,
		}
	}

	/// Returns the entry's own time, if any.
	pub fn time(&self) -> Option<u32> {
		match self {
			FrameEntry::Index(_) => None,
			FrameEntry::Timed {
				time, ..
			} => Some(*time),
		}
	}
}

/// A resolved animation step: which frame to show and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
	/// Index of the frame in reader order
	pub index: usize,
	/// Ticks the frame is shown for
	pub time: u32,
}

/// Animation settings for one texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationMetadata {
	/// Width of a single frame in pixels
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub frame_width: Option<u32>,

	/// Height of a single frame in pixels
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub frame_height: Option<u32>,

	/// Default frame time in ticks
	#[serde(default = "default_frametime")]
	pub frametime: u32,

	/// Whether to blend between frames
	#[serde(default)]
	pub interpolate: bool,

	/// Whether the animation follows the time of day instead of its own clock
	#[serde(default)]
	pub daytime_sync: bool,

	/// Explicit frame order. Empty means every frame in reader order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub frames: Vec<FrameEntry>,
}

impl Default for AnimationMetadata {
	fn default() -> Self {
		Self {
			frame_width: None,
			frame_height: None,
			frametime: default_frametime(),
			interpolate: false,
			daytime_sync: false,
			frames: Vec::new(),
		}
	}
}

impl AnimationMetadata {
	/// Parses metadata from JSON.
	///
	/// # Errors
	///
	/// Returns [`TextureError::Metadata`] if the JSON is malformed or has
	/// fields of the wrong type.
	///
	/// # Examples
	///
	/// ```
	/// use animtex_types::metadata::AnimationMetadata;
	///
	/// let metadata = AnimationMetadata::from_json(r#"{ "frametime": 3 }"#).unwrap();
	/// assert_eq!(metadata.frametime, 3);
	/// assert!(!metadata.interpolate);
	/// ```
	pub fn from_json(json: &str) -> Result<Self, TextureError> {
		let metadata: Self = serde_json::from_str(json)?;
		log::debug!(
			"Parsed animation metadata: frametime {}, {} explicit frames",
			metadata.frametime,
			metadata.frames.len()
		);
		Ok(metadata)
	}

	/// Resolves the frame size for an image of the given size.
	///
	/// A missing dimension makes the frames square using the other one. With
	/// both missing, frames are squares as wide as the image, so the image is
	/// read as a vertical strip.
	pub fn frame_size(&self, image_width: u32, _image_height: u32) -> (u32, u32) {
		match (self.frame_width, self.frame_height) {
			(Some(width), Some(height)) => (width, height),
			(Some(width), None) => (width, width),
			(None, Some(height)) => (height, height),
			(None, None) => (image_width, image_width),
		}
	}

	/// Resolves the playback order for `frame_count` available frames.
	///
	/// # Errors
	///
	/// - [`TextureError::InvalidFrameTime`] if the default time or an entry's time is zero
	/// - [`TextureError::FrameIndexOutOfRange`] if an entry references a missing frame
	/// - [`TextureError::EmptyAnimation`] if there is nothing to play
	pub fn sequence(&self, frame_count: usize) -> Result<Vec<FrameTiming>, TextureError> {
		if self.frametime == 0 {
			return Err(TextureError::InvalidFrameTime {
				index: 0,
			});
		}

		let sequence: Vec<FrameTiming> = if self.frames.is_empty() {
			(0..frame_count)
				.map(|index| FrameTiming {
					index,
					time: self.frametime,
				})
				.collect()
		} else {
			self.frames
				.iter()
				.enumerate()
				.map(|(position, entry)| {
					let index = entry.index();
					if index >= frame_count {
						return Err(TextureError::FrameIndexOutOfRange {
							index,
							count: frame_count,
						});
					}
					match entry.time() {
						Some(0) => Err(TextureError::InvalidFrameTime {
							index: position,
						}),
						time => Ok(FrameTiming {
							index,
							time: time.unwrap_or(self.frametime),
						}),
					}
				})
				.collect::<Result<_, _>>()?
		};

		if sequence.is_empty() {
			return Err(TextureError::EmptyAnimation);
		}
		Ok(sequence)
	}
}
