//! Error types for frame, mipmap, animation and texture operations.

use thiserror::Error;

/// Errors that can occur when building or driving animated textures.
///
/// Every variant describes a contract violation by the caller. None of them
/// are expected to be recovered from at runtime.
#[derive(Debug, Error)]
pub enum TextureError {
	/// A width or height argument was zero or negative
	#[error("Invalid {name}: expected a positive value, got {value}")]
	InvalidDimension {
		/// Name of the offending argument
		name: &'static str,
		/// Value that was supplied
		value: i64,
	},

	/// A frame factory produced no frame
	#[error("Frame factory returned no frame for frame index {index}")]
	MissingFrame {
		/// Index of the frame that could not be created
		index: usize,
	},

	/// A point with a negative coordinate was used where only non-negative points are allowed
	#[error("Point ({x}, {y}) has a negative coordinate")]
	NegativePoint {
		/// X coordinate
		x: i32,
		/// Y coordinate
		y: i32,
	},

	/// A frame was created with no mipmaps
	#[error("Mipmap chain must contain at least one image")]
	EmptyMipmapChain,

	/// A mipmap level does not exist in the chain
	#[error("Mipmap level {level} out of range (mipmap count: {count})")]
	MipmapLevelOutOfRange {
		/// Requested level
		level: usize,
		/// Number of mipmaps in the chain
		count: usize,
	},

	/// A mipmap level above the current ceiling was requested
	#[error("Mipmap level {level} is above the current mipmap level {current}")]
	MipmapLevelAboveCeiling {
		/// Requested level
		level: usize,
		/// Current mipmap level
		current: usize,
	},

	/// An attempt was made to raise a mipmap level
	#[error("Mipmap level can only be lowered: requested {requested}, current {current}")]
	RaiseMipmapLevel {
		/// Requested level
		requested: usize,
		/// Current level
		current: usize,
	},

	/// A shared mipmap level is not a valid index into a frame's mipmap chain
	#[error("Shared mipmap level {level} is not valid for a chain of {count} mipmaps")]
	SharedLevelTooHigh {
		/// Current shared level
		level: usize,
		/// Number of mipmaps in the chain
		count: usize,
	},

	/// An image slot was accessed after it was closed
	#[error("Image at mipmap level {level} has been closed")]
	ImageClosed {
		/// Level of the closed image
		level: usize,
	},

	/// An interpolation step was not strictly between the endpoints
	#[error("Interpolation step {step} must be in 1..{steps}")]
	InvalidInterpolationStep {
		/// Requested step
		step: u32,
		/// Total number of steps
		steps: u32,
	},

	/// A frame time of zero was configured
	#[error("Frame time must be positive (frame {index})")]
	InvalidFrameTime {
		/// Index of the frame with the invalid time
		index: usize,
	},

	/// An animation was created without any frames
	#[error("Animation must contain at least one frame")]
	EmptyAnimation,

	/// A frame index referenced a frame that does not exist
	#[error("Frame index {index} out of range (frame count: {count})")]
	FrameIndexOutOfRange {
		/// Requested index
		index: usize,
		/// Number of frames available
		count: usize,
	},

	/// A texture builder was built without an image
	#[error("Texture image must be set before building")]
	MissingImage,

	/// Animation metadata could not be parsed
	#[error(transparent)]
	Metadata(#[from] serde_json::Error),
}
