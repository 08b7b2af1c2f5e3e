//! Frame selection over time and synthesis of in-between frames.
//!
//! [`AnimationFrameManager`] turns elapsed ticks into a position inside a
//! looping frame sequence. [`RgbaInterpolator`] blends the current frame
//! towards the next one when an animation asks for smooth transitions.

mod interpolator;
mod manager;

pub use interpolator::RgbaInterpolator;
pub use manager::{AnimationFrameManager, ResolvedFrame};
