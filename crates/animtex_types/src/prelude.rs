//! Prelude module for `animtex_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```
//! use animtex_types::prelude::*;
//!
//! let color = Color::argb(255, 10, 20, 30);
//! let area = Area::from_rect(0, 0, 2, 2);
//! assert_eq!(area.len(), 4);
//! assert_eq!(color.lerp(Color::argb(255, 20, 40, 60), 1, 2), Color::argb(255, 15, 30, 45));
//! ```

// Errors
#[doc(inline)]
pub use crate::TextureError;

// Animation types
#[doc(inline)]
pub use crate::animation::{AnimationFrameManager, ResolvedFrame, RgbaInterpolator};

// Image types
#[doc(inline)]
pub use crate::closeable_image::{Canvas, CloseableImage, PixelImage, UploadTarget};

#[doc(inline)]
pub use crate::color::Color;

// Components
#[doc(inline)]
pub use crate::component::{AnimationClock, AnimationComponent, CleanupComponent, UploadComponent};

// Frame types
#[doc(inline)]
pub use crate::frame::CloseableImageFrame;
#[doc(inline)]
pub use crate::frame_reader::{FrameData, FrameReader};

#[doc(inline)]
pub use crate::metadata::{AnimationMetadata, FrameTiming};

// Mipmap types
#[doc(inline)]
pub use crate::mipmap::{SharedMipmapLevel, blank_chain, generate_chain};

#[doc(inline)]
pub use crate::point::{Area, Point};

// Texture types
#[doc(inline)]
pub use crate::texture::{
	EventDrivenTexture, TextureComponent, TextureEvent, TextureId, TextureListener, TextureState,
};
