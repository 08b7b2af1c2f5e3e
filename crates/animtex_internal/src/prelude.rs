//! Prelude module for `animtex_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use animtex_internal::prelude::*;
//!
//! let shared = SharedMipmapLevel::new(1);
//! let frame = CloseableImageFrame::from_images(
//!     FrameData::new(4, 4, 0, 0),
//!     generate_chain(PixelImage::new(4, 4), 1),
//!     shared.clone(),
//! )
//! .unwrap();
//!
//! shared.lower_mipmap_level(0).unwrap();
//! assert_eq!(frame.mipmap_level(), 0);
//! ```

// Re-export everything from animtex_types::prelude
#[doc(inline)]
pub use animtex_types::prelude::*;

#[doc(inline)]
pub use animtex_cache::{CacheError, StateDependentCache};

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use animtex_cache;
#[doc(inline)]
pub use animtex_types;
