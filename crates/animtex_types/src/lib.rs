//! This crate provides the core types of the `animtex` texture animation engine.
//!
//! # Overview
//!
//! - **Frames**: [`FrameReader`](frame_reader::FrameReader) cuts a sprite sheet into
//!   frames; a [`CloseableImageFrame`](frame::CloseableImageFrame) holds one frame's
//!   mipmap chain
//! - **Mipmaps**: a [`SharedMipmapLevel`](mipmap::SharedMipmapLevel) lowers the
//!   detail of every frame of a texture at once, releasing the dropped levels
//! - **Animation**: [`AnimationFrameManager`](animation::AnimationFrameManager) tracks
//!   playback and [`RgbaInterpolator`](animation::RgbaInterpolator) blends frames
//! - **Textures**: an [`EventDrivenTexture`](texture::EventDrivenTexture) dispatches
//!   lifecycle events to listeners contributed by [components](component)
//!
//! # Examples
//!
//! Cutting a sheet into frames and playing them:
//!
//! ```
//! use animtex_types::prelude::*;
//!
//! # fn main() -> Result<(), TextureError> {
//! let shared = SharedMipmapLevel::new(0);
//! let factory_level = shared.clone();
//! let reader = FrameReader::new(move |data: FrameData| {
//!     let image = PixelImage::new(data.width(), data.height());
//!     CloseableImageFrame::from_images(data, vec![image], factory_level.clone()).ok()
//! });
//! let frames = reader.read(32, 16, 16, 16)?;
//!
//! let mut texture = EventDrivenTexture::builder()
//!     .set_image(CloseableImageFrame::from_images(
//!         FrameData::new(16, 16, 0, 0),
//!         vec![PixelImage::new(16, 16)],
//!         shared,
//!     )?)
//!     .add(AnimationComponent::new(frames, 5)?)
//!     .add(UploadComponent::new(Point::new(0, 0)))
//!     .build()?;
//!
//! texture.load()?;
//! for _ in 0..10 {
//!     texture.tick()?;
//!     texture.bind()?;
//! }
//! texture.close()?;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod closeable_image;
pub mod color;
pub mod component;
mod error;
pub mod frame;
pub mod frame_reader;
pub mod metadata;
pub mod mipmap;
pub mod point;
pub mod texture;

pub use error::TextureError;

/// `use animtex_types::prelude::*;` to import commonly used items.
pub mod prelude;
