//! Event-driven textures.
//!
//! An [`EventDrivenTexture`] holds a single current frame and a set of
//! listeners contributed by [`TextureComponent`]s. The texture itself knows
//! nothing about animation or uploading; components implement both by
//! reacting to lifecycle events.
//!
//! # Examples
//!
//! ```
//! use animtex_types::prelude::*;
//!
//! # fn main() -> Result<(), TextureError> {
//! let frame = CloseableImageFrame::from_images(
//!     FrameData::new(4, 4, 0, 0),
//!     vec![PixelImage::new(4, 4)],
//!     SharedMipmapLevel::new(0),
//! )?;
//!
//! let mut texture = EventDrivenTexture::builder()
//!     .set_image(frame)
//!     .add(|| {
//!         vec![TextureListener::new(TextureEvent::Upload, |state| {
//!             state.image().upload_at(Point::new(0, 0))
//!         })]
//!     })
//!     .build()?;
//!
//! texture.load()?;
//! texture.bind()?; // uploads, since the texture was never uploaded
//! texture.tick()?;
//! texture.close()?;
//! # Ok(())
//! # }
//! ```

mod event;
mod event_driven;
mod state;

pub use event::{Handler, TextureComponent, TextureEvent, TextureListener};
pub use event_driven::{EventDrivenTexture, EventDrivenTextureBuilder};
pub use state::{TextureId, TextureState};
