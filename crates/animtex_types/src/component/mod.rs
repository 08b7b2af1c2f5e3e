//! Components that give an [`EventDrivenTexture`](crate::texture::EventDrivenTexture)
//! its behavior.

mod animation;
mod cleanup;
mod upload;

pub use animation::{AnimationClock, AnimationComponent};
pub use cleanup::CleanupComponent;
pub use upload::UploadComponent;
