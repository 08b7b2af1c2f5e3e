//! This module is separated into its own crate to enable simple dynamic linking for `animtex`, and should not be used directly.

/// `use animtex::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use animtex_cache;
pub use animtex_types;

// Re-export commonly used types at crate root
pub use animtex_cache::{CacheError, StateDependentCache};
pub use animtex_types::TextureError;
pub use animtex_types::frame::CloseableImageFrame;
pub use animtex_types::texture::EventDrivenTexture;
