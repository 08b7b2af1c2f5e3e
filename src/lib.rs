#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `animtex` animates textures on the client side.
//!
//! Sprite sheets are cut into frames, every frame keeps a mipmap chain whose
//! detail is lowered for all frames of a texture at once, and textures react
//! to lifecycle events through pluggable components. See
//! [`animtex_types`] for the details.
//!
pub use animtex_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use animtex_dylib;
