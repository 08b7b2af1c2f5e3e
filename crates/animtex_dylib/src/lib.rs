//! Forces dynamic linking of `animtex` to speed up incremental builds.
//!
//! Enable the `dynamic_linking` feature of `animtex` instead of depending on this crate.

#![allow(unused_imports)]

pub use animtex_internal::*;
