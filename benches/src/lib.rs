//! Benchmark helper utilities for animtex
//!
//! This module provides utilities for generating synthetic frames for the
//! animation benchmarks. All data is generated from a fixed seed so runs are
//! comparable.

use animtex_types::closeable_image::{CloseableImage, PixelImage};
use animtex_types::color::Color;
use animtex_types::frame::CloseableImageFrame;
use animtex_types::frame_reader::FrameData;
use animtex_types::mipmap::{SharedMipmapLevel, blank_chain, generate_chain};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seed used by every generator in this crate
pub const SEED: u64 = 0x616e_696d;

/// Generates a square image filled with random colors
///
/// Roughly `coverage` of the pixels are opaque; the rest stay transparent so
/// that visible-area tracking has realistic work to do.
pub fn generate_image(size: u32, coverage: f64, rng: &mut SmallRng) -> PixelImage {
	let mut image = PixelImage::new(size, size);
	for y in 0..size {
		for x in 0..size {
			if rng.random_bool(coverage) {
				image.set_color(x, y, Color::from_argb32(rng.random::<u32>() | 0xFF00_0000));
			}
		}
	}
	image
}

/// Generates `count` random frames of `size`×`size` pixels sharing `shared`
pub fn generate_frames(count: usize, size: u32, shared: &SharedMipmapLevel) -> Vec<CloseableImageFrame> {
	let mut rng = SmallRng::seed_from_u64(SEED);
	(0..count)
		.map(|index| {
			let base = generate_image(size, 0.75, &mut rng);
			let data = FrameData::new(size, size, size * index as u32, 0);
			CloseableImageFrame::from_images(data, generate_chain(base, shared.level()), shared.clone())
				.expect("generated chain matches shared level")
		})
		.collect()
}

/// Creates a transparent frame matching the frames from [`generate_frames`]
pub fn blank_frame(size: u32, shared: &SharedMipmapLevel) -> CloseableImageFrame {
	CloseableImageFrame::from_images(
		FrameData::new(size, size, 0, 0),
		blank_chain(size, size, shared.level()),
		shared.clone(),
	)
	.expect("blank chain matches shared level")
}
