//! Benchmark suite for frame blending and copying
//!
//! Measures the per-tick work of an animated texture: interpolating between
//! two frames, copying a frame into the texture, and generating mipmaps.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use animtex_benches::{SEED, blank_frame, generate_frames, generate_image};
use animtex_types::animation::RgbaInterpolator;
use animtex_types::closeable_image::PixelImage;
use animtex_types::mipmap::{SharedMipmapLevel, generate_chain};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

const SIZES: [u32; 3] = [16, 64, 256];

/// Benchmark interpolation between two frames at a mid step
fn bench_interpolate(c: &mut Criterion) {
	let mut group = c.benchmark_group("rgba_interpolate");

	for size in SIZES {
		let shared = SharedMipmapLevel::new(2);
		let frames = generate_frames(2, size, &shared);
		let mut interpolator = RgbaInterpolator::new(blank_frame(size, &shared));

		group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
		group.bench_with_input(BenchmarkId::new("mid_step", size), &frames, |b, frames| {
			b.iter(|| {
				let result = interpolator.interpolate(black_box(8), black_box(4), &frames[0], &frames[1]);
				black_box(result.is_ok())
			});
		});
	}

	group.finish();
}

/// Benchmark copying a predefined frame into a texture frame
fn bench_copy_frame(c: &mut Criterion) {
	let mut group = c.benchmark_group("frame_copy");

	for size in SIZES {
		let shared = SharedMipmapLevel::new(2);
		let frames = generate_frames(1, size, &shared);
		let mut target = blank_frame(size, &shared);

		group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
		group.bench_with_input(BenchmarkId::new("copy_from", size), &frames, |b, frames| {
			b.iter(|| black_box(target.copy_from(&frames[0]).is_ok()));
		});
	}

	group.finish();
}

/// Benchmark mipmap generation from a full-resolution image
fn bench_generate_chain(c: &mut Criterion) {
	let mut group = c.benchmark_group("mipmap_generate");

	for size in SIZES {
		let mut rng = SmallRng::seed_from_u64(SEED);
		let base = generate_image(size, 1.0, &mut rng);

		group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
		group.bench_function(BenchmarkId::new("four_levels", size), |b| {
			b.iter_batched(
				|| PixelImage::from_rgba(&base.to_rgba()),
				|image| black_box(generate_chain(image, 4)),
				BatchSize::SmallInput,
			);
		});
	}

	group.finish();
}

criterion_group!(benches, bench_interpolate, bench_copy_frame, bench_generate_chain);
criterion_main!(benches);
