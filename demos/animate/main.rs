//! Texture animation CLI
//!
//! Plays an animated sprite sheet through an [`EventDrivenTexture`] and
//! writes what the render target receives to PNG files.
//!
//! # Metadata Format
//!
//! Animation settings are read from an optional JSON file:
//! ```json
//! {
//!   "frame_width": 16,
//!   "frame_height": 16,
//!   "frametime": 4,
//!   "interpolate": true,
//!   "daytime_sync": false,
//!   "frames": [0, 1, { "index": 2, "time": 10 }]
//! }
//! ```
//!
//! Without metadata the sheet is read as a vertical strip of square frames.
//!
//! # Usage
//!
//! ```bash
//! # Play 40 ticks of an animation and dump every uploaded frame
//! cargo run --example animate -- play water.png -m water.json -t 40 -o out/
//!
//! # Play with two mipmap levels, dropping to full resolution only at tick 20
//! cargo run --example animate -- play water.png -l 2 --lower-at 20
//!
//! # Show how a sheet will be cut and sequenced
//! cargo run --example animate -- info water.png -m water.json
//! ```

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use animtex::prelude::*;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "animate")]
#[command(author = "animtex project")]
#[command(version = "1.0")]
#[command(about = "Texture animation utility - play and inspect animated sprite sheets", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Play an animation and write each uploaded frame to a PNG file
	Play {
		#[command(flatten)]
		sheet: SheetArgs,

		/// Number of ticks to simulate
		#[arg(short, long, default_value_t = 20)]
		ticks: u32,

		/// Output directory path
		#[arg(short, long, value_name = "OUTPUT_DIR", default_value = "animate_out")]
		output: PathBuf,

		/// Highest mipmap level to generate
		#[arg(short = 'l', long, default_value_t = 0)]
		mip_levels: usize,

		/// Tick at which the mipmap level is lowered to full resolution only
		#[arg(long, value_name = "TICK")]
		lower_at: Option<u32>,

		/// Ticks per tick of the day clock when the animation follows the time of day
		#[arg(long, default_value_t = 1)]
		day_speed: i64,
	},

	/// Show how a sheet is cut into frames and sequenced
	Info {
		#[command(flatten)]
		sheet: SheetArgs,
	},
}

#[derive(clap::Args)]
struct SheetArgs {
	/// Input sprite sheet (PNG)
	#[arg(value_name = "INPUT_PNG")]
	input: PathBuf,

	/// Animation metadata JSON file
	#[arg(short, long, value_name = "METADATA")]
	metadata: Option<PathBuf>,

	/// Frame width override
	#[arg(long, env = "ANIMTEX_FRAME_WIDTH")]
	frame_width: Option<u32>,

	/// Frame height override
	#[arg(long, env = "ANIMTEX_FRAME_HEIGHT")]
	frame_height: Option<u32>,
}

/// A sprite sheet and the settings to animate it with.
struct Sheet {
	image: image::RgbaImage,
	metadata: AnimationMetadata,
	layout: Vec<FrameData>,
	sequence: Vec<FrameTiming>,
}

impl Sheet {
	fn load(args: &SheetArgs) -> Result<Self> {
		let image = image::open(&args.input)
			.with_context(|| format!("failed to open {}", args.input.display()))?
			.to_rgba8();

		let mut metadata = match &args.metadata {
			Some(path) => {
				let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
				AnimationMetadata::from_json(&json)?
			}
			None => AnimationMetadata::default(),
		};
		if args.frame_width.is_some() {
			metadata.frame_width = args.frame_width;
		}
		if args.frame_height.is_some() {
			metadata.frame_height = args.frame_height;
		}

		let (frame_width, frame_height) = metadata.frame_size(image.width(), image.height());
		let layout = FrameReader::new(Some).read(
			i32::try_from(image.width())?,
			i32::try_from(image.height())?,
			i32::try_from(frame_width)?,
			i32::try_from(frame_height)?,
		)?;
		let sequence = metadata.sequence(layout.len())?;

		Ok(Self {
			image,
			metadata,
			layout,
			sequence,
		})
	}

	fn frame_size(&self) -> (u32, u32) {
		self.metadata.frame_size(self.image.width(), self.image.height())
	}

	/// Cuts one frame per sequence step, each with its own frame time.
	fn frames(&self, shared: &SharedMipmapLevel) -> Result<Vec<CloseableImageFrame>> {
		self.sequence
			.iter()
			.map(|timing| -> Result<CloseableImageFrame> {
				let data = self.layout[timing.index].with_time(Some(timing.time));
				let base = PixelImage::from_rgba_region(
					&self.image,
					data.x_offset(),
					data.y_offset(),
					data.width(),
					data.height(),
				);
				Ok(CloseableImageFrame::from_images(data, generate_chain(base, shared.level()), shared.clone())?)
			})
			.collect()
	}
}

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	match cli.command {
		Commands::Play {
			sheet,
			ticks,
			output,
			mip_levels,
			lower_at,
			day_speed,
		} => handle_play(&sheet, ticks, &output, mip_levels, lower_at, day_speed),

		Commands::Info {
			sheet,
		} => handle_info(&sheet),
	}
}

fn handle_play(
	args: &SheetArgs,
	ticks: u32,
	output: &Path,
	mip_levels: usize,
	lower_at: Option<u32>,
	day_speed: i64,
) -> Result<()> {
	let sheet = Sheet::load(args)?;
	let (frame_width, frame_height) = sheet.frame_size();
	if frame_width >> mip_levels.min(31) == 0 || frame_height >> mip_levels.min(31) == 0 {
		bail!("{mip_levels} mipmap levels is too many for {frame_width}×{frame_height} frames");
	}

	let shared = SharedMipmapLevel::new(mip_levels);
	let canvases: Vec<_> = (0..=mip_levels)
		.map(|level| {
			let shift = level.min(31) as u32;
			Canvas::shared(frame_width >> shift, frame_height >> shift)
		})
		.collect();
	let images: Vec<PixelImage> = blank_chain(frame_width, frame_height, mip_levels)
		.into_iter()
		.zip(&canvases)
		.map(|(image, canvas)| image.with_target(canvas.clone()))
		.collect();
	let image = CloseableImageFrame::from_images(FrameData::new(frame_width, frame_height, 0, 0), images, shared.clone())?;

	let mut animation = AnimationComponent::new(sheet.frames(&shared)?, sheet.metadata.frametime)?;
	if sheet.metadata.interpolate {
		let buffer = CloseableImageFrame::from_images(
			FrameData::new(frame_width, frame_height, 0, 0),
			blank_chain(frame_width, frame_height, mip_levels),
			shared.clone(),
		)?;
		animation = animation.with_interpolation(buffer);
	}
	let day_time = Rc::new(Cell::new(0i64));
	if sheet.metadata.daytime_sync {
		let clock = day_time.clone();
		animation = animation.with_clock(move || clock.get());
	}

	let closed = Rc::new(Cell::new(false));
	let on_close = closed.clone();
	let mut texture = EventDrivenTexture::builder()
		.set_image(image)
		.add(animation)
		.add(UploadComponent::new(Point::new(0, 0)))
		.add(CleanupComponent::new(move || on_close.set(true)))
		.build()?;

	fs::create_dir_all(output).with_context(|| format!("failed to create {}", output.display()))?;
	log::info!(
		"Playing {} steps of {}×{} frames for {} ticks on {}",
		sheet.sequence.len(),
		frame_width,
		frame_height,
		ticks,
		texture.id()
	);

	texture.load()?;
	let mut written = 0;
	for tick in 0..ticks {
		if lower_at == Some(tick) {
			log::info!("Lowering mipmap level to 0 at tick {tick}");
			shared.lower_mipmap_level(0)?;
		}

		day_time.set(day_time.get() + day_speed);
		texture.tick()?;

		let before = canvases[0].borrow().upload_count();
		texture.bind()?;
		if canvases[0].borrow().upload_count() == before {
			continue;
		}

		for (level, canvas) in canvases.iter().enumerate().take(texture.image().mipmap_level() + 1) {
			let path = output.join(format!("tick_{tick:04}_mip{level}.png"));
			canvas.borrow().image().save(&path).with_context(|| format!("failed to write {}", path.display()))?;
		}
		written += 1;
	}

	texture.close()?;
	log::info!("Wrote {} uploads to {} (cleanup ran: {})", written, output.display(), closed.get());
	Ok(())
}

fn handle_info(args: &SheetArgs) -> Result<()> {
	let sheet = Sheet::load(args)?;
	let (frame_width, frame_height) = sheet.frame_size();

	println!("Sheet:       {}×{}", sheet.image.width(), sheet.image.height());
	println!("Frame size:  {frame_width}×{frame_height}");
	println!("Frames:      {}", sheet.layout.len());
	println!("Interpolate: {}", sheet.metadata.interpolate);
	println!("Day sync:    {}", sheet.metadata.daytime_sync);
	println!("Sequence:");
	for (step, timing) in sheet.sequence.iter().enumerate() {
		println!("  {step:>3}: frame {:>3} ({}) for {} ticks", timing.index, sheet.layout[timing.index], timing.time);
	}
	Ok(())
}
