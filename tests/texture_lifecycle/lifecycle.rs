use std::cell::{Cell, RefCell};
use std::rc::Rc;

use animtex::prelude::*;

use crate::{BLUE, RED, read_frames};

struct Fixture {
	texture: EventDrivenTexture,
	shared: SharedMipmapLevel,
	canvases: Vec<Rc<RefCell<Canvas>>>,
}

/// A texture uploading at (4, 4) into one 16×16 canvas per mipmap level.
fn fixture(interpolate: bool) -> Fixture {
	let shared = SharedMipmapLevel::new(1);
	let canvases = vec![Canvas::shared(16, 16), Canvas::shared(8, 8)];
	let images: Vec<PixelImage> = blank_chain(4, 4, 1)
		.into_iter()
		.zip(&canvases)
		.map(|(image, canvas)| image.with_target(canvas.clone()))
		.collect();
	let image = CloseableImageFrame::from_images(FrameData::new(4, 4, 0, 0), images, shared.clone()).unwrap();

	let mut animation = AnimationComponent::new(read_frames(&shared).unwrap(), 2).unwrap();
	if interpolate {
		let buffer =
			CloseableImageFrame::from_images(FrameData::new(4, 4, 0, 0), blank_chain(4, 4, 1), shared.clone()).unwrap();
		animation = animation.with_interpolation(buffer);
	}

	let texture = EventDrivenTexture::builder()
		.set_image(image)
		.add(animation)
		.add(UploadComponent::new(Point::new(4, 4)))
		.build()
		.unwrap();

	Fixture {
		texture,
		shared,
		canvases,
	}
}

fn canvas_color(fixture: &Fixture, level: usize, x: u32, y: u32) -> Option<Color> {
	fixture.canvases[level].borrow().color(x, y)
}

fn upload_count(fixture: &Fixture, level: usize) -> usize {
	fixture.canvases[level].borrow().upload_count()
}

#[test_log::test]
fn test_first_bind_uploads_every_level() {
	let mut fixture = fixture(false);
	fixture.texture.load().unwrap();
	fixture.texture.bind().unwrap();

	assert!(fixture.texture.has_uploaded());
	assert_eq!(canvas_color(&fixture, 0, 4, 4), Some(RED));
	assert_eq!(canvas_color(&fixture, 0, 7, 7), Some(RED));
	assert_eq!(canvas_color(&fixture, 0, 8, 8), Some(Color::TRANSPARENT));
	assert_eq!(canvas_color(&fixture, 1, 2, 2), Some(RED));
	assert_eq!(canvas_color(&fixture, 1, 3, 3), Some(RED));
}

#[test_log::test]
fn test_animation_uploads_only_on_change() {
	let mut fixture = fixture(false);
	fixture.texture.load().unwrap();
	fixture.texture.bind().unwrap();
	assert_eq!(upload_count(&fixture, 0), 1);

	fixture.texture.tick().unwrap();
	fixture.texture.bind().unwrap();
	assert_eq!(upload_count(&fixture, 0), 1);

	fixture.texture.tick().unwrap();
	fixture.texture.bind().unwrap();
	assert_eq!(upload_count(&fixture, 0), 2);
	assert_eq!(canvas_color(&fixture, 0, 5, 5), Some(BLUE));
	assert_eq!(canvas_color(&fixture, 1, 2, 2), Some(BLUE));
}

#[test_log::test]
fn test_interpolated_animation_blends_frames() {
	let mut fixture = fixture(true);
	fixture.texture.load().unwrap();

	fixture.texture.tick().unwrap();
	fixture.texture.bind().unwrap();
	assert_eq!(canvas_color(&fixture, 0, 4, 4), Some(Color::rgb(128, 0, 127)));

	fixture.texture.tick().unwrap();
	fixture.texture.bind().unwrap();
	assert_eq!(canvas_color(&fixture, 0, 4, 4), Some(BLUE));
}

#[test_log::test]
fn test_lowered_level_stops_uploading_mipmaps() {
	let mut fixture = fixture(false);
	fixture.texture.load().unwrap();
	fixture.texture.bind().unwrap();

	fixture.shared.lower_mipmap_level(0).unwrap();
	fixture.texture.tick().unwrap();
	fixture.texture.tick().unwrap();
	fixture.texture.bind().unwrap();

	assert_eq!(fixture.texture.image().mipmap_level(), 0);
	assert_eq!(upload_count(&fixture, 0), 2);
	assert_eq!(upload_count(&fixture, 1), 1);
	assert_eq!(canvas_color(&fixture, 1, 2, 2), Some(RED));
}

#[test_log::test]
fn test_close_runs_cleanup_and_releases_images() {
	let released = Rc::new(Cell::new(0));
	let counter = released.clone();
	let shared = SharedMipmapLevel::new(0);
	let image = CloseableImageFrame::from_images(FrameData::new(4, 4, 0, 0), vec![PixelImage::new(4, 4)], shared)
		.unwrap();
	let mut texture = EventDrivenTexture::builder()
		.set_image(image)
		.add(CleanupComponent::new(move || counter.set(counter.get() + 1)))
		.build()
		.unwrap();

	texture.close().unwrap();
	assert!(texture.image().is_closed());
	assert_eq!(released.get(), 1);
}

#[test_log::test]
fn test_listener_can_replace_image() {
	let shared = SharedMipmapLevel::new(0);
	let first = CloseableImageFrame::from_images(FrameData::new(1, 1, 0, 0), vec![PixelImage::new(1, 1)], shared.clone())
		.unwrap();
	let mut replacement = Some(
		CloseableImageFrame::from_images(FrameData::new(2, 2, 0, 0), vec![PixelImage::new(2, 2)], shared).unwrap(),
	);

	let mut texture = EventDrivenTexture::builder()
		.set_image(first)
		.add(move || {
			vec![TextureListener::new(TextureEvent::Tick, move |state| {
				if let Some(frame) = replacement.take() {
					let mut old = state.replace_image(frame);
					old.close();
				}
				Ok(())
			})]
		})
		.build()
		.unwrap();

	texture.upload().unwrap();
	texture.tick().unwrap();
	assert_eq!(texture.image().width(), 2);
	assert!(texture.needs_upload());
}
