//! Integration tests for `animtex`: sprite sheets in, uploaded pixels out.

mod cache;
mod frames;
mod lifecycle;

use animtex::prelude::*;

/// Color of the first frame.
pub const RED: Color = Color::rgb(255, 0, 0);
/// Color of the second frame.
pub const BLUE: Color = Color::rgb(0, 0, 255);

/// An 8×4 sheet holding a red frame and a blue frame, 4×4 each.
pub fn sheet() -> image::RgbaImage {
	image::RgbaImage::from_fn(8, 4, |x, _| if x < 4 { RED.into() } else { BLUE.into() })
}

/// Cuts [`sheet`] into frames with two mipmap levels each.
pub fn read_frames(shared: &SharedMipmapLevel) -> Result<Vec<CloseableImageFrame>, TextureError> {
	let sheet = sheet();
	let shared = shared.clone();
	let reader = FrameReader::new(move |data: FrameData| {
		let base = PixelImage::from_rgba_region(&sheet, data.x_offset(), data.y_offset(), data.width(), data.height());
		CloseableImageFrame::from_images(data, generate_chain(base, 1), shared.clone()).ok()
	});
	reader.read(8, 4, 4, 4)
}
