//! Upload component.

use crate::point::Point;
use crate::texture::{TextureComponent, TextureEvent, TextureListener};

/// Uploads the texture's current frame at a fixed position on every `Upload`.
///
/// The position usually comes from a sprite's location in an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadComponent {
	point: Point,
}

impl UploadComponent {
	/// Creates a component uploading at `point`.
	pub fn new(point: Point) -> Self {
		Self {
			point,
		}
	}

	/// Returns the upload position.
	pub fn point(&self) -> Point {
		self.point
	}
}

impl TextureComponent for UploadComponent {
	fn listeners(self: Box<Self>) -> Vec<TextureListener> {
		let point = self.point;
		vec![TextureListener::new(TextureEvent::Upload, move |state| state.image().upload_at(point))]
	}
}
