//! The texture that forwards its lifecycle to component listeners.

use std::fmt;

use crate::error::TextureError;
use crate::frame::CloseableImageFrame;

use super::event::{Handler, TextureComponent, TextureEvent};
use super::state::{TextureId, TextureState};

/// A texture whose behavior is entirely defined by its components.
///
/// Each lifecycle call dispatches one event type. Listeners of that type run
/// in the order their components were added, and within a component, in the
/// order it produced them.
///
/// | Call         | Events fired                                   |
/// |--------------|------------------------------------------------|
/// | [`load`]     | `Registration`                                 |
/// | [`bind`]     | `Upload` (when needed), then `Bind`            |
/// | [`upload`]   | `Upload`                                       |
/// | [`tick`]     | `Tick`                                         |
/// | [`close`]    | `Close`                                        |
///
/// [`load`]: Self::load
/// [`bind`]: Self::bind
/// [`upload`]: Self::upload
/// [`tick`]: Self::tick
/// [`close`]: Self::close
pub struct EventDrivenTexture {
	id: TextureId,
	image: CloseableImageFrame,
	listeners: [Vec<Handler>; 5],
	needs_upload: bool,
	has_uploaded: bool,
}

impl EventDrivenTexture {
	/// Starts building a texture.
	pub fn builder() -> EventDrivenTextureBuilder {
		EventDrivenTextureBuilder::new()
	}

	/// Returns the texture's identifier.
	#[inline]
	pub fn id(&self) -> TextureId {
		self.id
	}

	/// Returns the current frame without marking it for upload.
	#[inline]
	pub fn image(&self) -> &CloseableImageFrame {
		&self.image
	}

	/// Returns true if a listener requested an upload since the last one.
	#[inline]
	pub fn needs_upload(&self) -> bool {
		self.needs_upload
	}

	/// Returns true once the texture has been uploaded at least once.
	#[inline]
	pub fn has_uploaded(&self) -> bool {
		self.has_uploaded
	}

	/// Returns the number of listeners registered for an event.
	pub fn listener_count(&self, event: TextureEvent) -> usize {
		self.listeners[event.index()].len()
	}

	/// Fires `Registration` listeners.
	pub fn load(&mut self) -> Result<(), TextureError> {
		self.dispatch(TextureEvent::Registration)
	}

	/// Fires `Tick` listeners.
	pub fn tick(&mut self) -> Result<(), TextureError> {
		self.dispatch(TextureEvent::Tick)
	}

	/// Uploads if needed, then fires `Bind` listeners.
	///
	/// The first bind always uploads. Later binds upload only if a listener
	/// requested it since the previous upload.
	pub fn bind(&mut self) -> Result<(), TextureError> {
		if !self.has_uploaded || self.needs_upload {
			self.upload()?;
		}
		self.dispatch(TextureEvent::Bind)
	}

	/// Fires `Upload` listeners unconditionally and clears the upload request.
	pub fn upload(&mut self) -> Result<(), TextureError> {
		self.dispatch(TextureEvent::Upload)?;
		self.needs_upload = false;
		self.has_uploaded = true;
		Ok(())
	}

	/// Fires `Close` listeners, then closes the current frame.
	///
	/// Every call fires the listeners again. The frame's images are only
	/// released the first time.
	pub fn close(&mut self) -> Result<(), TextureError> {
		let result = self.dispatch(TextureEvent::Close);
		self.image.close();
		log::debug!("Closed {}", self.id);
		result
	}

	fn dispatch(&mut self, event: TextureEvent) -> Result<(), TextureError> {
		let handlers = &mut self.listeners[event.index()];
		log::trace!("Dispatching {} to {} listeners of {}", event, handlers.len(), self.id);

		for handler in handlers.iter_mut() {
			let mut state = TextureState::new(self.id, &mut self.image, &mut self.needs_upload);
			handler(&mut state)?;
		}
		Ok(())
	}
}

impl fmt::Debug for EventDrivenTexture {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let counts: Vec<_> = TextureEvent::ALL
			.iter()
			.map(|&event| (event, self.listener_count(event)))
			.collect();
		f.debug_struct("EventDrivenTexture")
			.field("id", &self.id)
			.field("image", &self.image)
			.field("listeners", &counts)
			.field("needs_upload", &self.needs_upload)
			.field("has_uploaded", &self.has_uploaded)
			.finish()
	}
}

/// Assembles an [`EventDrivenTexture`]. No events fire while building.
#[derive(Default)]
pub struct EventDrivenTextureBuilder {
	image: Option<CloseableImageFrame>,
	components: Vec<Box<dyn TextureComponent>>,
}

impl EventDrivenTextureBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the texture's initial frame. The last call wins.
	pub fn set_image(mut self, image: CloseableImageFrame) -> Self {
		self.image = Some(image);
		self
	}

	/// Adds a component. Components keep the order they were added in.
	pub fn add(mut self, component: impl TextureComponent + 'static) -> Self {
		self.components.push(Box::new(component));
		self
	}

	/// Builds the texture, collecting every component's listeners.
	///
	/// # Errors
	///
	/// Returns [`TextureError::MissingImage`] if no image was set.
	pub fn build(self) -> Result<EventDrivenTexture, TextureError> {
		let image = self.image.ok_or(TextureError::MissingImage)?;

		let mut listeners: [Vec<Handler>; 5] = Default::default();
		for component in self.components {
			for listener in component.listeners() {
				let (event, handler) = listener.into_parts();
				listeners[event.index()].push(handler);
			}
		}

		let texture = EventDrivenTexture {
			id: TextureId::next(),
			image,
			listeners,
			needs_upload: true,
			has_uploaded: false,
		};
		log::debug!("Built {:?}", texture);
		Ok(texture)
	}
}

impl fmt::Debug for EventDrivenTextureBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventDrivenTextureBuilder")
			.field("image", &self.image)
			.field("components", &self.components.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::closeable_image::PixelImage;
	use crate::frame_reader::FrameData;
	use crate::mipmap::SharedMipmapLevel;
	use crate::texture::TextureListener;

	type EventLog = Rc<RefCell<Vec<String>>>;

	fn frame(width: u32) -> CloseableImageFrame {
		CloseableImageFrame::from_images(
			FrameData::new(width, 1, 0, 0),
			vec![PixelImage::new(width, 1)],
			SharedMipmapLevel::new(0),
		)
		.unwrap()
	}

	fn recorder(log: &EventLog, event: TextureEvent, name: &str) -> TextureListener {
		let log = log.clone();
		let name = name.to_string();
		TextureListener::new(event, move |_| {
			log.borrow_mut().push(name.clone());
			Ok(())
		})
	}

	#[test_log::test]
	fn test_build_requires_image() {
		let result = EventDrivenTexture::builder().build();
		assert!(matches!(result, Err(TextureError::MissingImage)));
	}

	#[test_log::test]
	fn test_last_image_wins() {
		let texture = EventDrivenTexture::builder().set_image(frame(1)).set_image(frame(2)).build().unwrap();
		assert_eq!(texture.image().width(), 2);
	}

	#[test_log::test]
	fn test_ids_are_unique() {
		let first = EventDrivenTexture::builder().set_image(frame(1)).build().unwrap();
		let second = EventDrivenTexture::builder().set_image(frame(1)).build().unwrap();
		assert_ne!(first.id(), second.id());
	}

	#[test_log::test]
	fn test_listeners_fire_in_component_order() {
		let log = EventLog::default();
		let (first, second) = (log.clone(), log.clone());
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(move || {
				vec![
					recorder(&first, TextureEvent::Tick, "a1"),
					recorder(&first, TextureEvent::Close, "a-close"),
					recorder(&first, TextureEvent::Tick, "a2"),
				]
			})
			.add(move || {
				vec![
					recorder(&second, TextureEvent::Registration, "b-load"),
					recorder(&second, TextureEvent::Tick, "b1"),
				]
			})
			.build()
			.unwrap();
		assert_eq!(texture.listener_count(TextureEvent::Tick), 3);

		texture.tick().unwrap();
		assert_eq!(*log.borrow(), vec!["a1", "a2", "b1"]);

		log.borrow_mut().clear();
		texture.load().unwrap();
		texture.close().unwrap();
		assert_eq!(*log.borrow(), vec!["b-load", "a-close"]);
	}

	#[test_log::test]
	fn test_bind_uploads_before_binding() {
		let log = EventLog::default();
		let listeners = log.clone();
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(move || {
				vec![
					recorder(&listeners, TextureEvent::Bind, "bind"),
					recorder(&listeners, TextureEvent::Upload, "upload"),
				]
			})
			.build()
			.unwrap();

		texture.bind().unwrap();
		texture.bind().unwrap();
		assert_eq!(*log.borrow(), vec!["upload", "bind", "bind"]);
		assert!(texture.has_uploaded());
		assert!(!texture.needs_upload());
	}

	#[test_log::test]
	fn test_mark_in_tick_causes_upload_on_next_bind() {
		let uploads = Rc::new(RefCell::new(0));
		let counter = uploads.clone();
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(move || {
				vec![
					TextureListener::new(TextureEvent::Tick, |state| {
						state.mark_needs_upload();
						Ok(())
					}),
					TextureListener::new(TextureEvent::Upload, move |_| {
						*counter.borrow_mut() += 1;
						Ok(())
					}),
				]
			})
			.build()
			.unwrap();

		texture.bind().unwrap();
		texture.tick().unwrap();
		texture.bind().unwrap();
		assert_eq!(*uploads.borrow(), 2);

		texture.bind().unwrap();
		assert_eq!(*uploads.borrow(), 2);
	}

	#[test_log::test]
	fn test_reading_image_marks_upload() {
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(|| {
				vec![TextureListener::new(TextureEvent::Bind, |state| {
					let _ = state.image().width();
					Ok(())
				})]
			})
			.build()
			.unwrap();

		texture.bind().unwrap();
		assert!(texture.needs_upload());
	}

	#[test_log::test]
	fn test_upload_always_fires() {
		let uploads = Rc::new(RefCell::new(0));
		let counter = uploads.clone();
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(move || {
				vec![TextureListener::new(TextureEvent::Upload, move |state| {
					*counter.borrow_mut() += 1;
					state.image().upload_at(crate::point::Point::new(0, 0))
				})]
			})
			.build()
			.unwrap();

		texture.upload().unwrap();
		texture.upload().unwrap();
		assert_eq!(*uploads.borrow(), 2);
		assert!(!texture.needs_upload());
	}

	#[test_log::test]
	fn test_listener_lowers_level_while_reading_image() {
		let shared = SharedMipmapLevel::new(1);
		let image = CloseableImageFrame::from_images(
			FrameData::new(2, 2, 0, 0),
			vec![PixelImage::new(2, 2), PixelImage::new(1, 1)],
			shared.clone(),
		)
		.unwrap();
		let mut texture = EventDrivenTexture::builder()
			.set_image(image)
			.add(|| {
				vec![TextureListener::new(TextureEvent::Tick, |state| {
					let frame = state.image();
					let full = frame.image(0)?;
					frame.shared_level().lower_mipmap_level(0)?;
					assert_eq!(full.width(), 2);
					Ok(())
				})]
			})
			.build()
			.unwrap();

		texture.tick().unwrap();
		assert_eq!(shared.level(), 0);
		assert_eq!(texture.image().mipmap_level(), 0);
		assert!(texture.image().image(1).is_err());
	}

	#[test_log::test]
	fn test_replace_image() {
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(|| {
				vec![TextureListener::new(TextureEvent::Tick, |state| {
					let previous = state.replace_image(frame(3));
					assert_eq!(previous.width(), 1);
					Ok(())
				})]
			})
			.build()
			.unwrap();

		texture.upload().unwrap();
		texture.tick().unwrap();
		assert_eq!(texture.image().width(), 3);
		assert!(texture.needs_upload());
	}

	#[test_log::test]
	fn test_close_refires_listeners() {
		let log = EventLog::default();
		let listeners = log.clone();
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(move || vec![recorder(&listeners, TextureEvent::Close, "close")])
			.build()
			.unwrap();

		texture.close().unwrap();
		texture.close().unwrap();
		assert_eq!(log.borrow().len(), 2);
		assert!(texture.image().is_closed());
	}

	#[test_log::test]
	fn test_listener_error_stops_dispatch() {
		let log = EventLog::default();
		let listeners = log.clone();
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(|| vec![TextureListener::new(TextureEvent::Upload, |_| Err(TextureError::EmptyAnimation))])
			.add(move || vec![recorder(&listeners, TextureEvent::Upload, "second")])
			.build()
			.unwrap();

		assert!(texture.bind().is_err());
		assert!(log.borrow().is_empty());
		assert!(!texture.has_uploaded());
	}

	#[test_log::test]
	fn test_texture_id_in_state() {
		let seen = Rc::new(RefCell::new(None));
		let record = seen.clone();
		let mut texture = EventDrivenTexture::builder()
			.set_image(frame(1))
			.add(move || {
				vec![TextureListener::new(TextureEvent::Bind, move |state| {
					*record.borrow_mut() = Some(state.texture_id());
					Ok(())
				})]
			})
			.build()
			.unwrap();

		texture.bind().unwrap();
		assert_eq!(*seen.borrow(), Some(texture.id()));
	}
}
