//! Lifecycle events and the listeners components contribute for them.

use std::fmt;

use crate::error::TextureError;

use super::state::TextureState;

/// Lifecycle events a texture dispatches to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureEvent {
	/// The texture was loaded and registered
	Registration,
	/// The texture is being bound for rendering
	Bind,
	/// The texture's image is being uploaded
	Upload,
	/// A game tick passed
	Tick,
	/// The texture is being released
	Close,
}

impl TextureEvent {
	/// Every event, in dispatch priority order.
	pub const ALL: [TextureEvent; 5] = [
		TextureEvent::Registration,
		TextureEvent::Bind,
		TextureEvent::Upload,
		TextureEvent::Tick,
		TextureEvent::Close,
	];

	#[inline]
	pub(crate) const fn index(self) -> usize {
		match self {
			TextureEvent::Registration => 0,
			TextureEvent::Bind => 1,
			TextureEvent::Upload => 2,
			TextureEvent::Tick => 3,
			TextureEvent::Close => 4,
		}
	}
}

impl fmt::Display for TextureEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			TextureEvent::Registration => "registration",
			TextureEvent::Bind => "bind",
			TextureEvent::Upload => "upload",
			TextureEvent::Tick => "tick",
			TextureEvent::Close => "close",
		};
		f.write_str(name)
	}
}

/// A listener callback. It may mutate the texture state freely.
pub type Handler = Box<dyn FnMut(&mut TextureState<'_>) -> Result<(), TextureError>>;

/// A handler bound to the event it listens for.
pub struct TextureListener {
	event: TextureEvent,
	handler: Handler,
}

impl TextureListener {
	/// Creates a listener.
	pub fn new(
		event: TextureEvent,
		handler: impl FnMut(&mut TextureState<'_>) -> Result<(), TextureError> + 'static,
	) -> Self {
		Self {
			event,
			handler: Box::new(handler),
		}
	}

	/// Returns the event this listener is for.
	#[inline]
	pub fn event(&self) -> TextureEvent {
		self.event
	}

	pub(crate) fn into_parts(self) -> (TextureEvent, Handler) {
		(self.event, self.handler)
	}
}

impl fmt::Debug for TextureListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextureListener").field("event", &self.event).finish_non_exhaustive()
	}
}

/// A pluggable unit that contributes listeners to a texture.
///
/// The texture never learns the component's concrete type; it only keeps
/// the listeners, in the order the component produced them.
///
/// Any `FnOnce() -> Vec<TextureListener>` is a component.
pub trait TextureComponent {
	/// Produces this component's listeners. Called once, when the texture is built.
	fn listeners(self: Box<Self>) -> Vec<TextureListener>;
}

impl<F> TextureComponent for F
where
	F: FnOnce() -> Vec<TextureListener>,
{
	fn listeners(self: Box<Self>) -> Vec<TextureListener> {
		(*self)()
	}
}
