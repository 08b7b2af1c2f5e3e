//! Cleanup component.

use std::fmt;

use crate::texture::{TextureComponent, TextureEvent, TextureListener};

/// Runs an action every time the texture is closed.
///
/// Useful for releasing resources the texture doesn't own, such as a
/// GPU texture name. The action must tolerate being run more than once.
pub struct CleanupComponent {
	action: Box<dyn FnMut()>,
}

impl CleanupComponent {
	/// Creates a component running `action` on `Close`.
	pub fn new(action: impl FnMut() + 'static) -> Self {
		Self {
			action: Box::new(action),
		}
	}
}

impl TextureComponent for CleanupComponent {
	fn listeners(self: Box<Self>) -> Vec<TextureListener> {
		let mut action = self.action;
		vec![TextureListener::new(TextureEvent::Close, move |_| {
			action();
			Ok(())
		})]
	}
}

impl fmt::Debug for CleanupComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CleanupComponent").finish_non_exhaustive()
	}
}
