//! A state-dependent texture cache.
//!
//! Textures are usually loaded on a worker thread whenever the resource
//! state changes (a resource pack is toggled, the game reloads, ...) while
//! the render thread keeps asking for them. [`StateDependentCache`] lets
//! readers ask for an entry *as of a given state* and blocks them until the
//! loader has published that state.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! use animtex_cache::StateDependentCache;
//!
//! let cache = Arc::new(StateDependentCache::new());
//!
//! let loader = cache.clone();
//! let handle = thread::spawn(move || {
//!     loader.load(1u32, HashMap::from([("stone", 16u32)]));
//! });
//!
//! assert_eq!(cache.get(&"stone", &1), Some(16));
//! handle.join().unwrap();
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors returned by [`StateDependentCache`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
	/// The requested state was not published within the allotted time
	#[error("Timed out after {timeout:?} waiting for the requested cache state")]
	Timeout {
		/// How long the caller waited
		timeout: Duration,
	},

	/// The requested state is not the one currently published
	#[error("Requested cache state is not loaded")]
	StateNotLoaded,
}

struct Snapshot<S, K, V> {
	state: S,
	entries: Arc<HashMap<K, V>>,
}

/// A cache whose contents are valid for exactly one state at a time.
///
/// Each [`load`](Self::load) publishes an immutable snapshot, replacing the
/// previous one. Readers never see a partially loaded state.
pub struct StateDependentCache<S, K, V> {
	current: Mutex<Option<Snapshot<S, K, V>>>,
	published: Condvar,
}

impl<S, K, V> StateDependentCache<S, K, V>
where
	S: PartialEq + Clone + fmt::Debug,
	K: Eq + Hash,
{
	/// Creates an empty cache. No state is loaded.
	pub fn new() -> Self {
		Self {
			current: Mutex::new(None),
			published: Condvar::new(),
		}
	}

	/// Publishes the entries for `state` and wakes every waiting reader.
	pub fn load(&self, state: S, entries: HashMap<K, V>) {
		log::debug!("Publishing {} cache entries for state {:?}", entries.len(), state);

		let mut current = self.lock();
		*current = Some(Snapshot {
			state,
			entries: Arc::new(entries),
		});
		drop(current);

		self.published.notify_all();
	}

	/// Drops the published snapshot. Readers block until the next load.
	pub fn clear(&self) {
		*self.lock() = None;
	}

	/// Returns the currently published state, if any.
	pub fn current_state(&self) -> Option<S> {
		self.lock().as_ref().map(|snapshot| snapshot.state.clone())
	}

	/// Returns every entry of `state`, blocking until it is published.
	pub fn snapshot(&self, state: &S) -> Arc<HashMap<K, V>> {
		let mut current = self.lock();
		loop {
			if let Some(entries) = Self::entries_for(&current, state) {
				return entries;
			}
			log::trace!("Waiting for cache state {:?}", state);
			current = self.published.wait(current).unwrap_or_else(PoisonError::into_inner);
		}
	}

	/// Returns every entry of `state`, waiting at most `timeout` for it.
	///
	/// # Errors
	///
	/// Returns [`CacheError::Timeout`] if `state` isn't published in time.
	pub fn snapshot_timeout(&self, state: &S, timeout: Duration) -> Result<Arc<HashMap<K, V>>, CacheError> {
		let deadline = Instant::now() + timeout;
		let mut current = self.lock();
		loop {
			if let Some(entries) = Self::entries_for(&current, state) {
				return Ok(entries);
			}

			let remaining = deadline.saturating_duration_since(Instant::now());
			if remaining.is_zero() {
				log::warn!("Gave up waiting {:?} for cache state {:?}", timeout, state);
				return Err(CacheError::Timeout {
					timeout,
				});
			}
			current = self
				.published
				.wait_timeout(current, remaining)
				.unwrap_or_else(PoisonError::into_inner)
				.0;
		}
	}

	fn lock(&self) -> MutexGuard<'_, Option<Snapshot<S, K, V>>> {
		self.current.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn entries_for(current: &Option<Snapshot<S, K, V>>, state: &S) -> Option<Arc<HashMap<K, V>>> {
		current.as_ref().filter(|snapshot| snapshot.state == *state).map(|snapshot| snapshot.entries.clone())
	}
}

impl<S, K, V> StateDependentCache<S, K, V>
where
	S: PartialEq + Clone + fmt::Debug,
	K: Eq + Hash,
	V: Clone,
{
	/// Returns the entry for `key` as of `state`, blocking until `state` is
	/// published.
	///
	/// Returns `None` if the state is published but has no such entry.
	pub fn get(&self, key: &K, state: &S) -> Option<V> {
		self.snapshot(state).get(key).cloned()
	}

	/// Returns the entry for `key` if `state` is the published state.
	///
	/// # Errors
	///
	/// Returns [`CacheError::StateNotLoaded`] if another state (or none) is
	/// published.
	pub fn try_get(&self, key: &K, state: &S) -> Result<Option<V>, CacheError> {
		let entries = Self::entries_for(&self.lock(), state).ok_or(CacheError::StateNotLoaded)?;
		Ok(entries.get(key).cloned())
	}

	/// Like [`get`](Self::get), but waits at most `timeout`.
	///
	/// # Errors
	///
	/// Returns [`CacheError::Timeout`] if `state` isn't published in time.
	pub fn get_timeout(&self, key: &K, state: &S, timeout: Duration) -> Result<Option<V>, CacheError> {
		Ok(self.snapshot_timeout(state, timeout)?.get(key).cloned())
	}
}

impl<S, K, V> Default for StateDependentCache<S, K, V>
where
	S: PartialEq + Clone + fmt::Debug,
	K: Eq + Hash,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<S: fmt::Debug, K, V> fmt::Debug for StateDependentCache<S, K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
		f.debug_struct("StateDependentCache")
			.field("state", &current.as_ref().map(|snapshot| &snapshot.state))
			.field("entries", &current.as_ref().map_or(0, |snapshot| snapshot.entries.len()))
			.finish()
	}
}
