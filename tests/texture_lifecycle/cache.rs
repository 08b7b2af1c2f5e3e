use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use animtex::{CacheError, StateDependentCache};

use crate::sheet;

#[test_log::test]
fn test_render_thread_waits_for_loader() {
	let cache = Arc::new(StateDependentCache::new());

	let loader = {
		let cache = cache.clone();
		thread::spawn(move || {
			let entries = HashMap::from([("sheet".to_string(), Arc::new(sheet()))]);
			cache.load(1u32, entries);
		})
	};

	let sheet = cache.get(&"sheet".to_string(), &1).unwrap();
	assert_eq!(sheet.dimensions(), (8, 4));
	loader.join().unwrap();

	assert_eq!(
		cache.get_timeout(&"sheet".to_string(), &2, Duration::from_millis(5)).map(|entry| entry.is_some()),
		Err(CacheError::Timeout {
			timeout: Duration::from_millis(5)
		})
	);
}
