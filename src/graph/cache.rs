//! Process-wide catalog cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use log::debug;

use super::loader::{LoadOutcome, load_folder};

type Slot = Arc<OnceLock<Arc<LoadOutcome>>>;

/// Loads each folder at most once and hands every caller the same result.
///
/// Concurrent first callers for one folder block on a single in-flight load.
/// Entries are never invalidated; new files need a restart to show up.
#[derive(Default)]
pub struct CatalogCache {
	slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl CatalogCache {
	/// An empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Cached outcome for `folder`, loading it on first use.
	pub fn get_or_load(&self, folder: impl AsRef<Path>) -> Arc<LoadOutcome> {
		self.get_or_load_with(folder, |p| load_folder(p))
	}

	/// Like [`get_or_load`](Self::get_or_load) with a custom loader.
	pub fn get_or_load_with<F>(&self, folder: impl AsRef<Path>, load: F) -> Arc<LoadOutcome>
	where
		F: FnOnce(&Path) -> LoadOutcome,
	{
		let folder = folder.as_ref();
		let slot = self.slot(folder);
		// The map lock is released here, so loads of other folders proceed.
		slot.get_or_init(|| {
			debug!("loading graph folder {}", folder.display());
			Arc::new(load(folder))
		})
		.clone()
	}

	/// Outcome for `folder` if it has already been loaded.
	pub fn cached(&self, folder: impl AsRef<Path>) -> Option<Arc<LoadOutcome>> {
		let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
		slots.get(folder.as_ref())?.get().cloned()
	}

	fn slot(&self, folder: &Path) -> Slot {
		let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
		slots.entry(folder.to_path_buf()).or_default().clone()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::thread;
	use std::time::Duration;

	use super::*;
	use crate::graph::loader::Catalog;

	#[test]
	fn loads_once_per_folder() {
		let cache = CatalogCache::new();
		let calls = AtomicUsize::new(0);
		let load = |_: &Path| {
			calls.fetch_add(1, Ordering::SeqCst);
			LoadOutcome::Loaded(Catalog::new())
		};
		let first = cache.get_or_load_with("data", load);
		let second = cache.get_or_load_with("data", load);
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 1);

		cache.get_or_load_with("other", load);
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn concurrent_first_callers_share_one_load() {
		let cache = Arc::new(CatalogCache::new());
		let calls = Arc::new(AtomicUsize::new(0));
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let (cache, calls) = (cache.clone(), calls.clone());
				thread::spawn(move || {
					cache.get_or_load_with("shared", |p| {
						calls.fetch_add(1, Ordering::SeqCst);
						thread::sleep(Duration::from_millis(20));
						LoadOutcome::NotFound(p.to_path_buf())
					})
				})
			})
			.collect();
		let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
	}

	#[test]
	fn default_loader_reports_missing_folder() {
		let cache = CatalogCache::new();
		let outcome = cache.get_or_load("no/such/graph/folder");
		assert_eq!(
			*outcome,
			LoadOutcome::NotFound(PathBuf::from("no/such/graph/folder"))
		);
		assert!(Arc::ptr_eq(&outcome, &cache.get_or_load("no/such/graph/folder")));
	}

	#[test]
	fn cached_does_not_trigger_a_load() {
		let cache = CatalogCache::new();
		assert!(cache.cached("nowhere").is_none());
		cache.get_or_load_with("nowhere", |p| LoadOutcome::NotFound(p.to_path_buf()));
		assert!(matches!(
			cache.cached("nowhere").as_deref(),
			Some(LoadOutcome::NotFound(_))
		));
	}
}
