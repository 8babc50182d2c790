use std::{
	collections::HashMap,
	sync::Mutex,
	time::{Duration, Instant},
};

/// A thread-safe name cache with time-based eviction.
///
/// Owned by the resolver that uses it, never ambient state. Entries older
/// than the TTL miss and are re-fetched; expired entries are swept on write.
#[derive(Debug)]
pub struct NameCache {
	ttl: Duration,
	entries: Mutex<HashMap<String, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
	name: String,
	stored_at: Instant,
}

impl NameCache {
	pub fn new(ttl: Duration) -> Self {
		Self { ttl, entries: Mutex::new(HashMap::new()) }
	}

	pub fn get(&self, id: &str) -> Option<String> {
		let entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		entries
			.get(id)
			.filter(|entry| entry.stored_at.elapsed() < self.ttl)
			.map(|entry| entry.name.clone())
	}

	pub fn put(&self, id: &str, name: &str) {
		let mut entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
		entries
			.insert(id.to_string(), CacheEntry { name: name.to_string(), stored_at: Instant::now() });
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn returns_fresh_entries() {
		let cache = NameCache::new(Duration::from_secs(60));

		cache.put("U1", "ripley");

		assert_eq!(cache.get("U1"), Some("ripley".to_string()));
		assert_eq!(cache.get("U2"), None);
	}

	#[test]
	fn expired_entries_miss() {
		let cache = NameCache::new(Duration::ZERO);

		cache.put("U1", "ripley");

		assert_eq!(cache.get("U1"), None);
	}

	#[test]
	fn writes_sweep_expired_entries() {
		let cache = NameCache::new(Duration::ZERO);

		cache.put("U1", "ripley");
		cache.put("U2", "dallas");

		let entries = cache.entries.lock().expect("poisoned");

		assert_eq!(entries.len(), 1);
		assert!(entries.contains_key("U2"));
	}
}
