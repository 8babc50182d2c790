use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	pub directory: Option<Directory>,
	pub search: Search,
	#[serde(default)]
	pub strategies: Strategies,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// The external message archive queried over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct Store {
	pub url: String,
	pub index: String,
	pub username: Option<String>,
	pub password: Option<String>,
	pub timeout_ms: u64,
	/// Hit cap per store query and the search-result page size.
	pub page_size: u32,
}

/// The identity directory used to resolve user and channel ids to display
/// names. Absent means ids pass through unresolved.
#[derive(Debug, Clone, Deserialize)]
pub struct Directory {
	pub api_base: String,
	pub token: Option<String>,
	pub timeout_ms: u64,
	/// Resolved names are cached this long before being looked up again.
	pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Context messages fetched behind a match before expansion kicks in.
	pub context_before: usize,
	/// Context messages kept ahead of a match.
	pub context_after: usize,
	/// Minimum per-side context count the expansion loop aims for.
	pub min_context: usize,
	/// Initial expansion window in seconds; doubles until satisfied or the
	/// request range is exhausted.
	pub base_window_secs: i64,
	/// Extra messages returned by an incremental context fetch.
	pub more_limit: usize,
	/// Cap on in-flight window-expansion queries per request.
	pub max_concurrent_expansions: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Strategies {
	pub bounds: String,
	pub aggregate: String,
	pub score: String,
}

impl Default for Strategies {
	fn default() -> Self {
		Self {
			bounds: "time".to_string(),
			aggregate: "time".to_string(),
			score: "message".to_string(),
		}
	}
}
