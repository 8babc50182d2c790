use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::debug;

use braid_domain::Message;

use crate::{BoxFuture, MessageStore, Result, SearchQuery, models, query};

/// HTTP adapter for an Elasticsearch-compatible message archive.
pub struct ElasticStore {
	http: Client,
	base_url: String,
	index: String,
	username: Option<String>,
	password: Option<String>,
}

impl ElasticStore {
	pub fn new(cfg: &braid_config::Store) -> Result<Self> {
		let http = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			http,
			base_url: cfg.url.trim_end_matches('/').to_string(),
			index: cfg.index.clone(),
			username: cfg.username.clone(),
			password: cfg.password.clone(),
		})
	}

	fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
		match self.username.as_deref() {
			Some(username) => request.basic_auth(username, self.password.as_deref()),
			None => request,
		}
	}

	async fn search_inner(&self, search: &SearchQuery) -> Result<Vec<Message>> {
		let url = format!("{}/{}/_search", self.base_url, self.index);
		let body = query::render(search);

		debug!(index = %self.index, size = search.size, scored = search.track_scores, "Store search.");

		let response = self
			.authenticated(self.http.post(&url).json(&body))
			.send()
			.await?
			.error_for_status()?;
		let decoded: models::SearchResponse = response.json().await?;

		models::messages_from_response(decoded)
	}

	async fn count_inner(&self) -> Result<u64> {
		let url = format!("{}/{}/_count", self.base_url, self.index);
		let response = self.authenticated(self.http.get(&url)).send().await?.error_for_status()?;
		let decoded: models::CountResponse = response.json().await?;

		Ok(decoded.count)
	}
}

impl MessageStore for ElasticStore {
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<Vec<Message>>> {
		Box::pin(self.search_inner(query))
	}

	fn count<'a>(&'a self) -> BoxFuture<'a, Result<u64>> {
		Box::pin(self.count_inner())
	}
}
