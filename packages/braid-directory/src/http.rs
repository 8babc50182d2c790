use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::{BoxFuture, Directory, NameCache, Result};

#[derive(Debug, Deserialize)]
struct UserRecord {
	#[serde(default)]
	name: String,
}

#[derive(Debug, Deserialize)]
struct ChannelRecord {
	#[serde(default)]
	name: String,
	#[serde(default)]
	user: Option<String>,
}

/// Directory service client with per-kind name caches.
///
/// Channel resolution follows the archive's conventions: a channel with no
/// name of its own is a direct-message channel and takes the name of its
/// counterpart user; an id the channel endpoint does not know is retried as
/// a user id before giving up.
pub struct HttpDirectory {
	http: Client,
	api_base: String,
	token: Option<String>,
	users: NameCache,
	channels: NameCache,
}

impl HttpDirectory {
	pub fn new(cfg: &braid_config::Directory) -> Result<Self> {
		let http = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
		let ttl = Duration::from_secs(cfg.cache_ttl_secs);

		Ok(Self {
			http,
			api_base: cfg.api_base.trim_end_matches('/').to_string(),
			token: cfg.token.clone(),
			users: NameCache::new(ttl),
			channels: NameCache::new(ttl),
		})
	}

	fn request(&self, url: String) -> RequestBuilder {
		let request = self.http.get(url);

		match self.token.as_deref() {
			Some(token) => request.bearer_auth(token),
			None => request,
		}
	}

	async fn fetch_user(&self, id: &str) -> Result<UserRecord> {
		let url = format!("{}/v1/users/{id}", self.api_base);
		let record = self.request(url).send().await?.error_for_status()?.json().await?;

		Ok(record)
	}

	async fn fetch_channel(&self, id: &str) -> Result<ChannelRecord> {
		let url = format!("{}/v1/channels/{id}", self.api_base);
		let record = self.request(url).send().await?.error_for_status()?.json().await?;

		Ok(record)
	}

	async fn resolve_user_inner(&self, id: &str) -> String {
		if let Some(name) = self.users.get(id) {
			return name;
		}

		match self.fetch_user(id).await {
			Ok(record) if !record.name.is_empty() => {
				self.users.put(id, &record.name);

				record.name
			},
			Ok(_) => id.to_string(),
			Err(err) => {
				debug!(%id, %err, "User lookup failed; keeping the raw id.");

				id.to_string()
			},
		}
	}

	async fn resolve_channel_inner(&self, id: &str) -> String {
		if let Some(name) = self.channels.get(id) {
			return name;
		}

		match self.fetch_channel(id).await {
			Ok(record) => {
				let name = if record.name.is_empty() {
					match record.user.as_deref().filter(|user| !user.is_empty()) {
						Some(user) => self.resolve_user_inner(user).await,
						None => id.to_string(),
					}
				} else {
					record.name
				};

				self.channels.put(id, &name);

				name
			},
			Err(err) => {
				debug!(%id, %err, "Channel lookup failed; retrying as a user id.");

				self.resolve_user_inner(id).await
			},
		}
	}
}

impl Directory for HttpDirectory {
	fn resolve_user<'a>(&'a self, id: &'a str) -> BoxFuture<'a, String> {
		Box::pin(self.resolve_user_inner(id))
	}

	fn resolve_channel<'a>(&'a self, id: &'a str) -> BoxFuture<'a, String> {
		Box::pin(self.resolve_channel_inner(id))
	}
}
