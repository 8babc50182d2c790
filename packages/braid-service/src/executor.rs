use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;
use uuid::Uuid;

use braid_domain::{Conversation, Message};
use braid_store::{MessageStore, SearchQuery, TsRange};

use crate::{
	Error, Result,
	aggregate::{self, AggregateStrategy},
	bounds::{self, BoundsStrategy},
	more::MoreMessages,
	request::{MoreRequest, SearchRequest},
	score::{self, ScoreStrategy},
};

/// The three pipeline stages, each pluggable per request.
pub struct Strategies {
	pub bounds: Arc<dyn BoundsStrategy>,
	pub aggregate: Arc<dyn AggregateStrategy>,
	pub score: Arc<dyn ScoreStrategy>,
}

impl Strategies {
	/// Resolves the configured strategy names. Unknown names fall back to
	/// the defaults rather than failing.
	pub fn from_config(cfg: &braid_config::Config) -> Self {
		Self {
			bounds: bounds::resolve(&cfg.strategies.bounds, &cfg.search, cfg.store.page_size),
			aggregate: aggregate::resolve(&cfg.strategies.aggregate),
			score: score::resolve(&cfg.strategies.score),
		}
	}
}

/// Composes bounds, aggregate and score over the message store.
///
/// Execution is request-scoped: no state is held across calls beyond the
/// chosen strategies and the fan-out cap.
pub struct TaskExecutor {
	store: Arc<dyn MessageStore>,
	strategies: Strategies,
	more: MoreMessages,
	page_size: u32,
	expansion_permits: Arc<Semaphore>,
}

impl TaskExecutor {
	pub fn new(store: Arc<dyn MessageStore>, cfg: &braid_config::Config) -> Self {
		let strategies = Strategies::from_config(cfg);

		Self::with_strategies(store, cfg, strategies)
	}

	pub fn with_strategies(
		store: Arc<dyn MessageStore>,
		cfg: &braid_config::Config,
		strategies: Strategies,
	) -> Self {
		Self {
			store,
			strategies,
			more: MoreMessages::new(&cfg.search, cfg.store.page_size),
			page_size: cfg.store.page_size,
			expansion_permits: Arc::new(Semaphore::new(cfg.search.max_concurrent_expansions)),
		}
	}

	/// The matched messages for a request: a scored text query over the
	/// request's range and channel scope, newest first.
	pub async fn messages(&self, request: &SearchRequest) -> Result<Vec<Message>> {
		let window = request.window();
		let query = SearchQuery::text_match(
			&request.query,
			request.channels.clone(),
			TsRange {
				gte: Some(window.from as f64),
				lte: Some(window.to as f64),
				..TsRange::default()
			},
			request.start,
			self.page_size,
		);

		Ok(self.store.search(&query).await?)
	}

	/// The full pipeline: match, expand each match into its window, merge
	/// overlapping windows per channel, score and rank.
	///
	/// Window expansions fan out concurrently under the configured cap and
	/// join in input order; the first failure aborts the request, partial
	/// results are never returned.
	pub async fn conversations(&self, request: &SearchRequest) -> Result<Vec<Conversation>> {
		let trace_id = Uuid::new_v4();
		let window = request.window();
		let matches = self.messages(request).await?;

		debug!(%trace_id, matches = matches.len(), "Expanding context windows.");

		let mut handles = Vec::with_capacity(matches.len());

		for matched in matches {
			let store = Arc::clone(&self.store);
			let bounds = Arc::clone(&self.strategies.bounds);
			let permits = Arc::clone(&self.expansion_permits);

			handles.push(tokio::spawn(async move {
				let _permit = permits.acquire_owned().await.map_err(|_| Error::Internal {
					message: "Expansion semaphore closed.".to_string(),
				})?;
				let channel = matched.channel.clone();

				bounds.expand(store.as_ref(), &channel, &matched, window).await
			}));
		}

		let mut windows = Vec::with_capacity(handles.len());
		let mut handles = handles.into_iter();

		while let Some(handle) = handles.next() {
			let joined = handle.await.map_err(|err| Error::Internal {
				message: format!("Window expansion task failed: {err}"),
			});

			match joined {
				Ok(Ok(conversation)) => windows.push(conversation),
				Ok(Err(err)) | Err(err) => {
					// No partial results: stop in-flight expansions and
					// surface the failing stage.
					for handle in handles {
						handle.abort();
					}

					return Err(err);
				},
			}
		}

		let merged = self.strategies.aggregate.merge(windows)?;
		let mut ranked = self.strategies.score.score(merged)?;

		score::rank(&mut ranked);

		debug!(%trace_id, conversations = ranked.len(), "Ranked conversations.");

		Ok(ranked)
	}

	/// Extra context in one direction from a known base message.
	pub async fn more_messages(&self, request: &MoreRequest) -> Result<Vec<Message>> {
		self.more.fetch(self.store.as_ref(), request).await
	}

	/// The newest messages across the channel scope, for the empty-query
	/// landing view.
	pub async fn recent(&self, channels: Vec<String>) -> Result<Vec<Message>> {
		Ok(self.store.search(&SearchQuery::recent(channels, self.page_size)).await?)
	}

	/// Total number of indexed messages.
	pub async fn statistics(&self) -> Result<u64> {
		Ok(self.store.count().await?)
	}
}
