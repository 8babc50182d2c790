use std::sync::Arc;

use time::macros::date;

use braid_config::{Config, Search, Service, Store, Strategies as StrategyNames};
use braid_domain::{Conversation, Timestamp};
use braid_service::{
	AggregateStrategy, BoundsStrategy, RequestWindow, SearchRequest, Strategies, TaskExecutor,
	TimeAggregate, TimeBounds,
};
use braid_testkit::{MemoryStore, blank_event, message, scored_message};

fn config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:4713".to_string(), log_level: "info".to_string() },
		store: Store {
			url: "http://127.0.0.1:9200".to_string(),
			index: "messages".to_string(),
			username: None,
			password: None,
			timeout_ms: 1_000,
			page_size: 50,
		},
		directory: None,
		search: Search {
			context_before: 6,
			context_after: 5,
			min_context: 6,
			base_window_secs: 60,
			more_limit: 5,
			max_concurrent_expansions: 4,
		},
		strategies: StrategyNames::default(),
	}
}

fn epoch_day_request(query: &str) -> SearchRequest {
	SearchRequest {
		query: query.to_string(),
		from: date!(1970 - 01 - 01),
		to: date!(1970 - 01 - 01),
		channels: Vec::new(),
		start: 0,
	}
}

fn assert_sorted(conversation: &Conversation) {
	for pair in conversation.messages.windows(2) {
		assert!(pair[0].ts <= pair[1].ts, "{} > {}", pair[0].ts, pair[1].ts);
	}
}

#[tokio::test]
async fn window_is_ordered_and_carries_the_match_score() {
	let cfg = config();
	let mut fixtures: Vec<_> = (6..=14)
		.filter(|i| *i != 10)
		.map(|i| message("general", &(i * 10).to_string(), &format!("ctx {i}")))
		.collect();

	fixtures.push(scored_message("general", "100", "anchor message", 5.0));

	let store = MemoryStore::new(fixtures);
	let bounds = TimeBounds::new(&cfg.search, cfg.store.page_size);
	let anchor = scored_message("general", "100", "anchor message", 5.0);
	let window = RequestWindow { from: 0, to: 1_000 };
	let conversation =
		bounds.expand(&store, "general", &anchor, window).await.expect("expand failed");

	assert_sorted(&conversation);
	assert!(conversation.messages.iter().any(|message| message.ts == anchor.ts));

	let own = conversation
		.messages
		.iter()
		.find(|message| message.ts == anchor.ts)
		.expect("anchor missing");

	assert_eq!(own.score, 5.0);
	assert!(
		conversation
			.messages
			.iter()
			.filter(|message| message.ts != anchor.ts)
			.all(|message| message.score == 0.0)
	);
}

#[tokio::test]
async fn blank_events_are_skipped_and_expansion_digs_deeper() {
	let cfg = config();
	let store = MemoryStore::new(vec![
		message("general", "50", "deep one"),
		message("general", "60", "deep two"),
		message("general", "70", "deep three"),
		message("general", "95", "near one"),
		message("general", "96", "near two"),
		blank_event("general", "97"),
		message("general", "98", "near three"),
		blank_event("general", "99"),
		scored_message("general", "100", "anchor message", 1.0),
	]);
	let bounds = TimeBounds::new(&cfg.search, cfg.store.page_size);
	let anchor = scored_message("general", "100", "anchor message", 1.0);
	let window = RequestWindow { from: 0, to: 1_000 };
	let conversation =
		bounds.expand(&store, "general", &anchor, window).await.expect("expand failed");

	assert!(conversation.messages.iter().all(|message| !message.text.trim().is_empty()));
	// The initial capped fetch was diluted by blank events; the doubling
	// window reaches the older cluster.
	assert!(conversation.messages.iter().any(|message| message.ts == Timestamp::from("60")));
	assert_sorted(&conversation);
}

#[tokio::test]
async fn expansion_terminates_at_the_range_edge() {
	let cfg = config();
	let store = MemoryStore::new(vec![
		message("general", "86330", "almost midnight"),
		scored_message("general", "86340", "last call", 2.0),
	]);
	let bounds = TimeBounds::new(&cfg.search, cfg.store.page_size);
	let anchor = scored_message("general", "86340", "last call", 2.0);
	// One-day request: the forward side has less than one base window of
	// headroom, so expansion must stop without looping.
	let window = RequestWindow { from: 0, to: 86_400 };
	let conversation =
		bounds.expand(&store, "general", &anchor, window).await.expect("expand failed");

	assert!(conversation.messages.iter().all(|message| {
		message.ts.seconds().expect("fixture ts") <= 86_400.0
	}));
	assert!(conversation.messages.iter().any(|message| message.ts == anchor.ts));
}

#[tokio::test]
async fn overlapping_windows_merge_into_one_scored_thread() {
	let mut fixtures: Vec<_> = (5..=25)
		.filter(|i| ![10, 15, 20].contains(i))
		.map(|i| message("general", &(i * 10).to_string(), &format!("ctx {i}")))
		.collect();

	fixtures.push(scored_message("general", "100", "alpha deploy", 5.0));
	fixtures.push(scored_message("general", "150", "alpha rollback", 3.0));
	fixtures.push(scored_message("general", "200", "alpha mention", 0.0));
	fixtures.push(scored_message("random", "400", "alpha aside", 1.5));

	let cfg = config();
	let executor = TaskExecutor::new(Arc::new(MemoryStore::new(fixtures)), &cfg);
	let conversations =
		executor.conversations(&epoch_day_request("alpha")).await.expect("pipeline failed");

	// The three overlapping windows collapse into a single thread for the
	// channel, ranked above the lone low-scored match elsewhere.
	assert_eq!(conversations.len(), 2);
	assert_eq!(conversations[0].score, 8.0);
	assert_eq!(conversations[1].score, 1.5);

	let thread = &conversations[0];

	assert_sorted(thread);
	assert!(thread.first_timestamp().expect("empty thread") <= &Timestamp::from("60"));
	assert!(thread.last_timestamp().expect("empty thread") >= &Timestamp::from("240"));
	assert_eq!(
		thread
			.messages
			.iter()
			.filter(|message| message.score > 0.0)
			.map(|message| message.score)
			.sum::<f64>(),
		8.0
	);

	for window in conversations.windows(2) {
		assert!(window[0].score >= window[1].score);
	}
}

#[tokio::test]
async fn merging_a_merged_list_changes_nothing() {
	let mut fixtures: Vec<_> =
		(5..=25).map(|i| message("general", &(i * 10).to_string(), &format!("ctx {i}"))).collect();

	fixtures.push(scored_message("general", "125", "alpha one", 2.0));
	fixtures.push(scored_message("general", "185", "alpha two", 1.0));

	let cfg = config();
	let executor = TaskExecutor::new(Arc::new(MemoryStore::new(fixtures)), &cfg);
	let conversations =
		executor.conversations(&epoch_day_request("alpha")).await.expect("pipeline failed");
	let again = TimeAggregate.merge(conversations.clone()).expect("merge failed");

	assert_eq!(conversations, again);
}

#[tokio::test]
async fn disjoint_windows_stay_separate_per_channel() {
	let windows = vec![
		Conversation::from_messages(vec![
			message("general", "1000", "late one"),
			message("general", "1010", "late two"),
		]),
		Conversation::from_messages(vec![
			message("general", "100", "early one"),
			message("general", "110", "early two"),
		]),
	];
	let merged = TimeAggregate.merge(windows).expect("merge failed");

	assert_eq!(merged.len(), 2);
}

#[tokio::test]
async fn zero_scored_duplicates_never_clobber_a_scored_copy() {
	let windows = vec![
		Conversation::from_messages(vec![
			scored_message("general", "100", "the hit", 4.0),
			message("general", "110", "tail"),
		]),
		Conversation::from_messages(vec![
			message("general", "100", "the hit"),
			message("general", "120", "later tail"),
		]),
	];
	let merged = TimeAggregate.merge(windows).expect("merge failed");

	assert_eq!(merged.len(), 1);
	assert_eq!(merged[0].messages[0].score, 4.0);
}

#[tokio::test]
async fn a_failing_window_expansion_aborts_the_request() {
	let fixtures = vec![
		scored_message("general", "100", "alpha one", 2.0),
		scored_message("general", "5000", "alpha two", 1.0),
	];
	// The matched-message query succeeds, every window query afterwards
	// fails; no partial conversation list may come back.
	let store = MemoryStore::new(fixtures).fail_after(1);
	let cfg = config();
	let executor = TaskExecutor::new(Arc::new(store), &cfg);

	assert!(executor.conversations(&epoch_day_request("alpha")).await.is_err());
}

#[tokio::test]
async fn malformed_anchor_timestamps_are_data_errors() {
	let cfg = config();
	let store = MemoryStore::new(Vec::new());
	let bounds = TimeBounds::new(&cfg.search, cfg.store.page_size);
	let anchor = scored_message("general", "not-a-number", "bad anchor", 1.0);
	let window = RequestWindow { from: 0, to: 1_000 };
	let err = bounds.expand(&store, "general", &anchor, window).await.expect_err("expand passed");

	assert!(matches!(err, braid_service::Error::Data(_)));
}

#[tokio::test]
async fn unknown_strategy_names_fall_back_to_defaults() {
	let mut cfg = config();

	cfg.strategies.bounds = "no-such-bounder".to_string();
	cfg.strategies.aggregate = "no-such-aggregator".to_string();
	cfg.strategies.score = "no-such-scorer".to_string();

	let fixtures = vec![scored_message("general", "100", "alpha lone", 2.0)];
	let store = Arc::new(MemoryStore::new(fixtures));
	let strategies = Strategies::from_config(&cfg);
	let executor = TaskExecutor::with_strategies(store, &cfg, strategies);
	let conversations =
		executor.conversations(&epoch_day_request("alpha")).await.expect("pipeline failed");

	assert_eq!(conversations.len(), 1);
	assert_eq!(conversations[0].score, 2.0);
}

#[tokio::test]
async fn recent_returns_newest_first_without_scores() {
	let fixtures = vec![
		scored_message("general", "100", "old news", 9.0),
		message("general", "200", "mid news"),
		message("random", "300", "fresh news"),
	];
	let cfg = config();
	let executor = TaskExecutor::new(Arc::new(MemoryStore::new(fixtures)), &cfg);
	let recent = executor.recent(Vec::new()).await.expect("recent failed");

	assert_eq!(recent[0].ts, Timestamp::from("300"));
	assert!(recent.iter().all(|message| message.score == 0.0));

	let scoped = executor.recent(vec!["random".to_string()]).await.expect("recent failed");

	assert_eq!(scoped.len(), 1);
}

#[tokio::test]
async fn statistics_count_every_indexed_message() {
	let cfg = config();
	let executor = TaskExecutor::new(
		Arc::new(MemoryStore::new(vec![
			message("general", "100", "one"),
			blank_event("general", "110"),
		])),
		&cfg,
	);

	assert_eq!(executor.statistics().await.expect("count failed"), 2);
}
