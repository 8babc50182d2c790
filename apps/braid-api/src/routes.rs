use std::time::Instant;

use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::date};

use braid_directory::decorate;
use braid_domain::{Conversation, Message};
use braid_service::{Direction, MoreRequest, SearchRequest, date_serde};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/more", post(more))
		.route("/v1/recent", post(recent))
		.route("/v1/stats", get(stats))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Serialize)]
struct SearchResponse {
	took_ms: u128,
	next: i64,
	prev: i64,
	conversations: Vec<Conversation>,
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let started = Instant::now();
	let mut conversations = state.executor.conversations(&payload).await?;

	decorate::conversations(state.directory.as_ref(), &mut conversations).await;

	let page = state.page_size as usize;
	let next = if conversations.len() >= page { (payload.start + page) as i64 } else { -1 };
	let prev = if payload.start >= page { (payload.start - page) as i64 } else { -1 };

	Ok(Json(SearchResponse { took_ms: started.elapsed().as_millis(), next, prev, conversations }))
}

#[derive(Debug, Serialize)]
struct MoreResponse {
	direction: Direction,
	messages: Vec<Message>,
}

async fn more(
	State(state): State<AppState>,
	Json(payload): Json<MoreRequest>,
) -> Result<Json<MoreResponse>, ApiError> {
	let mut messages = state.executor.more_messages(&payload).await?;

	decorate::messages(state.directory.as_ref(), &mut messages).await;

	Ok(Json(MoreResponse { direction: payload.direction, messages }))
}

#[derive(Debug, Deserialize)]
struct RecentRequest {
	#[serde(default)]
	channels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RecentResponse {
	messages: Vec<Message>,
}

async fn recent(
	State(state): State<AppState>,
	Json(payload): Json<RecentRequest>,
) -> Result<Json<RecentResponse>, ApiError> {
	let mut messages = state.executor.recent(payload.channels).await?;

	decorate::messages(state.directory.as_ref(), &mut messages).await;

	Ok(Json(RecentResponse { messages }))
}

/// Landing-page numbers: total archive size and the default search range.
#[derive(Debug, Serialize)]
struct StatsResponse {
	num_messages: u64,
	#[serde(with = "date_serde")]
	from: Date,
	#[serde(with = "date_serde")]
	to: Date,
}

const DEFAULT_FROM: Date = date!(2010 - 01 - 01);

async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
	let num_messages = state.executor.statistics().await?;

	Ok(Json(StatsResponse {
		num_messages,
		from: DEFAULT_FROM,
		to: OffsetDateTime::now_utc().date(),
	}))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<braid_service::Error> for ApiError {
	fn from(err: braid_service::Error) -> Self {
		use braid_service::Error;

		let (status, error_code) = match &err {
			Error::Store(_) => (StatusCode::BAD_GATEWAY, "store_error"),
			Error::Data(_) => (StatusCode::UNPROCESSABLE_ENTITY, "data_integrity"),
			Error::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			Error::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
