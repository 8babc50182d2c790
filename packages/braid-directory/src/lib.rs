pub mod decorate;

mod cache;
mod error;
mod http;

pub use cache::NameCache;
pub use error::Error;
pub use http::HttpDirectory;

use std::{future::Future, pin::Pin};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolves opaque user and channel ids to display names.
///
/// Lookups are best-effort: a failure degrades to the input id and never
/// aborts the surrounding request.
pub trait Directory
where
	Self: Send + Sync,
{
	fn resolve_user<'a>(&'a self, id: &'a str) -> BoxFuture<'a, String>;
	fn resolve_channel<'a>(&'a self, id: &'a str) -> BoxFuture<'a, String>;
}

/// Passes ids through unresolved, for archives without a directory service.
pub struct NoDirectory;

impl Directory for NoDirectory {
	fn resolve_user<'a>(&'a self, id: &'a str) -> BoxFuture<'a, String> {
		Box::pin(std::future::ready(id.to_string()))
	}

	fn resolve_channel<'a>(&'a self, id: &'a str) -> BoxFuture<'a, String> {
		Box::pin(std::future::ready(id.to_string()))
	}
}
