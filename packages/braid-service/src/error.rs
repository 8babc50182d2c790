pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Store error: {0}")]
	Store(#[from] braid_store::Error),
	#[error(transparent)]
	Data(#[from] braid_domain::Error),
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
