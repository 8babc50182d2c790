pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Malformed timestamp {raw:?}.")]
	MalformedTimestamp { raw: String },
}
