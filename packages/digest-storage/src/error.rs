#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("I/O failure at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse PDF at {path:?}.")]
	Pdf { path: std::path::PathBuf, source: Box<lopdf::Error> },
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
