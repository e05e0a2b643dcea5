pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Segmenter error: {message}")]
	Segmenter { message: String },
	#[error("Reader error: {message}")]
	Reader { message: String },
}
impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: format!("{err:#}") }
	}
}

impl From<digest_chunking::Error> for Error {
	fn from(err: digest_chunking::Error) -> Self {
		match err {
			digest_chunking::Error::Segmenter { message } => Self::Segmenter { message },
		}
	}
}
