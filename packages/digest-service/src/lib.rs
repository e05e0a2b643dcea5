pub mod assemble;
pub mod pipeline;
pub mod relevance;
pub mod sections;
pub mod summarize;

mod error;

use std::{future::Future, path::Path, pin::Pin, sync::Arc};

pub use assemble::{Report, ReportBuilder, ReportMetadata, SectionRecord, SubSectionRecord};
pub use digest_chunking::{SentenceSegmenter, UnicodeSentenceSegmenter};
use digest_config::{Config, EmbeddingProviderConfig};
use digest_providers::{embedding, hashing};
pub use digest_storage::PageText;
pub use error::{Error, Result};
pub use sections::SeenTitles;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	/// One vector per input text, in input order.
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait DocumentReader
where
	Self: Send + Sync,
{
	/// Pages of the document at `path`, or `None` when no such document exists.
	fn read_pages(&self, path: &Path) -> color_eyre::Result<Option<Vec<PageText>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub reader: Arc<dyn DocumentReader>,
	pub segmenter: Arc<dyn SentenceSegmenter>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		reader: Arc<dyn DocumentReader>,
		segmenter: Arc<dyn SentenceSegmenter>,
	) -> Self {
		Self { embedding, reader, segmenter }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let defaults = Arc::new(DefaultProviders);

		Self {
			embedding: defaults.clone(),
			reader: defaults,
			segmenter: Arc::new(UnicodeSentenceSegmenter),
		}
	}
}

pub struct DigestService {
	pub cfg: Config,
	pub providers: Providers,
}
impl DigestService {
	pub fn new(cfg: Config) -> Self {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		if cfg.is_local_hash() {
			return Box::pin(async move { Ok(hashing::embed(cfg, texts)?) });
		}

		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

impl DocumentReader for DefaultProviders {
	fn read_pages(&self, path: &Path) -> color_eyre::Result<Option<Vec<PageText>>> {
		Ok(digest_storage::pdf::read_pages(path)?)
	}
}
