use std::{
	collections::HashMap,
	path::Path,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use color_eyre::eyre;
use serde_json::Map;

use digest_config::{
	Chunking, Config, Dedup, DedupScope, EmbeddingProviderConfig, Paragraphs, Providers, Service,
	Summary,
};
use digest_service::{
	BoxFuture, DigestService, DocumentReader, EmbeddingProvider, PageText, UnicodeSentenceSegmenter,
};

pub fn test_config() -> Config {
	Config {
		service: Service { log_level: "debug".to_string() },
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "stub".to_string(),
				dimensions: 3,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		paragraphs: Paragraphs::default(),
		chunking: Chunking::default(),
		summary: Summary::default(),
		dedup: Dedup { scope: DedupScope::Run },
	}
}

/// Builds a service over in-memory documents with the default sentence segmenter.
pub fn build_service(
	cfg: Config,
	embedding: Arc<dyn EmbeddingProvider>,
	reader: MemoryReader,
) -> DigestService {
	DigestService::with_providers(
		cfg,
		digest_service::Providers::new(
			embedding,
			Arc::new(reader),
			Arc::new(UnicodeSentenceSegmenter),
		),
	)
}

/// Documents keyed by file name; the directory part of a lookup path is ignored.
#[derive(Debug, Default)]
pub struct MemoryReader {
	documents: HashMap<String, Vec<String>>,
}
impl MemoryReader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_document<I, S>(mut self, name: &str, pages: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.documents.insert(name.to_string(), pages.into_iter().map(Into::into).collect());

		self
	}
}
impl DocumentReader for MemoryReader {
	fn read_pages(&self, path: &Path) -> color_eyre::Result<Option<Vec<PageText>>> {
		let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
			return Ok(None);
		};
		let Some(pages) = self.documents.get(name) else { return Ok(None) };

		Ok(Some(
			pages
				.iter()
				.enumerate()
				.map(|(idx, text)| PageText { number: idx as u32 + 1, text: text.clone() })
				.collect(),
		))
	}
}

/// One dimension per keyword holding its occurrence count, plus a constant bias dimension.
/// Text mentioning more of the keywords scores higher against a job naming them.
pub struct KeywordEmbedding {
	pub keywords: Vec<String>,
	pub calls: Arc<AtomicUsize>,
}
impl KeywordEmbedding {
	pub fn new<I, S>(keywords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			keywords: keywords.into_iter().map(|keyword| keyword.into().to_lowercase()).collect(),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn vector(&self, text: &str) -> Vec<f32> {
		let lowered = text.to_lowercase();
		let mut vec: Vec<f32> = self
			.keywords
			.iter()
			.map(|keyword| lowered.matches(keyword.as_str()).count() as f32)
			.collect();

		vec.push(1.0);

		vec
	}
}
impl EmbeddingProvider for KeywordEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let vectors = texts.iter().map(|text| self.vector(text)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

/// Same vector for every text, so all candidates tie. Counts calls.
pub struct SpyEmbedding {
	pub vector_dim: u32,
	pub calls: Arc<AtomicUsize>,
}
impl EmbeddingProvider for SpyEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let dim = self.vector_dim as usize;
		let vectors = texts.iter().map(|_| vec![1.0; dim]).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

/// Succeeds for the first `ok_calls` calls with constant vectors, then fails.
pub struct FailingEmbedding {
	pub ok_calls: usize,
	pub calls: Arc<AtomicUsize>,
}
impl FailingEmbedding {
	pub fn after(ok_calls: usize) -> Self {
		Self { ok_calls, calls: Arc::new(AtomicUsize::new(0)) }
	}
}
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		let call = self.calls.fetch_add(1, Ordering::SeqCst);
		let result = if call < self.ok_calls {
			Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0]).collect())
		} else {
			Err(eyre::eyre!("Embedding backend unavailable."))
		};

		Box::pin(async move { result })
	}
}

/// A paragraph of `count` distinct sentences, each longer than the fragment limit.
/// Sentences whose index is in `about` mention `topic`.
pub fn paragraph(prefix: &str, count: usize, topic: &str, about: &[usize]) -> String {
	(0..count)
		.map(|idx| {
			if about.contains(&idx) {
				format!("{prefix} sentence {idx} discusses {topic} in some real detail.")
			} else {
				format!("{prefix} sentence {idx} covers unrelated travel logistics at length.")
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}
