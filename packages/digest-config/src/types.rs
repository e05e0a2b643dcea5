use serde::Deserialize;
use serde_json::{Map, Value};

/// Provider id that selects the offline feature-hashing embedder.
pub const LOCAL_HASH_PROVIDER_ID: &str = "local-hash";

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	#[serde(default)]
	pub paragraphs: Paragraphs,
	#[serde(default)]
	pub chunking: Chunking,
	#[serde(default)]
	pub summary: Summary,
	#[serde(default)]
	pub dedup: Dedup,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	#[serde(default)]
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	#[serde(default = "default_embedding_path")]
	pub path: String,
	#[serde(default)]
	pub model: String,
	pub dimensions: u32,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl EmbeddingProviderConfig {
	pub fn is_local_hash(&self) -> bool {
		self.provider_id == LOCAL_HASH_PROVIDER_ID
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Paragraphs {
	/// Paragraph candidates with fewer whitespace-delimited words are dropped.
	pub min_words: u32,
	/// Case-insensitive substrings that mark a paragraph as boilerplate.
	pub boilerplate_keywords: Vec<String>,
	/// Split on blank lines before normalizing instead of after.
	pub split_raw_text: bool,
}
impl Default for Paragraphs {
	fn default() -> Self {
		Self {
			min_words: 30,
			boilerplate_keywords: vec![
				"copyright".to_string(),
				"figure".to_string(),
				"index".to_string(),
			],
			split_raw_text: false,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Chunking {
	pub max_sentences: u32,
	/// Sentences with at most this many words are treated as fragments.
	pub fragment_max_words: u32,
}
impl Default for Chunking {
	fn default() -> Self {
		Self { max_sentences: 5, fragment_max_words: 4 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Summary {
	pub top_k: u32,
	pub title_chars: u32,
	pub title_suffix: String,
}
impl Default for Summary {
	fn default() -> Self {
		Self { top_k: 4, title_chars: 80, title_suffix: "...".to_string() }
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Dedup {
	pub scope: DedupScope,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupScope {
	/// One set of seen titles shared by every document in the run.
	#[default]
	Run,
	/// A fresh set of seen titles for each document.
	Document,
}

fn default_embedding_path() -> String {
	"/v1/embeddings".to_string()
}

fn default_timeout_ms() -> u64 {
	30_000
}
