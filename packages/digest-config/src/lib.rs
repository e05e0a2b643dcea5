mod error;
mod job;
mod types;

pub use error::{Error, Result};
pub use job::{Job, load_job, validate_job};
pub use types::{
	Chunking, Config, Dedup, DedupScope, EmbeddingProviderConfig, LOCAL_HASH_PROVIDER_ID,
	Paragraphs, Providers, Service, Summary,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if hides_warnings(&cfg.service.log_level) {
		return Err(Error::Validation {
			message: "service.log_level must not filter out warnings globally.".to_string(),
		});
	}

	let embedding = &cfg.providers.embedding;

	if embedding.provider_id.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.provider_id must be non-empty.".to_string(),
		});
	}
	if embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if !embedding.is_local_hash() {
		for (label, value) in [
			("providers.embedding.api_base", &embedding.api_base),
			("providers.embedding.api_key", &embedding.api_key),
			("providers.embedding.model", &embedding.model),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation {
					message: format!(
						"{label} must be non-empty unless provider_id is {}.",
						types::LOCAL_HASH_PROVIDER_ID
					),
				});
			}
		}
	}
	if embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.paragraphs.min_words == 0 {
		return Err(Error::Validation {
			message: "paragraphs.min_words must be greater than zero.".to_string(),
		});
	}
	if cfg.paragraphs.boilerplate_keywords.iter().any(|keyword| keyword.is_empty()) {
		return Err(Error::Validation {
			message: "paragraphs.boilerplate_keywords entries must be non-empty.".to_string(),
		});
	}
	if cfg.chunking.max_sentences == 0 {
		return Err(Error::Validation {
			message: "chunking.max_sentences must be greater than zero.".to_string(),
		});
	}
	if cfg.summary.top_k == 0 {
		return Err(Error::Validation {
			message: "summary.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.summary.title_chars == 0 {
		return Err(Error::Validation {
			message: "summary.title_chars must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

/// Missing documents are reported as warnings, so a global `error` or `off` level would hide them.
fn hides_warnings(log_level: &str) -> bool {
	log_level
		.split(',')
		.map(|directive| directive.trim().to_ascii_lowercase())
		.any(|directive| directive == "error" || directive == "off")
}

fn normalize(cfg: &mut Config) {
	for keyword in &mut cfg.paragraphs.boilerplate_keywords {
		*keyword = keyword.trim().to_lowercase();
	}

	cfg.providers.embedding.api_base =
		cfg.providers.embedding.api_base.trim_end_matches('/').to_string();
}
