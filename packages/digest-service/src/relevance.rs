use std::cmp::Ordering;

use crate::{EmbeddingProvider, Error, Result};
use digest_config::EmbeddingProviderConfig;

/// A candidate sentence with its position in the pool and its similarity to the job.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredSentence<'a> {
	pub position: usize,
	pub text: &'a str,
	pub score: f32,
}

/// Picks up to `top_k` of `sentences` by similarity to `job_embedding` and joins them with
/// single spaces in their original order.
///
/// Pools of at most `top_k` sentences are returned whole without calling the provider.
pub async fn select_relevant(
	provider: &dyn EmbeddingProvider,
	cfg: &EmbeddingProviderConfig,
	job_embedding: &[f32],
	sentences: &[String],
	top_k: usize,
) -> Result<String> {
	if sentences.len() <= top_k {
		return Ok(sentences.join(" "));
	}

	let embeddings = provider.embed(cfg, sentences).await?;
	let scored = score_sentences(job_embedding, sentences, &embeddings)?;
	let picked = select_top_k(&scored, top_k);

	tracing::trace!(candidates = sentences.len(), ?picked, "Selected relevant sentences.");

	Ok(picked.iter().map(|&position| sentences[position].as_str()).collect::<Vec<_>>().join(" "))
}

pub fn score_sentences<'a>(
	job_embedding: &[f32],
	sentences: &'a [String],
	embeddings: &[Vec<f32>],
) -> Result<Vec<ScoredSentence<'a>>> {
	if embeddings.len() != sentences.len() {
		return Err(Error::Provider {
			message: format!(
				"Embedder returned {} vectors for {} sentences.",
				embeddings.len(),
				sentences.len()
			),
		});
	}

	let mut scored = Vec::with_capacity(sentences.len());

	for (position, (text, embedding)) in sentences.iter().zip(embeddings).enumerate() {
		if embedding.len() != job_embedding.len() {
			return Err(Error::Provider {
				message: format!(
					"Sentence embedding has dimension {}, job embedding has {}.",
					embedding.len(),
					job_embedding.len()
				),
			});
		}

		// Zero-norm vectors carry no signal.
		let score = digest_providers::cosine_similarity(job_embedding, embedding).unwrap_or(0.0);

		scored.push(ScoredSentence { position, text: text.as_str(), score });
	}

	Ok(scored)
}

/// Positions of the `top_k` highest scores, ascending. Equal scores prefer the earlier
/// position; NaN ranks below every number.
pub fn select_top_k(scored: &[ScoredSentence<'_>], top_k: usize) -> Vec<usize> {
	let mut order: Vec<&ScoredSentence<'_>> = scored.iter().collect();

	order.sort_by(|lhs, rhs| descending(lhs.score, rhs.score));

	let mut picked: Vec<usize> =
		order.into_iter().take(top_k).map(|sentence| sentence.position).collect();

	picked.sort_unstable();

	picked
}

fn descending(lhs: f32, rhs: f32) -> Ordering {
	match (lhs.is_nan(), rhs.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => rhs.partial_cmp(&lhs).unwrap_or(Ordering::Equal),
	}
}
