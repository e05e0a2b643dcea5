//! Offline embedder: signed feature hashing of lowercase alphanumeric terms.
//!
//! Vectors are L2-normalized, so cosine similarity reduces to weighted term overlap. Text
//! without any term maps to the zero vector.

use crate::{Error, Result};

pub fn embed(
	cfg: &digest_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let dimensions = cfg.dimensions as usize;

	if dimensions == 0 {
		return Err(Error::InvalidConfig {
			message: "Hashing embedder requires dimensions greater than zero.".to_string(),
		});
	}

	Ok(texts.iter().map(|text| embed_one(text, dimensions)).collect())
}

fn embed_one(text: &str, dimensions: usize) -> Vec<f32> {
	let mut vec = vec![0.0_f32; dimensions];

	for term in terms(text) {
		let hash = blake3::hash(term.as_bytes());
		let bytes = hash.as_bytes();
		let mut bucket_bytes = [0_u8; 8];

		bucket_bytes.copy_from_slice(&bytes[..8]);

		let bucket = (u64::from_le_bytes(bucket_bytes) % dimensions as u64) as usize;
		let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };

		vec[bucket] += sign;
	}

	let norm = vec.iter().map(|value| value * value).sum::<f32>().sqrt();

	if norm > f32::EPSILON {
		for value in &mut vec {
			*value /= norm;
		}
	}

	vec
}

fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
	text.split(|ch: char| !ch.is_alphanumeric())
		.filter(|term| term.chars().count() >= 2)
		.map(str::to_lowercase)
}
