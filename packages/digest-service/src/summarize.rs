use digest_chunking::Chunk;
use digest_domain::paragraph;

use crate::{DigestService, Result, relevance};

impl DigestService {
	/// Chunks of every paragraph on the page that survives the paragraph gate, in order.
	pub fn page_chunks(&self, raw: &str) -> Result<Vec<Chunk>> {
		let mut chunks = Vec::new();

		for paragraph in paragraph::page_paragraphs(raw, &self.cfg.paragraphs) {
			let built = digest_chunking::build_chunks(
				&paragraph,
				self.providers.segmenter.as_ref(),
				&self.cfg.chunking,
			)?;

			chunks.extend(built);
		}

		Ok(chunks)
	}

	/// Refined summary of a page's combined chunk text, or `None` when there is nothing to
	/// summarize. The page is re-segmented as a whole so `top_k` caps the page, not each chunk.
	pub async fn summarize_page(
		&self,
		job_embedding: &[f32],
		combined: &str,
	) -> Result<Option<String>> {
		if combined.trim().is_empty() {
			return Ok(None);
		}

		let sentences = digest_chunking::qualifying_sentences(
			combined,
			self.providers.segmenter.as_ref(),
			&self.cfg.chunking,
		)?;
		let refined = relevance::select_relevant(
			self.providers.embedding.as_ref(),
			&self.cfg.providers.embedding,
			job_embedding,
			&sentences,
			self.cfg.summary.top_k as usize,
		)
		.await?;

		Ok(Some(refined))
	}
}

pub fn combine_chunks(chunks: &[Chunk]) -> String {
	chunks.iter().map(|chunk| chunk.text.as_str()).collect::<Vec<_>>().join(" ")
}
