use unicode_segmentation::UnicodeSegmentation;

use digest_config::Chunking;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Sentence segmenter failed: {message}")]
	Segmenter { message: String },
}

/// Splits text into an ordered sequence of sentences. Implementations must be deterministic.
pub trait SentenceSegmenter
where
	Self: Send + Sync,
{
	fn segment(&self, text: &str) -> Result<Vec<String>>;
}

/// UAX #29 sentence boundaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeSentenceSegmenter;
impl SentenceSegmenter for UnicodeSentenceSegmenter {
	fn segment(&self, text: &str) -> Result<Vec<String>> {
		Ok(text
			.split_sentence_bounds()
			.map(str::trim)
			.filter(|sentence| !sentence.is_empty())
			.map(str::to_string)
			.collect())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub chunk_index: usize,
	pub sentence_count: usize,
	pub text: String,
}

/// Sentences of `text` that are longer than `cfg.fragment_max_words` words, in order.
pub fn qualifying_sentences(
	text: &str,
	segmenter: &dyn SentenceSegmenter,
	cfg: &Chunking,
) -> Result<Vec<String>> {
	let sentences = segmenter.segment(text)?;
	let total = sentences.len();
	let kept: Vec<String> = sentences
		.into_iter()
		.filter(|sentence| sentence.split_whitespace().count() > cfg.fragment_max_words as usize)
		.collect();

	if kept.len() < total {
		tracing::trace!(total, kept = kept.len(), "Dropped sentence fragments.");
	}

	Ok(kept)
}

pub fn build_chunks(
	paragraph: &str,
	segmenter: &dyn SentenceSegmenter,
	cfg: &Chunking,
) -> Result<Vec<Chunk>> {
	let sentences = qualifying_sentences(paragraph, segmenter, cfg)?;

	Ok(group_sentences(sentences, cfg.max_sentences as usize))
}

fn group_sentences(sentences: Vec<String>, max_sentences: usize) -> Vec<Chunk> {
	let max_sentences = max_sentences.max(1);
	let mut chunks = Vec::new();
	let mut current: Vec<String> = Vec::with_capacity(max_sentences);

	for sentence in sentences {
		current.push(sentence);

		if current.len() >= max_sentences {
			push_chunk(&mut chunks, &mut current);
		}
	}

	if !current.is_empty() {
		push_chunk(&mut chunks, &mut current);
	}

	chunks
}

fn push_chunk(chunks: &mut Vec<Chunk>, current: &mut Vec<String>) {
	chunks.push(Chunk {
		chunk_index: chunks.len(),
		sentence_count: current.len(),
		text: current.join(" "),
	});

	current.clear();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sentence(idx: usize) -> String {
		format!("Sentence number {idx} has enough words.")
	}

	#[test]
	fn unicode_segmenter_splits_and_trims() {
		let sentences = UnicodeSentenceSegmenter
			.segment("First one here. Second one there!  Third?")
			.expect("Segmentation failed.");

		assert_eq!(sentences, vec!["First one here.", "Second one there!", "Third?"]);
	}

	#[test]
	fn groups_into_full_chunks_and_trailing_partial() {
		let paragraph = (0..12).map(sentence).collect::<Vec<_>>().join(" ");
		let chunks = build_chunks(&paragraph, &UnicodeSentenceSegmenter, &Chunking::default())
			.expect("Chunking failed.");
		let counts: Vec<usize> = chunks.iter().map(|chunk| chunk.sentence_count).collect();

		assert_eq!(counts, vec![5, 5, 2]);
		assert_eq!(chunks[2].chunk_index, 2);
		assert!(chunks[0].text.starts_with("Sentence number 0 has"));
		assert!(chunks[2].text.ends_with("Sentence number 11 has enough words."));
	}

	#[test]
	fn drops_short_fragments() {
		let paragraph = "Key Findings. Revenue grew in every single region this year. Page 4 of 9.";
		let chunks = build_chunks(paragraph, &UnicodeSentenceSegmenter, &Chunking::default())
			.expect("Chunking failed.");

		assert_eq!(chunks.len(), 1);
		assert_eq!(chunks[0].text, "Revenue grew in every single region this year.");
	}

	#[test]
	fn paragraph_of_fragments_yields_no_chunks() {
		let chunks = build_chunks(
			"Too short. Also short. Tiny.",
			&UnicodeSentenceSegmenter,
			&Chunking::default(),
		)
		.expect("Chunking failed.");

		assert!(chunks.is_empty());
	}

	#[test]
	fn exact_multiple_has_no_empty_trailing_chunk() {
		let paragraph = (0..10).map(sentence).collect::<Vec<_>>().join(" ");
		let chunks = build_chunks(&paragraph, &UnicodeSentenceSegmenter, &Chunking::default())
			.expect("Chunking failed.");

		assert_eq!(chunks.len(), 2);
	}
}
