use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize_text;
use digest_config::Paragraphs;

static PARAGRAPH_BREAK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\n{2,}").expect("Paragraph break pattern must compile."));

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParagraphRejectReason {
	TooShort { words: usize },
	/// Matched keyword, as configured (lowercase).
	Boilerplate { keyword: String },
}

pub fn split_paragraphs(text: &str) -> Vec<&str> {
	PARAGRAPH_BREAK.split(text).collect()
}

/// Keywords match as substrings, so "indexing" trips "index".
pub fn paragraph_gate(paragraph: &str, cfg: &Paragraphs) -> Result<(), ParagraphRejectReason> {
	let words = paragraph.split_whitespace().count();

	if words < cfg.min_words as usize {
		return Err(ParagraphRejectReason::TooShort { words });
	}

	let lowered = paragraph.to_lowercase();

	if let Some(keyword) =
		cfg.boilerplate_keywords.iter().find(|keyword| lowered.contains(keyword.as_str()))
	{
		return Err(ParagraphRejectReason::Boilerplate { keyword: keyword.clone() });
	}

	Ok(())
}

/// Splits `text` into paragraph candidates, re-normalizes each one, and returns those that
/// pass [`paragraph_gate`] in source order.
pub fn filter_paragraphs(text: &str, cfg: &Paragraphs) -> Vec<String> {
	let mut kept = Vec::new();

	for candidate in split_paragraphs(text) {
		let paragraph = normalize_text(candidate);

		match paragraph_gate(&paragraph, cfg) {
			Ok(()) => kept.push(paragraph),
			Err(reason) if !paragraph.is_empty() => {
				tracing::debug!(?reason, "Paragraph rejected.");
			},
			Err(_) => {},
		}
	}

	kept
}

/// Page text ready for chunking. Normalizing before splitting folds every blank line away,
/// so the default flow treats the page as a single paragraph.
pub fn page_paragraphs(raw: &str, cfg: &Paragraphs) -> Vec<String> {
	if cfg.split_raw_text {
		filter_paragraphs(raw, cfg)
	} else {
		filter_paragraphs(&normalize_text(raw), cfg)
	}
}
