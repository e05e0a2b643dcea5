use std::sync::LazyLock;

use regex::Regex;

// NBSP, zero-width space, bullet, ellipsis, en dash, em dash.
static NOISE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new("[\u{00A0}\u{200B}\u{2022}\u{2026}\u{2013}\u{2014}]")
		.expect("Noise character pattern must compile.")
});
static WHITESPACE_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("Whitespace pattern must compile."));

/// Strips extraction artifacts and collapses all whitespace, newlines included, to single
/// spaces.
pub fn normalize_text(input: &str) -> String {
	let replaced = NOISE_CHARS.replace_all(input, " ");
	let collapsed = WHITESPACE_RUN.replace_all(&replaced, " ");

	collapsed.trim().to_string()
}
