use std::collections::HashSet;

use digest_config::Summary;

/// Title for a page: the first `title_chars` characters of its refined summary followed by
/// `title_suffix`. The suffix is appended even when nothing was cut.
pub fn section_title(refined: &str, cfg: &Summary) -> String {
	let mut title: String = refined.chars().take(cfg.title_chars as usize).collect();

	title.push_str(&cfg.title_suffix);

	title
}

/// Titles already emitted. Exact string equality is the only duplicate signal.
#[derive(Debug, Default)]
pub struct SeenTitles {
	titles: HashSet<String>,
}
impl SeenTitles {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `title` and returns `true` the first time it is seen.
	pub fn admit(&mut self, title: &str) -> bool {
		if self.titles.contains(title) {
			return false;
		}

		self.titles.insert(title.to_string())
	}

	pub fn len(&self) -> usize {
		self.titles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.titles.is_empty()
	}
}
