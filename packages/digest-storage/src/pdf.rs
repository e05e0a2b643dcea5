use std::{fmt::Display, path::Path};

use lopdf::Document;

use crate::{Error, PageText, Result};

/// Reads every page of the PDF at `path` in page order.
///
/// Returns `Ok(None)` when `path` is not a file. A page whose text cannot be extracted comes
/// back empty rather than failing the whole document.
pub fn read_pages(path: &Path) -> Result<Option<Vec<PageText>>> {
	if !path.is_file() {
		return Ok(None);
	}

	let document = Document::load(path)
		.map_err(|err| Error::Pdf { path: path.to_path_buf(), source: Box::new(err) })?;
	let numbers = document.get_pages().into_keys();

	Ok(Some(collect_pages(path, numbers, |number| document.extract_text(&[number]))))
}

fn collect_pages<I, F, E>(path: &Path, numbers: I, mut extract: F) -> Vec<PageText>
where
	I: IntoIterator<Item = u32>,
	F: FnMut(u32) -> Result<String, E>,
	E: Display,
{
	let mut out = Vec::new();

	for number in numbers {
		let text = match extract(number) {
			Ok(text) => text,
			Err(err) => {
				tracing::warn!(
					path = %path.display(),
					page = number,
					error = %err,
					"Failed to extract page text."
				);

				String::new()
			},
		};

		out.push(PageText { number, text });
	}

	out
}
