use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::format_description};

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
	pub persona: String,
	pub job: String,
	pub documents: Vec<String>,
	/// `YYYY-MM-DD HH:MM`.
	pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
	pub document: String,
	pub page: u32,
	pub section_title: String,
	pub importance_rank: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSectionRecord {
	pub document: String,
	pub page: u32,
	pub refined_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
	pub metadata: ReportMetadata,
	pub extracted_sections: Vec<SectionRecord>,
	pub sub_section_analysis: Vec<SubSectionRecord>,
}

/// Accumulates one section and one sub-section per admitted page. Ranks are assigned only in
/// [`ReportBuilder::finish`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
	sections: Vec<SectionRecord>,
	analyses: Vec<SubSectionRecord>,
}
impl ReportBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_page(&mut self, document: &str, page: u32, title: String, refined_text: String) {
		self.sections.push(SectionRecord {
			document: document.to_string(),
			page,
			section_title: title,
			importance_rank: 0,
		});
		self.analyses.push(SubSectionRecord {
			document: document.to_string(),
			page,
			refined_text,
		});
	}

	pub fn len(&self) -> usize {
		self.sections.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Sorts both lists by (document, page) and ranks sections 1..=N in that order.
	pub fn finish(self, metadata: ReportMetadata) -> Report {
		let Self { mut sections, mut analyses } = self;

		sections.sort_by(|lhs, rhs| {
			(lhs.document.as_str(), lhs.page).cmp(&(rhs.document.as_str(), rhs.page))
		});
		analyses.sort_by(|lhs, rhs| {
			(lhs.document.as_str(), lhs.page).cmp(&(rhs.document.as_str(), rhs.page))
		});

		for (idx, section) in sections.iter_mut().enumerate() {
			section.importance_rank = idx as u32 + 1;
		}

		Report { metadata, extracted_sections: sections, sub_section_analysis: analyses }
	}
}

pub fn format_timestamp(now: OffsetDateTime) -> Result<String> {
	now.format(format_description!("[year]-[month]-[day] [hour]:[minute]")).map_err(|err| {
		Error::InvalidRequest { message: format!("Failed to format report timestamp: {err}") }
	})
}
