use std::path::Path;

use time::OffsetDateTime;

use crate::{
	DigestService, Error, PageText, Report, ReportBuilder, ReportMetadata, Result, SeenTitles,
	assemble, sections, summarize,
};
use digest_config::{DedupScope, Job};

impl DigestService {
	/// Processes every document of `job` under `input_dir` and assembles the report.
	pub async fn run(&self, job: &Job, input_dir: &Path) -> Result<Report> {
		self.run_at(job, input_dir, report_now()).await
	}

	pub async fn run_at(&self, job: &Job, input_dir: &Path, now: OffsetDateTime) -> Result<Report> {
		tracing::info!(
			persona = %job.persona,
			documents = job.documents.len(),
			dedup_scope = ?self.cfg.dedup.scope,
			"Digest run started."
		);

		let job_embedding = self.embed_job(&job.job).await?;
		let mut builder = ReportBuilder::new();
		let mut seen = SeenTitles::new();

		for document in &job.documents {
			if self.cfg.dedup.scope == DedupScope::Document {
				seen = SeenTitles::new();
			}

			let path = input_dir.join(document);
			let pages = self.providers.reader.read_pages(&path).map_err(|err| Error::Reader {
				message: format!("Failed to read {}: {err:#}", path.display()),
			})?;
			let Some(pages) = pages else {
				tracing::warn!(document = %document, path = %path.display(), "File missing.");

				continue;
			};
			let admitted = self
				.digest_document(document, &pages, &job_embedding, &mut seen, &mut builder)
				.await?;

			tracing::info!(
				document = %document,
				pages = pages.len(),
				admitted,
				"Document digested."
			);
		}

		let metadata = ReportMetadata {
			persona: job.persona.clone(),
			job: job.job.clone(),
			documents: job.documents.clone(),
			timestamp: assemble::format_timestamp(now)?,
		};
		let report = builder.finish(metadata);

		tracing::info!(sections = report.extracted_sections.len(), "Digest run complete.");

		Ok(report)
	}

	/// Embeds the job description once for the whole run.
	pub async fn embed_job(&self, description: &str) -> Result<Vec<f32>> {
		let texts = [description.to_string()];
		let mut vectors =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		if vectors.len() != 1 {
			return Err(Error::Provider {
				message: format!("Embedder returned {} vectors for the job.", vectors.len()),
			});
		}

		let vector = vectors.remove(0);

		if vector.is_empty() {
			return Err(Error::Provider { message: "Job embedding is empty.".to_string() });
		}

		Ok(vector)
	}

	async fn digest_document(
		&self,
		document: &str,
		pages: &[PageText],
		job_embedding: &[f32],
		seen: &mut SeenTitles,
		builder: &mut ReportBuilder,
	) -> Result<usize> {
		let mut admitted = 0;

		for page in pages {
			let chunks = self.page_chunks(&page.text)?;
			let combined = summarize::combine_chunks(&chunks);
			let Some(refined) = self.summarize_page(job_embedding, &combined).await? else {
				tracing::debug!(document, page = page.number, "Page has no qualifying text.");

				continue;
			};
			let title = sections::section_title(&refined, &self.cfg.summary);

			if !seen.admit(&title) {
				tracing::debug!(document, page = page.number, %title, "Duplicate section title.");

				continue;
			}

			builder.push_page(document, page.number, title, refined);

			admitted += 1;
		}

		Ok(admitted)
	}
}

fn report_now() -> OffsetDateTime {
	OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
