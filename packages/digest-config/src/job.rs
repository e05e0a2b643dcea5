use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Error, Result};

/// The task that drives a run: who is asking, what they need, and which documents to read.
#[derive(Clone, Debug, Deserialize)]
pub struct Job {
	pub persona: String,
	pub job: String,
	pub documents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JobFile {
	metadata: Job,
}

pub fn load_job(path: &Path) -> Result<Job> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadJob { path: path.to_path_buf(), source: err })?;
	let file: JobFile = serde_json::from_str(&raw)
		.map_err(|err| Error::ParseJob { path: path.to_path_buf(), source: err })?;

	validate_job(&file.metadata)?;

	Ok(file.metadata)
}

pub fn validate_job(job: &Job) -> Result<()> {
	if job.job.trim().is_empty() {
		return Err(Error::Validation { message: "metadata.job must be non-empty.".to_string() });
	}
	if job.documents.iter().any(|document| document.trim().is_empty()) {
		return Err(Error::Validation {
			message: "metadata.documents entries must be non-empty.".to_string(),
		});
	}

	Ok(())
}
