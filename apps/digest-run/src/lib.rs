use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use digest_config::Config;
use digest_service::DigestService;

#[derive(Debug, Parser)]
#[command(
	version = digest_cli::VERSION,
	rename_all = "kebab",
	styles = digest_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'j', value_name = "FILE", default_value = "job.json")]
	pub job: PathBuf,
	#[arg(long, short = 'i', value_name = "DIR", default_value = "input")]
	pub input_dir: PathBuf,
	#[arg(long, short = 'o', value_name = "FILE", default_value = "output.json")]
	pub output: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = digest_config::load(&args.config)?;
	let filter = log_filter(&config.service.log_level);

	tracing_subscriber::fmt().with_env_filter(filter).init();

	execute(&args, config).await
}

/// Unparseable directives fall back to `info`.
pub fn log_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Loads the job, digests every listed document, and writes the report. Nothing is written
/// unless the whole run succeeds.
pub async fn execute(args: &Args, config: Config) -> color_eyre::Result<()> {
	let job = digest_config::load_job(&args.job)?;
	let service = DigestService::new(config);
	let report = service.run(&job, &args.input_dir).await?;

	digest_storage::report::write_json_atomic(&args.output, &report)?;

	tracing::info!(
		output = %args.output.display(),
		sections = report.extracted_sections.len(),
		"Report written."
	);

	Ok(())
}
