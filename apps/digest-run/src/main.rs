// crates.io
use clap::Parser;
// self
use digest_run::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	digest_run::run(args).await
}
