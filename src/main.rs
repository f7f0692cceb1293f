#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "uedoc", about = "UEFORMAT (Unreal export) inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Header fields and top-level sections.
	Info(cmd::info::Args),
	/// Nested section tree.
	Sections(cmd::sections::Args),
	/// Full decode with a per-asset summary.
	Show(cmd::show::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> uedoc::ueformat::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Sections(args) => cmd::sections::run(args),
		Commands::Show(args) => cmd::show::run(args),
	}
}
