//! Panelkit command-line front end.
//!
//! Works on layout documents outside the editor:
//! - normalize and check stored layouts
//! - print per-type size limits and entity domains
//! - list the entities a widget type can bind

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};
use commands::EntityListing;
use panelkit_editor::EditorConfig;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = EditorConfig::load_or_default(cli.config.as_deref())?;
	debug!(?config, "configuration loaded");

	match cli.command {
		Command::Normalize { file, output } => {
			if let Some(text) = commands::normalize(&config, &file, output.as_deref()).await? {
				println!("{text}");
			}
		}
		Command::Check { file } => {
			let outcome = commands::check(&config, &file).await?;
			println!("{}", outcome.message);
			if !outcome.canonical {
				return Ok(ExitCode::FAILURE);
			}
		}
		Command::Limits { kind } => println!("{}", commands::limits(&config, kind.as_deref())),
		Command::Entities {
			catalog,
			kind,
			slider_domain,
			button_mode,
			query,
		} => {
			let catalog = commands::read_catalog(&catalog).await?;
			let listing = EntityListing {
				kind: &kind,
				slider_domain: slider_domain.as_deref(),
				button_mode: button_mode.as_deref(),
				query: query.as_deref(),
			};
			println!("{}", commands::entities(&config, &catalog, &listing)?);
		}
	}
	Ok(ExitCode::SUCCESS)
}

/// Logs to stderr so command output on stdout stays clean.
///
/// `RUST_LOG` overrides the level picked by `--verbose`.
fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("panelkit_editor=debug,panelkit_cli=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
