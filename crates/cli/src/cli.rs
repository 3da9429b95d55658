use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "panelkit")]
#[command(about = "Inspect and repair kiosk panel layouts")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Editor configuration file (TOML)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the canonical form of a layout document
	Normalize {
		/// Layout JSON file
		file: PathBuf,
		/// Write the result here instead of stdout
		#[arg(long, short = 'o', value_name = "PATH")]
		output: Option<PathBuf>,
	},
	/// Exit non-zero if a layout document is not canonical
	Check {
		/// Layout JSON file
		file: PathBuf,
	},
	/// Show size limits and entity domains per widget type
	Limits {
		/// Widget type name; all types when omitted
		#[arg(value_name = "TYPE")]
		kind: Option<String>,
	},
	/// List entities a widget type can bind
	Entities {
		/// Entity listing: a JSON array or `{"items": [...]}`
		catalog: PathBuf,
		/// Widget type name
		#[arg(long = "type", short = 't', value_name = "TYPE", default_value = "sensor")]
		kind: String,
		/// Slider entity domain setting
		#[arg(long, value_name = "DOMAIN")]
		slider_domain: Option<String>,
		/// Button mode setting
		#[arg(long, value_name = "MODE")]
		button_mode: Option<String>,
		/// Search text, optionally `<domain>.<fragment>`
		#[arg(long, short = 'q')]
		query: Option<String>,
	},
}
