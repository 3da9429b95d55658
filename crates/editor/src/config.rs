//! Editor configuration.
//!
//! Loaded from a TOML file with three optional tables:
//!
//! ```toml
//! [autocomplete]
//! debounce_ms = 220
//! max_items = 24
//! min_remote_query_len = 2
//!
//! [entities]
//! sensor_domains = "strict" # or "include_binary"
//!
//! [layout]
//! default_page_id = "home"
//! default_page_title = "Home"
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected so typos do
//! not silently fall back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use panelkit_registry::DomainPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading the configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	pub autocomplete: AutocompleteConfig,
	pub entities: EntityConfig,
	pub layout: LayoutConfig,
}

/// Entity autocomplete tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutocompleteConfig {
	/// Quiet period after the last keystroke before a search runs.
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	/// Suggestions shown per field.
	#[serde(default = "default_max_items")]
	pub max_items: usize,
	/// Shortest search text that triggers a remote query when no domain is typed.
	#[serde(default = "default_min_remote_query_len")]
	pub min_remote_query_len: usize,
}

fn default_debounce_ms() -> u64 {
	220
}

fn default_max_items() -> usize {
	24
}

fn default_min_remote_query_len() -> usize {
	2
}

impl Default for AutocompleteConfig {
	fn default() -> Self {
		Self {
			debounce_ms: default_debounce_ms(),
			max_items: default_max_items(),
			min_remote_query_len: default_min_remote_query_len(),
		}
	}
}

impl AutocompleteConfig {
	/// Returns the debounce period as a [`Duration`].
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}

/// Entity compatibility settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityConfig {
	pub sensor_domains: DomainPolicy,
}

/// Defaults for freshly created layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
	#[serde(default = "default_page_id")]
	pub default_page_id: String,
	#[serde(default = "default_page_title")]
	pub default_page_title: String,
}

fn default_page_id() -> String {
	"home".to_string()
}

fn default_page_title() -> String {
	"Home".to_string()
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			default_page_id: default_page_id(),
			default_page_title: default_page_title(),
		}
	}
}

impl EditorConfig {
	/// Parses configuration from TOML text.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml(&text)
	}

	/// Loads `path` when given, otherwise returns the defaults.
	pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
		match path {
			Some(path) => Self::load(path),
			None => Ok(Self::default()),
		}
	}
}
