//! Layout persistence.
//!
//! Stores hand back raw text on load so the session can normalize it (and
//! fall back to a default layout) the same way it treats imports.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::document::LayoutDocument;

/// Errors from layout stores.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Nothing has been saved yet.
	#[error("no stored layout")]
	Empty,

	#[error("I/O error on {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	#[error("failed to encode layout: {0}")]
	Encode(#[from] serde_json::Error),
}

/// Where layouts are loaded from and saved to.
#[async_trait]
pub trait LayoutStore: Send + Sync {
	/// Returns the stored JSON text.
	async fn load(&self) -> Result<String, StoreError>;

	/// Replaces the stored layout.
	async fn save(&self, document: &LayoutDocument) -> Result<(), StoreError>;
}

/// Store that keeps the last saved layout in memory.
#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
	text: Mutex<Option<String>>,
}

impl MemoryLayoutStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store that already holds `text`.
	pub fn with_text(text: impl Into<String>) -> Self {
		Self {
			text: Mutex::new(Some(text.into())),
		}
	}

	/// Returns the stored text, if any.
	pub async fn text(&self) -> Option<String> {
		self.text.lock().await.clone()
	}
}

#[async_trait]
impl LayoutStore for MemoryLayoutStore {
	async fn load(&self) -> Result<String, StoreError> {
		self.text.lock().await.clone().ok_or(StoreError::Empty)
	}

	async fn save(&self, document: &LayoutDocument) -> Result<(), StoreError> {
		let text = serde_json::to_string(document)?;
		*self.text.lock().await = Some(text);
		Ok(())
	}
}

/// Store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
	path: PathBuf,
}

impl FileLayoutStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn io_error(&self, error: std::io::Error) -> StoreError {
		StoreError::Io {
			path: self.path.clone(),
			error,
		}
	}
}

#[async_trait]
impl LayoutStore for FileLayoutStore {
	async fn load(&self) -> Result<String, StoreError> {
		match tokio::fs::read_to_string(&self.path).await {
			Ok(text) => Ok(text),
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Err(StoreError::Empty),
			Err(error) => Err(self.io_error(error)),
		}
	}

	/// Writes pretty JSON through a sibling temp file so a crash never
	/// leaves a truncated layout behind.
	async fn save(&self, document: &LayoutDocument) -> Result<(), StoreError> {
		let mut text = serde_json::to_string_pretty(document)?;
		text.push('\n');
		let tmp = self.path.with_extension("json.tmp");
		tokio::fs::write(&tmp, text).await.map_err(|e| self.io_error(e))?;
		tokio::fs::rename(&tmp, &self.path).await.map_err(|e| self.io_error(e))?;
		debug!(path = %self.path.display(), "store.saved");
		Ok(())
	}
}
