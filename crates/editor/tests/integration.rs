#![allow(unused_crate_dependencies)]

#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/editing.rs"]
mod editing;

#[path = "integration/import_export.rs"]
mod import_export;

#[path = "integration/persistence.rs"]
mod persistence;

#[path = "integration/suggestions.rs"]
mod suggestions;
