//! Subcommand implementations.
//!
//! Each command renders its output to a string so the binary decides where
//! it goes and tests can assert on it.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, bail};
use panelkit_editor::entities::search::{filter_local, parse_search_input};
use panelkit_editor::{
	EditorConfig, EditorSession, EntityCatalog, FileLayoutStore, LayoutStore, NormalizeReport, StaticEntityProvider,
	SuggestScope,
};
use panelkit_registry::{ButtonMode, DomainQuery, SizeLimits, SliderEntityDomain, WidgetType};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Result of `check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
	/// True if normalization leaves the document as it is.
	pub canonical: bool,
	pub message: String,
}

async fn import(config: &EditorConfig, file: &Path) -> anyhow::Result<(String, EditorSession, NormalizeReport)> {
	let text = FileLayoutStore::new(file)
		.load()
		.await
		.with_context(|| format!("failed to read {}", file.display()))?;
	let mut session = EditorSession::new(config.clone());
	let report = session
		.import_json(&text)
		.with_context(|| format!("failed to import {}", file.display()))?;
	Ok((text, session, report))
}

/// Normalizes `file`. Writes to `output` when given, otherwise returns the
/// canonical JSON.
pub async fn normalize(config: &EditorConfig, file: &Path, output: Option<&Path>) -> anyhow::Result<Option<String>> {
	let (_, mut session, report) = import(config, file).await?;
	if !report.is_clean() {
		for line in report.to_string().lines() {
			warn!("{line}");
		}
	}
	match output {
		Some(path) => {
			session.save_to(&FileLayoutStore::new(path)).await?;
			info!(path = %path.display(), "layout written");
			Ok(None)
		}
		None => Ok(Some(session.export_json()?)),
	}
}

/// Reports whether `file` is already canonical.
pub async fn check(config: &EditorConfig, file: &Path) -> anyhow::Result<CheckOutcome> {
	let (text, session, report) = import(config, file).await?;
	let stored: Value = serde_json::from_str(&text)?;
	let canonical: Value = serde_json::from_str(&session.export_json()?)?;
	let unchanged = report.is_clean() && stored == canonical;
	debug!(clean = report.is_clean(), unchanged, "check finished");

	let mut message = String::new();
	if unchanged {
		message.push_str("canonical");
	} else {
		if !report.is_clean() {
			writeln!(message, "{report}")?;
		}
		let fields = differing_widgets(&stored, &canonical);
		for id in &fields {
			writeln!(message, "widget {id:?} changes on normalization")?;
		}
		message.push_str("not canonical");
	}
	Ok(CheckOutcome {
		canonical: unchanged,
		message,
	})
}

/// Ids of widgets present in both documents whose stored form differs.
fn differing_widgets(stored: &Value, canonical: &Value) -> Vec<String> {
	let widgets = |doc: &Value| -> Vec<Value> {
		doc.get("pages")
			.and_then(Value::as_array)
			.into_iter()
			.flatten()
			.filter_map(|page| page.get("widgets").and_then(Value::as_array))
			.flatten()
			.cloned()
			.collect()
	};
	let before = widgets(stored);
	widgets(canonical)
		.into_iter()
		.filter_map(|after| {
			let id = after.get("id")?.as_str()?.to_string();
			let raw = before.iter().find(|w| w.get("id").and_then(Value::as_str) == Some(id.as_str()))?;
			(raw != &after).then_some(id)
		})
		.collect()
}

fn limits_line(name: &str, limits: SizeLimits, domains: &str) -> String {
	format!(
		"{name:<13} w {:>3}..={:<3} h {:>3}..={:<3} {domains}",
		limits.min_w, limits.max_w, limits.min_h, limits.max_h
	)
}

fn domains_label(query: &DomainQuery) -> String {
	match query.allowed() {
		[] if query.kind.is_entityless() => "no entity".to_string(),
		[] => "any entity".to_string(),
		allowed => allowed.join(", "),
	}
}

/// Size limits and domains for one type name, or for every type.
///
/// Unknown names get the fallback limits.
pub fn limits(config: &EditorConfig, kind: Option<&str>) -> String {
	let policy = config.entities.sensor_domains;
	let kinds: Vec<WidgetType> = match kind {
		None => WidgetType::ALL.to_vec(),
		Some(name) => match WidgetType::from_name(name.trim()) {
			Some(kind) => vec![kind],
			None => return limits_line(name.trim(), SizeLimits::for_name(name), "unknown type"),
		},
	};
	kinds
		.into_iter()
		.map(|kind| {
			let query = DomainQuery::new(kind).with_policy(policy);
			limits_line(kind.as_str(), kind.size_limits(), &domains_label(&query))
		})
		.collect::<Vec<_>>()
		.join("\n")
}

/// Options of the `entities` command.
#[derive(Debug, Clone, Default)]
pub struct EntityListing<'a> {
	pub kind: &'a str,
	pub slider_domain: Option<&'a str>,
	pub button_mode: Option<&'a str>,
	pub query: Option<&'a str>,
}

/// Entities a widget type can bind, filtered by an optional search.
pub fn entities(config: &EditorConfig, catalog: &EntityCatalog, listing: &EntityListing<'_>) -> anyhow::Result<String> {
	let Some(kind) = WidgetType::from_name(listing.kind.trim()) else {
		bail!("unknown widget type {:?}", listing.kind);
	};
	let query = DomainQuery::new(kind)
		.with_slider_domain(SliderEntityDomain::normalize(listing.slider_domain))
		.with_button_mode(ButtonMode::normalize(listing.button_mode))
		.with_policy(config.entities.sensor_domains);
	let scope = SuggestScope::Widget(query);

	let mut out = String::new();
	writeln!(out, "{}: {}", kind.as_str(), domains_label(&query))?;
	if kind.is_entityless() {
		return Ok(out.trim_end().to_string());
	}

	let found = match listing.query {
		Some(raw) => {
			let input = parse_search_input(raw, scope.fallback_domain());
			if !scope.accepts_domain(&input.domain) {
				writeln!(out, "domain {:?} is not allowed", input.domain)?;
				return Ok(out.trim_end().to_string());
			}
			filter_local(scope.local_source(catalog), &input, config.autocomplete.max_items)
		}
		None => catalog.candidates_for(&query).into_iter().cloned().collect(),
	};
	for entity in &found {
		writeln!(out, "  {}", entity.label())?;
	}
	writeln!(out, "default: {}", catalog.pick_default(&query))?;
	Ok(out.trim_end().to_string())
}

/// Reads an entity listing file.
pub async fn read_catalog(path: &Path) -> anyhow::Result<EntityCatalog> {
	let text = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("failed to read {}", path.display()))?;
	let provider = StaticEntityProvider::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))?;
	Ok(EntityCatalog::new(provider.entities().to_vec()))
}
