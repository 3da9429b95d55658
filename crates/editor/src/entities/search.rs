//! Search text parsing and local filtering.
//!
//! Input like `light.*kitchen` splits into a domain (`light`) and a search
//! fragment (`kitchen`). Text up to and including the first `*` is ignored,
//! so users can type glob-style prefixes.

use panelkit_primitives::{has_domain, is_domain_token};

use super::Entity;

/// Parsed autocomplete input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
	/// Domain filter; empty for none.
	pub domain: String,
	/// Case-insensitive substring matched against id and name; empty for none.
	pub fragment: String,
}

impl SearchInput {
	/// Returns true if the remote provider should be asked.
	pub fn wants_remote(&self, min_query_len: usize) -> bool {
		!self.domain.is_empty() || self.fragment.chars().count() >= min_query_len
	}
}

/// Splits raw field text into domain and fragment.
///
/// When the text before the first dot is a domain token it becomes the
/// domain; otherwise `fallback_domain` is used and the whole text is the
/// fragment.
pub fn parse_search_input(raw: &str, fallback_domain: &str) -> SearchInput {
	let value = raw.trim();
	let mut domain = fallback_domain.trim().to_lowercase();
	let mut search = value;
	if let Some(dot) = value.find('.')
		&& dot > 0
	{
		let candidate = value[..dot].trim().to_lowercase();
		if is_domain_token(&candidate) {
			domain = candidate;
			search = &value[dot + 1..];
		}
	}
	SearchInput {
		domain,
		fragment: normalize_search_term(search),
	}
}

/// Trims and drops everything up to the first `*`.
pub fn normalize_search_term(value: &str) -> String {
	let trimmed = value.trim();
	match trimmed.find('*') {
		Some(star) => trimmed[star + 1..].trim().to_string(),
		None => trimmed.to_string(),
	}
}

/// Case-insensitive substring match on id or name. An empty fragment matches.
pub fn entity_contains(entity: &Entity, fragment: &str) -> bool {
	if fragment.is_empty() {
		return true;
	}
	let needle = fragment.to_lowercase();
	entity.id.to_lowercase().contains(&needle) || entity.name.to_lowercase().contains(&needle)
}

/// First `max_items` entities of `source` matching domain and fragment, in
/// source order.
pub fn filter_local<'a>(source: impl IntoIterator<Item = &'a Entity>, input: &SearchInput, max_items: usize) -> Vec<Entity> {
	source
		.into_iter()
		.filter(|e| !e.id.is_empty())
		.filter(|e| input.domain.is_empty() || has_domain(&e.id, &input.domain))
		.filter(|e| entity_contains(e, &input.fragment))
		.take(max_items)
		.cloned()
		.collect()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("light.*kitchen", "", "light", "kitchen")]
	#[case("  Light.Kitchen ", "", "light", "Kitchen")]
	#[case("kitchen", "light", "light", "kitchen")]
	#[case("kitchen", " Sensor ", "sensor", "kitchen")]
	#[case(".hidden", "", "", ".hidden")]
	#[case("my lamp.x", "", "", "my lamp.x")]
	#[case("*", "", "", "")]
	#[case("foo*bar", "", "", "bar")]
	#[case("sensor.", "", "sensor", "")]
	fn parses_domain_and_fragment(#[case] raw: &str, #[case] fallback: &str, #[case] domain: &str, #[case] fragment: &str) {
		let parsed = parse_search_input(raw, fallback);
		assert_eq!(parsed.domain, domain);
		assert_eq!(parsed.fragment, fragment);
	}

	#[test]
	fn remote_needs_domain_or_two_chars() {
		assert!(!parse_search_input("k", "").wants_remote(2));
		assert!(parse_search_input("ki", "").wants_remote(2));
		assert!(parse_search_input("light.", "").wants_remote(2));
		assert!(parse_search_input("", "sensor").wants_remote(2));
	}

	#[test]
	fn local_filter_matches_id_or_name_and_caps() {
		let source = vec![
			Entity::new("light.kitchen", "Kitchen Ceiling"),
			Entity::new("light.hall", "Hallway"),
			Entity::new("switch.kitchen_fan", "Fan"),
			Entity::new("", "Broken"),
			Entity::new("light.desk", "Desk KITCHEN lamp"),
		];
		let input = parse_search_input("light.kitchen", "");
		let ids: Vec<_> = filter_local(&source, &input, 24).into_iter().map(|e| e.id).collect();
		assert_eq!(ids, ["light.kitchen", "light.desk"]);

		let input = parse_search_input("", "");
		assert_eq!(filter_local(&source, &input, 2).len(), 2);
		assert_eq!(filter_local(&source, &input, 24).len(), 4);
	}
}
