//! Id generation for pages and widgets.

/// Lowercases `value` and collapses every run of characters outside
/// `[a-z0-9_]` into one underscore, trimming underscores at both ends.
///
/// Returns `"item"` when nothing is left.
pub fn sanitize_id_part(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	let mut pending_sep = false;
	for c in value.trim().chars().flat_map(char::to_lowercase) {
		if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
			if pending_sep {
				out.push('_');
				pending_sep = false;
			}
			out.push(c);
		} else {
			pending_sep = true;
		}
	}
	let trimmed = out.trim_matches('_');
	if trimmed.is_empty() {
		"item".to_string()
	} else {
		trimmed.to_string()
	}
}

/// Returns `<prefix>_<n>` for the smallest `n >= 1` not rejected by `taken`.
pub fn first_free(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
	(1u64..)
		.map(|n| format!("{prefix}_{n}"))
		.find(|candidate| !taken(candidate))
		.unwrap_or_else(|| prefix.to_string())
}

/// Builds the widget id prefix `<page>_<type>` from raw parts.
pub fn widget_id_prefix(page_id: &str, type_name: &str) -> String {
	format!("{}_{}", sanitize_id_part(page_id), sanitize_id_part(type_name))
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("Living Room", "living_room")]
	#[case("  __Küche 2__ ", "k_che_2")]
	#[case("a--b", "a_b")]
	#[case("a_-b", "a__b")]
	#[case("", "item")]
	#[case("!!!", "item")]
	#[case("home", "home")]
	fn sanitizes_parts(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(sanitize_id_part(input), expected);
	}

	#[test]
	fn first_free_skips_taken_ids() {
		let taken = ["page_1", "page_2", "page_4"];
		assert_eq!(first_free("page", |c| taken.contains(&c)), "page_3");
		assert_eq!(first_free("page", |_| false), "page_1");
	}

	#[test]
	fn widget_prefix_sanitizes_both_parts() {
		assert_eq!(widget_id_prefix("Upstairs Hall", "weather_3day"), "upstairs_hall_weather_3day");
	}
}
