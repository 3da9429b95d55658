//! Entity ids are opaque `<domain>.<object_id>` strings.
//!
//! The domain prefix is the only part the editor interprets.

/// Returns true if `token` is a well-formed domain (`[a-z0-9_]+`).
pub fn is_domain_token(token: &str) -> bool {
	!token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Returns the domain prefix of an entity id, if it has one.
pub fn domain_of(entity_id: &str) -> Option<&str> {
	let (domain, _) = entity_id.split_once('.')?;
	(!domain.is_empty()).then_some(domain)
}

/// Returns true if `entity_id` starts with `<domain>.`.
pub fn has_domain(entity_id: &str, domain: &str) -> bool {
	entity_id
		.strip_prefix(domain)
		.is_some_and(|rest| rest.starts_with('.'))
}
