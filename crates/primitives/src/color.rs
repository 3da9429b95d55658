//! Hex color values as stored in layout documents (`#rrggbb`).

use std::fmt;

/// An RGB color canonically rendered as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
	/// Creates a color from its RGB components.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self([r, g, b])
	}

	/// Parses a loosely formatted color.
	///
	/// Accepts surrounding whitespace, any letter case, an optional `#`, or a
	/// `0x` prefix. Exactly six hex digits must remain.
	pub fn parse(input: &str) -> Option<Self> {
		let lowered = input.trim().to_ascii_lowercase();
		let digits = lowered
			.strip_prefix("0x")
			.or_else(|| lowered.strip_prefix('#'))
			.unwrap_or(&lowered);
		if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return None;
		}
		let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
		Some(Self([channel(0)?, channel(2)?, channel(4)?]))
	}

	/// Parses `input`, falling back to `default` when it is absent or invalid.
	pub fn parse_or(input: Option<&str>, default: HexColor) -> Self {
		input.and_then(Self::parse).unwrap_or(default)
	}
}

impl fmt::Display for HexColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let [r, g, b] = self.0;
		write!(f, "#{r:02x}{g:02x}{b:02x}")
	}
}
