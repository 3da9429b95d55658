//! Type-specific widget settings: enumerations, defaults and numeric ranges.
//!
//! Enumerations parse their wire names exactly; anything else (wrong case,
//! unknown words, non-strings) collapses to `Auto` via `normalize`.

use panelkit_primitives::HexColor;

/// Default accent color of button widgets.
pub const DEFAULT_BUTTON_ACCENT_COLOR: HexColor = HexColor::rgb(0x6f, 0xe8, 0xff);
/// Default accent color of slider widgets.
pub const DEFAULT_SLIDER_ACCENT_COLOR: HexColor = HexColor::rgb(0x6f, 0xe8, 0xff);
/// Default line color of graph widgets.
pub const DEFAULT_GRAPH_LINE_COLOR: HexColor = HexColor::rgb(0x6f, 0xe8, 0xff);

/// Graph history window used when none (or nonsense) is configured.
pub const DEFAULT_GRAPH_TIME_WINDOW_MIN: u16 = 120;
/// Shortest graph history window, in minutes.
pub const GRAPH_TIME_WINDOW_MIN: u16 = 1;
/// Longest graph history window (one day), in minutes.
pub const GRAPH_TIME_WINDOW_MAX: u16 = 1440;
/// Fewest points a graph may sample when a count is set.
pub const GRAPH_POINTS_MIN: u16 = 16;
/// Most points a graph may sample.
pub const GRAPH_POINTS_MAX: u16 = 64;

macro_rules! wire_enum {
	(
		$(#[$meta:meta])*
		$name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
		pub enum $name {
			$($(#[$vmeta])* $variant),+
		}

		impl $name {
			/// Every variant, in menu order.
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			/// Returns the wire name used in layout documents.
			pub const fn as_str(self) -> &'static str {
				match self {
					$($name::$variant => $wire),+
				}
			}

			/// Looks up a variant by its exact wire name.
			pub fn from_name(name: &str) -> Option<Self> {
				Self::ALL.iter().copied().find(|v| v.as_str() == name)
			}

			/// Parses `name`, collapsing absent or unknown values to the default.
			pub fn normalize(name: Option<&str>) -> Self {
				name.and_then(Self::from_name).unwrap_or_default()
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}

wire_enum! {
	/// What a button does when pressed.
	ButtonMode {
		/// Toggle the bound switch or media player.
		#[default]
		Auto => "auto",
		PlayPause => "play_pause",
		Stop => "stop",
		Next => "next",
		Previous => "previous",
	}
}

impl ButtonMode {
	/// Returns true for the media transport modes, which only a
	/// `media_player` entity can honor.
	pub const fn requires_media_player(self) -> bool {
		matches!(self, Self::PlayPause | Self::Stop | Self::Next | Self::Previous)
	}
}

wire_enum! {
	/// Fill direction of a slider track.
	SliderDirection {
		/// Renderer picks based on the widget's aspect ratio.
		#[default]
		Auto => "auto",
		LeftToRight => "left_to_right",
		RightToLeft => "right_to_left",
		TopToBottom => "top_to_bottom",
		BottomToTop => "bottom_to_top",
	}
}

wire_enum! {
	/// Which entity domain a slider controls.
	SliderEntityDomain {
		/// Any of the slider-capable domains.
		#[default]
		Auto => "auto",
		Light => "light",
		MediaPlayer => "media_player",
		Cover => "cover",
	}
}

impl SliderEntityDomain {
	/// Returns the pinned domain, or `None` for `Auto`.
	pub const fn domain(self) -> Option<&'static str> {
		match self {
			Self::Auto => None,
			Self::Light => Some("light"),
			Self::MediaPlayer => Some("media_player"),
			Self::Cover => Some("cover"),
		}
	}
}
