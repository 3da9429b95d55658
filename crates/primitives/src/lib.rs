#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core types for the panel layout editor: canvas geometry, colors and entity ids.

/// Accent and line color values.
pub mod color;
/// Entity id helpers (`<domain>.<object_id>`).
pub mod entity;
/// Grid-aligned canvas geometry.
pub mod geometry;
/// Coercion of loosely-typed JSON field values.
pub mod loose;

pub use color::HexColor;
pub use entity::{domain_of, has_domain, is_domain_token};
pub use geometry::{CANVAS_HEIGHT, CANVAS_WIDTH, GRID, PointerPosition, Rect, clamp_to, snap};
