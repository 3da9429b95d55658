#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Widget type registry.
//!
//! Static lookup tables answering three questions for every widget type:
//!
//! - [`limits`] - how small and how large a widget may be on the canvas
//! - [`domains`] - which entity domains a widget may be bound to
//! - [`options`] - which values its type-specific settings accept, and their defaults
//!
//! Everything here is a pure function of its inputs. The editor crate layers
//! geometry, normalization and entity resolution on top.

pub mod domains;
pub mod limits;
pub mod options;
pub mod widget;

pub use domains::{DomainPolicy, DomainQuery, allowed_domains, expected_domain};
pub use limits::{MIN_WIDGET_SIZE, SizeLimits};
pub use options::{ButtonMode, SliderDirection, SliderEntityDomain};
pub use widget::{UnknownWidgetType, WidgetType};
