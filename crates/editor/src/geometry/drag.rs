//! Drag and resize gesture state machine.
//!
//! ```text
//!            press(Body)                 press(ResizeHandle)
//!   Idle ─────────────────> Dragging     Idle ───────────────> Resizing
//!    ^                        │ motion*                          │ motion*
//!    └──── release/cancel ────┴──────────────────────────────────┘
//! ```
//!
//! The machine owns the start rect and pointer origin of the active gesture.
//! It never touches a document; callers feed it the widget's current rect on
//! every motion and apply the returned rect themselves. Every rect it hands
//! out is already clamped, so applying it keeps the geometry invariants.
//!
//! Only one gesture exists at a time. A press while active is rejected
//! rather than silently replacing the running gesture.

use panelkit_primitives::{PointerPosition, Rect};
use panelkit_registry::{SizeLimits, WidgetType};
use thiserror::Error;
use tracing::trace;

use super::{dragged, resized};

/// Where on a widget the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
	/// Widget body: moves the widget.
	Body,
	/// Bottom-right handle: resizes the widget.
	ResizeHandle,
}

/// Widget owned by a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTarget {
	pub page_id: String,
	pub widget_id: String,
}

/// State of an active gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
	pub target: GestureTarget,
	/// Pointer position at press time.
	pub origin: PointerPosition,
	/// Widget rect at press time; restored on cancel.
	pub start: Rect,
	/// Last rect handed out by [`DragResizeMachine::motion`].
	pub current: Rect,
	pub limits: SizeLimits,
	/// Set once any motion changed the rect.
	pub moved: bool,
}

/// Machine state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
	#[default]
	Idle,
	Dragging(Gesture),
	Resizing(Gesture),
}

/// Result of feeding a pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
	/// No gesture, or the clamped rect equals the current one.
	Unchanged,
	/// The widget should take this rect.
	Applied(Rect),
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
	/// Motion was applied; the rect is now authoritative, even if it ended
	/// where it started.
	Committed { target: GestureTarget, rect: Rect },
	/// Press and release without any effective motion.
	Click { target: GestureTarget },
}

/// Errors from starting a gesture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
	#[error("a gesture is already active on widget {0}")]
	AlreadyActive(String),
}

/// Drag/resize state machine for one pointer.
#[derive(Debug, Clone, Default)]
pub struct DragResizeMachine {
	state: DragState,
}

impl DragResizeMachine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &DragState {
		&self.state
	}

	/// Returns true while a drag or resize is in progress.
	pub fn is_active(&self) -> bool {
		!matches!(self.state, DragState::Idle)
	}

	/// Returns the active gesture, if any.
	pub fn gesture(&self) -> Option<&Gesture> {
		match &self.state {
			DragState::Idle => None,
			DragState::Dragging(gesture) | DragState::Resizing(gesture) => Some(gesture),
		}
	}

	/// Returns true if `widget_id` is owned by the active gesture.
	pub fn owns(&self, widget_id: &str) -> bool {
		self.gesture().is_some_and(|g| g.target.widget_id == widget_id)
	}

	/// Starts a gesture on a widget currently at `rect`.
	pub fn press(
		&mut self,
		target: GestureTarget,
		press: PressTarget,
		pointer: PointerPosition,
		rect: Rect,
		kind: WidgetType,
	) -> Result<(), DragError> {
		if let Some(active) = self.gesture() {
			return Err(DragError::AlreadyActive(active.target.widget_id.clone()));
		}
		let gesture = Gesture {
			target,
			origin: pointer,
			start: rect,
			current: rect,
			limits: kind.size_limits(),
			moved: false,
		};
		trace!(widget = %gesture.target.widget_id, ?press, "drag.press");
		self.state = match press {
			PressTarget::Body => DragState::Dragging(gesture),
			PressTarget::ResizeHandle => DragState::Resizing(gesture),
		};
		Ok(())
	}

	/// Feeds a pointer motion.
	///
	/// The new rect is always computed from the start rect and the total
	/// pointer delta, so dropped or coalesced motions cannot accumulate error.
	pub fn motion(&mut self, pointer: PointerPosition) -> DragEffect {
		let (gesture, next) = match &mut self.state {
			DragState::Idle => return DragEffect::Unchanged,
			DragState::Dragging(gesture) => {
				let (dx, dy) = pointer.delta_from(gesture.origin);
				let next = dragged(gesture.start, dx, dy);
				(gesture, next)
			}
			DragState::Resizing(gesture) => {
				let (dx, dy) = pointer.delta_from(gesture.origin);
				let next = resized(gesture.start, dx, dy, gesture.limits);
				(gesture, next)
			}
		};
		if next == gesture.current {
			return DragEffect::Unchanged;
		}
		gesture.current = next;
		gesture.moved = true;
		DragEffect::Applied(next)
	}

	/// Ends the gesture.
	///
	/// Returns `None` when no gesture was active.
	pub fn release(&mut self) -> Option<DragOutcome> {
		let gesture = match std::mem::take(&mut self.state) {
			DragState::Idle => return None,
			DragState::Dragging(gesture) | DragState::Resizing(gesture) => gesture,
		};
		if gesture.moved {
			Some(DragOutcome::Committed {
				target: gesture.target,
				rect: gesture.current,
			})
		} else {
			Some(DragOutcome::Click { target: gesture.target })
		}
	}

	/// Aborts the gesture, returning the target and the rect it must be restored to.
	pub fn cancel(&mut self) -> Option<(GestureTarget, Rect)> {
		match std::mem::take(&mut self.state) {
			DragState::Idle => None,
			DragState::Dragging(gesture) | DragState::Resizing(gesture) => Some((gesture.target, gesture.start)),
		}
	}
}
