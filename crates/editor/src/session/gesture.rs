//! Pointer routing into the drag/resize machine.
//!
//! While a gesture is active the machine owns the widget's rect: the
//! session writes every intermediate rect straight into the document so
//! previews see it, and edits to the widget are refused until release.

use panelkit_primitives::PointerPosition;
use tracing::debug;

use super::EditorSession;
use crate::error::{EditorError, Result};
use crate::geometry::drag::{DragEffect, DragOutcome, DragResizeMachine, GestureTarget, PressTarget};

impl EditorSession {
	pub fn drag(&self) -> &DragResizeMachine {
		&self.drag
	}

	/// Starts a drag or resize on a widget of the selected page and selects it.
	pub fn press(&mut self, widget_id: &str, target: PressTarget, pointer: PointerPosition) -> Result<()> {
		let page_id = self.selected_page().id().to_string();
		let widget = self
			.selected_page()
			.widget(widget_id)
			.ok_or_else(|| EditorError::UnknownWidget(widget_id.to_string()))?;
		let (rect, kind) = (widget.rect(), widget.kind());
		self.drag.press(
			GestureTarget {
				page_id,
				widget_id: widget_id.to_string(),
			},
			target,
			pointer,
			rect,
			kind,
		)?;
		self.selected_widget = Some(widget_id.to_string());
		Ok(())
	}

	/// Feeds a pointer motion, moving or resizing the gesture's widget.
	pub fn pointer_move(&mut self, pointer: PointerPosition) -> Result<DragEffect> {
		let effect = self.drag.motion(pointer);
		if let DragEffect::Applied(rect) = effect
			&& let Some(gesture) = self.drag.gesture()
		{
			let (page_id, widget_id) = (gesture.target.page_id.clone(), gesture.target.widget_id.clone());
			self.document.widget_mut(&page_id, &widget_id)?.set_rect(rect);
		}
		Ok(effect)
	}

	/// Ends the gesture at `pointer`.
	///
	/// Returns `None` when no gesture was active.
	pub fn release(&mut self, pointer: PointerPosition) -> Result<Option<DragOutcome>> {
		self.pointer_move(pointer)?;
		let outcome = self.drag.release();
		if let Some(DragOutcome::Committed { target, rect }) = &outcome {
			self.modified = true;
			debug!(widget = %target.widget_id, ?rect, "session.gesture_committed");
		}
		Ok(outcome)
	}

	/// Aborts the gesture and puts the widget back where it started.
	pub fn cancel_drag(&mut self) -> Result<()> {
		if let Some((target, start)) = self.drag.cancel() {
			self.document.widget_mut(&target.page_id, &target.widget_id)?.set_rect(start);
			debug!(widget = %target.widget_id, "session.gesture_cancelled");
		}
		Ok(())
	}
}
