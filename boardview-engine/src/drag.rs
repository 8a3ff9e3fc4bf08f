//! Drag state machine.
//!
//! ```text
//! Idle --PointerDown--> DragPotential --GestureConfirmed--> Dragging
//!   ^                        |                                 |
//!   +---PointerReleased------+                                 |
//!   +---GestureEnded / PointerReleased-------------------------+
//! ```
//!
//! While a card is held, renders are dropped rather than queued. Leaving a
//! drag always renders once, from a fresh build, so the card shows up in the
//! cell its new metadata puts it in.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on a card, gesture not yet confirmed.
    DragPotential { item: RecordId },
    Dragging { item: RecordId },
}

/// Discrete input from whatever gesture library the host uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum DragEvent {
    PointerDown { item: RecordId },
    GestureConfirmed,
    /// Pointer released before a drag started.
    PointerReleased,
    /// Drop or cancel.
    GestureEnded,
}

/// What the view has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDirective {
    Skip,
    Render,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    state: DragState,
    render_suppressed: bool,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_render_suspended(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Ask to render. Returns `false`, and remembers it, while a card is held.
    pub fn request_render(&mut self) -> bool {
        if self.is_render_suspended() {
            trace!(state = ?self.state, "render suppressed");
            self.render_suppressed = true;
            false
        } else {
            true
        }
    }

    pub fn handle(&mut self, event: DragEvent) -> RenderDirective {
        let state = std::mem::take(&mut self.state);
        let (next, directive) = match (state, event) {
            (DragState::Idle, DragEvent::PointerDown { item }) => {
                (DragState::DragPotential { item }, RenderDirective::Skip)
            }
            (DragState::DragPotential { item }, DragEvent::GestureConfirmed) => {
                (DragState::Dragging { item }, RenderDirective::Skip)
            }
            (
                DragState::DragPotential { .. },
                DragEvent::PointerReleased | DragEvent::GestureEnded,
            ) => (DragState::Idle, self.flush()),
            (DragState::Dragging { .. }, DragEvent::GestureEnded | DragEvent::PointerReleased) => {
                self.render_suppressed = false;
                (DragState::Idle, RenderDirective::Render)
            }
            (state, event) => {
                trace!(?state, ?event, "drag event ignored");
                (state, RenderDirective::Skip)
            }
        };
        self.state = next;
        directive
    }

    fn flush(&mut self) -> RenderDirective {
        if std::mem::take(&mut self.render_suppressed) {
            RenderDirective::Render
        } else {
            RenderDirective::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down() -> DragEvent {
        DragEvent::PointerDown {
            item: RecordId::from("a.md"),
        }
    }

    #[test]
    fn test_full_drag_renders_once_at_the_end() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.handle(down()), RenderDirective::Skip);
        assert_eq!(drag.handle(DragEvent::GestureConfirmed), RenderDirective::Skip);
        assert!(matches!(drag.state(), DragState::Dragging { .. }));

        assert!(!drag.request_render());
        assert!(!drag.request_render());

        assert_eq!(drag.handle(DragEvent::GestureEnded), RenderDirective::Render);
        assert_eq!(drag.state(), &DragState::Idle);
        assert!(drag.request_render());
    }

    #[test]
    fn test_click_without_drag_does_not_render() {
        let mut drag = DragTracker::new();
        drag.handle(down());
        assert_eq!(drag.handle(DragEvent::PointerReleased), RenderDirective::Skip);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn test_render_suppressed_before_confirmation_is_flushed() {
        let mut drag = DragTracker::new();
        drag.handle(down());
        assert!(!drag.request_render());
        assert_eq!(drag.handle(DragEvent::PointerReleased), RenderDirective::Render);
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.handle(DragEvent::GestureConfirmed), RenderDirective::Skip);
        assert_eq!(drag.handle(DragEvent::GestureEnded), RenderDirective::Skip);
        assert_eq!(drag.state(), &DragState::Idle);

        drag.handle(down());
        drag.handle(DragEvent::PointerDown {
            item: RecordId::from("b.md"),
        });
        assert_eq!(
            drag.state(),
            &DragState::DragPotential {
                item: RecordId::from("a.md")
            }
        );
    }
}
