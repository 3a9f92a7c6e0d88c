//! Drag-and-drop session model.
//!
//! ```text
//! Idle ──Start──→ Dragging ──Drop (effect)──→ Settling ──ResetElapsed──→ Idle
//!                    │   ↑                       
//!                    └───┘ Over                  
//! any ──Cancel──→ Idle          Dragging ──Drop (no effect)──→ Idle
//! ```
//!
//! The session never talks to the backend. A drop yields [`DragAction`]s that
//! the application layer executes.

mod collision;
mod geometry;
mod state_machine;
mod target;

pub use collision::{CollisionResolver, Droppable, DropTargetRegistry};
pub use geometry::{Point, Rect};
pub use state_machine::{
    clamp_reset_delay, ActiveDrag, BoardItemDraft, DragAction, DragEvent, DragState,
    DragStateMachine, DEFAULT_RESET_DELAY,
};
pub use target::{DragSourceId, DropTargetId, DropTargetParseError};
