//! Pinned entries tray.

mod tray;

pub use tray::{MoveDirection, PinnedMove, PinnedSwap, PinnedTray};
