use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{BoardId, HistoryId, ItemId};

const TRASH: &str = "trash";
const PINNED_ZONE: &str = "history::pinnedzone";
const BOARD_PREFIX: &str = "board::";
const DROPZONE_SUFFIX: &str = "::dropzone";
const PINNED_SUFFIX: &str = "::pinned";

/// A region that accepts dropped history entries.
///
/// The wire forms are `trash`, `history::pinnedzone`, `board::<boardId>` and
/// `<itemId>::dropzone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTargetId {
    Trash,
    PinnedZone,
    Board(BoardId),
    ClipSlot(ItemId),
}

impl fmt::Display for DropTargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trash => f.write_str(TRASH),
            Self::PinnedZone => f.write_str(PINNED_ZONE),
            Self::Board(id) => write!(f, "{BOARD_PREFIX}{id}"),
            Self::ClipSlot(id) => write!(f, "{id}{DROPZONE_SUFFIX}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropTargetParseError {
    #[error("empty drop target id")]
    Empty,

    #[error("drop target id has an empty payload: {0}")]
    EmptyPayload(String),

    #[error("unknown drop target id: {0}")]
    Unknown(String),
}

impl FromStr for DropTargetId {
    type Err = DropTargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DropTargetParseError::Empty);
        }
        if s == TRASH {
            return Ok(Self::Trash);
        }
        if s == PINNED_ZONE {
            return Ok(Self::PinnedZone);
        }
        if let Some(board) = s.strip_prefix(BOARD_PREFIX) {
            if board.is_empty() {
                return Err(DropTargetParseError::EmptyPayload(s.to_string()));
            }
            return Ok(Self::Board(BoardId::from(board)));
        }
        if let Some(item) = s.strip_suffix(DROPZONE_SUFFIX) {
            if item.is_empty() {
                return Err(DropTargetParseError::EmptyPayload(s.to_string()));
            }
            return Ok(Self::ClipSlot(ItemId::from(item)));
        }
        Err(DropTargetParseError::Unknown(s.to_string()))
    }
}

/// Identity of a dragged row.
///
/// The same entry can be rendered in the pinned tray and in the main list, so
/// the tray drags it under a distinct pinned identity that always resolves
/// back to the same [`HistoryId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "from", content = "historyId", rename_all = "snake_case")]
pub enum DragSourceId {
    History(HistoryId),
    Pinned(HistoryId),
}

impl DragSourceId {
    pub fn history_id(&self) -> &HistoryId {
        match self {
            Self::History(id) | Self::Pinned(id) => id,
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned(_))
    }

    /// Parses `<id>` or `<id>::pinned`.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix(PINNED_SUFFIX) {
            Some(id) if !id.is_empty() => Self::Pinned(HistoryId::from(id)),
            _ => Self::History(HistoryId::from(raw)),
        }
    }
}

impl fmt::Display for DragSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History(id) => write!(f, "{id}"),
            Self::Pinned(id) => write!(f, "{id}{PINNED_SUFFIX}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_form() {
        assert_eq!("trash".parse::<DropTargetId>(), Ok(DropTargetId::Trash));
        assert_eq!("history::pinnedzone".parse::<DropTargetId>(), Ok(DropTargetId::PinnedZone));
        assert_eq!(
            "board::b-7".parse::<DropTargetId>(),
            Ok(DropTargetId::Board(BoardId::from("b-7")))
        );
        assert_eq!(
            "item-3::dropzone".parse::<DropTargetId>(),
            Ok(DropTargetId::ClipSlot(ItemId::from("item-3")))
        );
    }

    #[test]
    fn display_matches_the_wire_form() {
        for raw in ["trash", "history::pinnedzone", "board::x", "y::dropzone"] {
            let target = raw.parse::<DropTargetId>().unwrap();
            assert_eq!(target.to_string(), raw);
        }
    }

    #[test]
    fn rejects_empty_and_unknown_ids() {
        assert_eq!("".parse::<DropTargetId>(), Err(DropTargetParseError::Empty));
        assert!(matches!(
            "::dropzone".parse::<DropTargetId>(),
            Err(DropTargetParseError::EmptyPayload(_))
        ));
        assert!(matches!(
            "board::".parse::<DropTargetId>(),
            Err(DropTargetParseError::EmptyPayload(_))
        ));
        assert!(matches!(
            "history-row-1".parse::<DropTargetId>(),
            Err(DropTargetParseError::Unknown(_))
        ));
    }

    #[test]
    fn pinned_drag_identity_resolves_to_the_history_id() {
        let source = DragSourceId::parse("h1::pinned");
        assert!(source.is_pinned());
        assert_eq!(source.history_id(), &HistoryId::from("h1"));
        assert_eq!(source.to_string(), "h1::pinned");

        let plain = DragSourceId::parse("h1");
        assert!(!plain.is_pinned());
        assert_eq!(plain.history_id(), source.history_id());
    }
}
