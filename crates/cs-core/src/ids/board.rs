use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of a paste board on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

/// Identifier of a clip (board item) living inside a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl_id!(BoardId, ItemId);
