use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Backend-owned identifier of a clipboard history entry.
///
/// Stable across list positions and identical in the unfiltered and the
/// filtered collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(String);

impl_id!(HistoryId);
