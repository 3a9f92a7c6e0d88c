use serde::{Deserialize, Serialize};

/// Event name fired by the backend when the OS clipboard changed outside the app.
pub const CLIPBOARD_MONITOR_UPDATE: &str = "clipboard-monitor/update";

/// Backend events the history list subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HistoryEvent {
    /// The OS clipboard changed. The payload is an opaque sentinel string.
    ClipboardMonitorUpdate { payload: String },
}

impl HistoryEvent {
    /// Maps a raw backend event onto a typed event; unknown names yield `None`.
    pub fn from_wire(name: &str, payload: &str) -> Option<Self> {
        match name {
            CLIPBOARD_MONITOR_UPDATE => Some(Self::ClipboardMonitorUpdate {
                payload: payload.to_string(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_monitor_update_is_recognized() {
        assert_eq!(
            HistoryEvent::from_wire("clipboard-monitor/update", "update"),
            Some(HistoryEvent::ClipboardMonitorUpdate {
                payload: "update".to_string()
            })
        );
    }

    #[test]
    fn unknown_event_names_are_ignored() {
        assert_eq!(HistoryEvent::from_wire("clipboard://event", "x"), None);
    }
}
