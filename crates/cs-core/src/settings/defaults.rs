use super::model::*;
use crate::layout::DEFAULT_ROW_HEIGHT;
use crate::sequence::SequenceDelay;

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            page_size: 50,
            default_row_height: DEFAULT_ROW_HEIGHT,
            overscan: 2,
            load_more_threshold: 10,
            search_debounce_ms: 300,
            drag_reset_delay_ms: 450,
            auto_update_on_capture: true,
            auto_deselect_after_paste: true,
        }
    }
}

impl Default for SequenceSettings {
    fn default() -> Self {
        Self {
            delay: SequenceDelay::default(),
            reverse: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            history: HistorySettings::default(),
            sequence: SequenceSettings::default(),
            tray: TraySettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"tray":{"collapsed":true}}"#).unwrap();
        assert_eq!(settings.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(settings.tray.collapsed);
        assert_eq!(settings.history, HistorySettings::default());
        assert_eq!(settings.sequence.delay.secs(), 2);
    }

    #[test]
    fn missing_fields_within_a_section_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"history":{"page_size":20}}"#).unwrap();
        assert_eq!(settings.history.page_size, 20);
        assert_eq!(settings.history.search_debounce_ms, 300);
        assert!(settings.history.auto_update_on_capture);
    }

    #[test]
    fn unsupported_sequence_delay_is_rejected() {
        let result = serde_json::from_str::<Settings>(r#"{"sequence":{"delay":7}}"#);
        assert!(result.is_err());
    }
}
