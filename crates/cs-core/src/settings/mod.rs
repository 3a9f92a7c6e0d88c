mod defaults;
mod model;

pub use model::{HistorySettings, SequenceSettings, Settings, TraySettings, CURRENT_SCHEMA_VERSION};
