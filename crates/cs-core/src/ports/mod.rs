//! Port interfaces for the application layer
//!
//! Ports define the contract between the history list use cases and the
//! native backend. Implementations live in `cs-infra` (or in test fakes).

mod clipboard_action;
mod clock;
mod history;
mod notification;
pub mod settings;

pub use clipboard_action::ClipboardActionPort;
pub use clock::ClockPort;
pub use history::HistoryCommandPort;
pub use notification::{NotificationPort, Toast, ToastLevel};
pub use settings::SettingsPort;
