//! Adapters for the ClipShelf ports: an in-memory history backend, the JSON
//! settings store, a tracing notifier and the system clock.

pub mod fs;
pub mod history;
pub mod notify;
pub mod settings;
pub mod time;

pub use history::InMemoryHistoryBackend;
pub use notify::TracingNotifier;
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
