//! # Dependency wiring / 依赖注入
//!
//! Resolves paths from [`AppConfig`], loads the persisted settings and builds
//! the history page controller over the in-memory backend.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use cs_app::usecases::GetSettings;
use cs_app::{ControllerConfig, HistoryDeps, HistoryPageController};
use cs_core::config::AppConfig;
use cs_core::settings::Settings;
use cs_infra::{FileSettingsRepository, InMemoryHistoryBackend, SystemClock, TracingNotifier};

/// Everything a running shell holds on to.
pub struct AppRuntime {
    pub controller: HistoryPageController,
    pub backend: Arc<InMemoryHistoryBackend>,
    pub notifier: Arc<TracingNotifier>,
    pub settings: Settings,
}

/// Fills empty config paths from the platform app data directory.
pub fn resolve_paths(config: &AppConfig) -> anyhow::Result<AppConfig> {
    let mut resolved = config.clone();
    if resolved.settings_path.as_os_str().is_empty() {
        resolved.settings_path = cs_infra::fs::settings_path()?;
    }
    if resolved.log_dir.as_os_str().is_empty() {
        resolved.log_dir = cs_infra::fs::log_dir()?;
    }
    Ok(resolved)
}

/// Builds the controller and its adapters.
///
/// 构建控制器及其适配器。
pub async fn build_runtime(config: &AppConfig) -> anyhow::Result<AppRuntime> {
    let config = resolve_paths(config)?;
    let settings_repo = Arc::new(FileSettingsRepository::new(config.settings_path.clone()));
    let settings = GetSettings::new(settings_repo.clone())
        .execute()
        .await
        .with_context(|| format!("Failed to load settings from {}", config.settings_path.display()))?;

    let backend = Arc::new(
        InMemoryHistoryBackend::new(Arc::new(SystemClock)).seed(config.seed_entries),
    );
    let notifier = Arc::new(TracingNotifier::new());

    let deps = HistoryDeps {
        history: backend.clone(),
        clipboard: backend.clone(),
        notifier: notifier.clone(),
        settings: settings_repo,
    };
    let controller = HistoryPageController::new(deps, ControllerConfig::from_settings(&settings));

    info!(
        seed_entries = config.seed_entries,
        page_size = settings.history.page_size,
        "history runtime ready"
    );

    Ok(AppRuntime {
        controller,
        backend,
        notifier,
        settings,
    })
}
