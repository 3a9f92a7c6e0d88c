//! Settings use cases
//! 设置相关用例

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use cs_core::ports::SettingsPort;
use cs_core::settings::Settings;

pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<Settings> {
        self.settings
            .load()
            .instrument(info_span!("usecase.get_settings.execute"))
            .await
    }
}

/// Persists the pinned tray's collapsed flag in the UI store.
pub struct UpdateTrayCollapsed {
    settings: Arc<dyn SettingsPort>,
}

impl UpdateTrayCollapsed {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, collapsed: bool) -> Result<()> {
        let span = info_span!("usecase.update_tray_collapsed.execute", collapsed);

        async {
            let mut settings = self.settings.load().await?;
            if settings.tray.collapsed == collapsed {
                return Ok(());
            }
            settings.tray.collapsed = collapsed;
            self.settings.save(&settings).await?;
            info!(collapsed, "Tray collapsed state saved");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySettings {
        current: Mutex<Settings>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl SettingsPort for MemorySettings {
        async fn load(&self) -> Result<Settings> {
            Ok(self.current.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<()> {
            *self.current.lock().unwrap() = settings.clone();
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn collapsed_flag_is_persisted_once() {
        let store = Arc::new(MemorySettings::default());
        let uc = UpdateTrayCollapsed::new(store.clone());

        uc.execute(true).await.unwrap();
        uc.execute(true).await.unwrap();

        assert!(GetSettings::new(store.clone()).execute().await.unwrap().tray.collapsed);
        assert_eq!(*store.saves.lock().unwrap(), 1);
    }
}
