use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "clipshelf";

/// ClipShelf application data root directory.
///
/// 获取应用数据根目录。
///
/// Honors `CLIPSHELF_PROFILE` so development runs do not share state with
/// the installed app. Directories are not created here.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_local_dir().context("Failed to get platform-specific data directory")?;
    Ok(base_dir.join(resolved_app_dir_name()))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("settings.json"))
}

pub fn log_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("logs"))
}

fn resolved_app_dir_name() -> String {
    match std::env::var("CLIPSHELF_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}
