//! Headless runs of the history list core against the in-memory backend.
//!
//! Each probe returns the lines it would print so the binary stays a thin
//! shell and the probes can be asserted on directly.

use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::info;

use cs_app::{DropOutcome, SequenceRunner};
use cs_core::drag::{DragSourceId, DropTargetId, Droppable, Rect};
use cs_core::ids::HistoryId;
use cs_core::ports::ClipboardActionPort;
use cs_core::sequence::{SequenceDelay, SequenceMode, SequencePlan};

use crate::bootstrap::AppRuntime;

const TARGET_RECT: Rect = Rect {
    left: 0.0,
    top: 0.0,
    width: 200.0,
    height: 200.0,
};

/// Loads pages until the backend reports no more rows.
async fn load_all(runtime: &AppRuntime) -> usize {
    while runtime.controller.load_more().await {}
    runtime.controller.all_entries().len()
}

/// Mounted rows for one scroll position.
pub async fn window(runtime: &AppRuntime, scroll_top: u64, viewport_height: u32) -> Vec<String> {
    runtime.controller.load_more().await;
    let window = runtime.controller.on_scroll(scroll_top, viewport_height).await;
    let collection = runtime.controller.collection();

    let mut lines = vec![format!(
        "loaded={} total_height={} visible={:?}",
        collection.len(),
        window.total_height,
        window.visible
    )];
    lines.extend(window.rows.iter().map(|row| {
        let value = collection
            .get(row.index)
            .map(|e| e.value.as_str())
            .unwrap_or("<unloaded>");
        format!("#{:<4} top={:<6} h={:<3} {}", row.index, row.top, row.height, value)
    }));
    lines
}

/// Records when each clipboard action happened.
struct TimedClipboard {
    inner: Arc<dyn ClipboardActionPort>,
    started: Instant,
    log: Mutex<Vec<(HistoryId, Duration)>>,
}

impl TimedClipboard {
    fn record(&self, history_id: &HistoryId) {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((history_id.clone(), self.started.elapsed()));
    }

    fn take_log(&self) -> Vec<(HistoryId, Duration)> {
        std::mem::take(&mut *self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

#[async_trait]
impl ClipboardActionPort for TimedClipboard {
    async fn set_copied_item(&self, history_id: &HistoryId) -> Result<()> {
        self.inner.set_copied_item(history_id).await?;
        self.record(history_id);
        Ok(())
    }

    async fn set_pasted_item(&self, history_id: &HistoryId) -> Result<()> {
        self.inner.set_pasted_item(history_id).await?;
        self.record(history_id);
        Ok(())
    }
}

/// Runs a sequence over the newest `count` entries.
pub async fn sequence(
    runtime: &AppRuntime,
    count: usize,
    delay_secs: u64,
    reverse: bool,
    paste: bool,
) -> Result<Vec<String>> {
    let delay = SequenceDelay::try_from(delay_secs)?;
    load_all(runtime).await;
    let ids: Vec<HistoryId> = runtime
        .controller
        .all_entries()
        .into_iter()
        .take(count)
        .map(|e| e.history_id)
        .collect();
    let mode = if paste { SequenceMode::Paste } else { SequenceMode::Copy };

    let clipboard = Arc::new(TimedClipboard {
        inner: runtime.backend.clone(),
        started: Instant::now(),
        log: Mutex::new(Vec::new()),
    });
    let runner = SequenceRunner::new(clipboard.clone(), runtime.notifier.clone());
    info!(steps = ids.len(), delay = delay.secs(), reverse, ?mode, "probe sequence");

    let report = runner
        .start(SequencePlan::new(ids, delay, reverse, mode))
        .wait()
        .await
        .context("sequence was cancelled")?;

    let mut lines: Vec<String> = clipboard
        .take_log()
        .into_iter()
        .map(|(id, at)| format!("{:>8.3}s {id}", at.as_secs_f64()))
        .collect();
    lines.push(format!("acted={} failed={}", report.acted.len(), report.failed.len()));
    Ok(lines)
}

/// Drags `drag` onto the target with wire id `target` and reports the
/// backend state afterwards.
pub async fn drop_onto(runtime: &AppRuntime, drag: &str, target: &str, select: &[String]) -> Result<Vec<String>> {
    let target_id = DropTargetId::from_str(target).with_context(|| format!("invalid drop target: {target}"))?;
    load_all(runtime).await;

    if let DropTargetId::ClipSlot(item_id) = &target_id {
        runtime.backend.set_board_item(item_id.clone(), "");
    }
    runtime
        .controller
        .register_drop_target(Droppable::new(target_id.clone(), TARGET_RECT));

    for id in select {
        runtime.controller.toggle_selection(&HistoryId::from(id.as_str()));
    }

    let controller = &runtime.controller;
    controller.drag_start(DragSourceId::parse(drag));
    let hovered = controller.drag_move(Some(TARGET_RECT.center()), Rect::new(90.0, 90.0, 20.0, 20.0));
    let outcome = controller.drag_end().await;

    let mut lines = vec![
        format!("hovered={}", hovered.map_or_else(|| "-".to_string(), |t| t.to_string())),
        format!("outcome={}", describe_outcome(&outcome)),
        format!("entries={}", runtime.backend.entries().len()),
    ];
    let pinned: Vec<String> = controller
        .pinned_entries()
        .into_iter()
        .map(|e| e.history_id.into_inner())
        .collect();
    lines.push(format!("pinned=[{}]", pinned.join(", ")));
    if let DropTargetId::ClipSlot(item_id) = &target_id {
        lines.push(format!(
            "clip {item_id}={:?}",
            runtime.backend.board_item(item_id).unwrap_or_default()
        ));
    }
    if let Some(draft) = controller.take_staged_board_item() {
        lines.push(format!("staged board={} items={}", draft.board_id, draft.history_ids.len()));
    }
    Ok(lines)
}

fn describe_outcome(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::NoEffect => "no effect".to_string(),
        DropOutcome::Committed(action) => format!("committed {action:?}"),
        DropOutcome::Failed(action) => format!("failed {action:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::build_runtime;
    use cs_core::config::AppConfig;
    use tempfile::TempDir;

    async fn runtime(dir: &TempDir, entries: usize) -> AppRuntime {
        let config = AppConfig {
            seed_entries: entries,
            ..AppConfig::with_system_defaults(dir.path().to_path_buf())
        };
        build_runtime(&config).await.unwrap()
    }

    #[tokio::test]
    async fn window_lists_rows_with_overscan() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime(&dir, 100).await;

        let lines = window(&runtime, 0, 180).await;

        assert!(lines[0].starts_with("loaded=50"));
        assert!(lines[0].contains("visible=Some((0, 2))"));
        // 3 visible rows plus 2 overscan below
        assert_eq!(lines.len(), 1 + 5);
        assert!(lines[1].ends_with("clip #100"));
    }

    #[tokio::test]
    async fn drop_on_trash_deletes_dragged_and_selected() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime(&dir, 5).await;

        let lines = drop_onto(&runtime, "h5", "trash", &["h4".to_string()]).await.unwrap();

        assert_eq!(lines[0], "hovered=trash");
        assert!(lines[1].starts_with("outcome=committed DeleteEntries"));
        assert_eq!(lines[2], "entries=3");
    }

    #[tokio::test]
    async fn drop_rejects_unknown_target() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime(&dir, 1).await;

        assert!(drop_onto(&runtime, "h1", "nowhere", &[]).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sequence_paces_steps_by_delay() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime(&dir, 3).await;

        let lines = sequence(&runtime, 3, 2, false, false).await.unwrap();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("h3"));
        assert!(lines[2].trim_start().starts_with("4.0"));
        assert_eq!(lines[3], "acted=3 failed=0");
    }
}
