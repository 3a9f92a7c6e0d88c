use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info};

use cs_core::ids::HistoryId;
use cs_core::ports::{ClipboardActionPort, NotificationPort, Toast};
use cs_core::sequence::{SequencePlan, SequenceProgress};

use crate::usecases::CopyHistoryEntry;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// What a finished sequence did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceReport {
    /// Ids acted upon successfully, in acting order.
    pub acted: Vec<HistoryId>,
    pub failed: Vec<HistoryId>,
}

/// Handle to a started sequence.
pub struct SequenceHandle {
    join: JoinHandle<SequenceReport>,
}

impl SequenceHandle {
    /// Waits for the sequence; `None` if it was cancelled.
    pub async fn wait(self) -> Option<SequenceReport> {
        self.join.await.ok()
    }
}

/// Runs one [`SequencePlan`] at a time.
///
/// Steps are strictly serialized: the next id is acted upon only after the
/// full delay has elapsed, counted down in one-second ticks that are
/// published through [`SequenceRunner::subscribe`]. Starting a new plan
/// cancels the running one.
///
/// 顺序复制/粘贴执行器。
#[derive(Clone)]
pub struct SequenceRunner {
    inner: Arc<RunnerInner>,
}

struct RunnerInner {
    copy: CopyHistoryEntry,
    notifier: Arc<dyn NotificationPort>,
    progress: watch::Sender<SequenceProgress>,
    running: Mutex<Option<Running>>,
    generation: AtomicU64,
}

struct Running {
    generation: u64,
    abort: AbortHandle,
}

impl SequenceRunner {
    pub fn new(clipboard: Arc<dyn ClipboardActionPort>, notifier: Arc<dyn NotificationPort>) -> Self {
        let (progress, _) = watch::channel(SequenceProgress::Idle);
        Self {
            inner: Arc::new(RunnerInner {
                copy: CopyHistoryEntry::new(clipboard),
                notifier,
                progress,
                running: Mutex::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SequenceProgress> {
        self.inner.progress.subscribe()
    }

    pub fn progress(&self) -> SequenceProgress {
        self.inner.progress.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock_running().is_some()
    }

    /// Starts `plan`, cancelling any sequence that is still running.
    pub fn start(&self, plan: SequencePlan) -> SequenceHandle {
        let mut running = self.inner.lock_running();
        if let Some(previous) = running.take() {
            previous.abort.abort();
            debug!(generation = previous.generation, "Previous sequence superseded");
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(
            generation,
            total = plan.len(),
            delay_secs = plan.delay.secs(),
            reverse = plan.reverse,
            mode = ?plan.mode,
            "Starting sequence"
        );

        let inner = Arc::clone(&self.inner);
        let join = tokio::spawn(async move { inner.run(plan, generation).await });
        *running = Some(Running {
            generation,
            abort: join.abort_handle(),
        });

        SequenceHandle { join }
    }

    /// Abandons the remaining steps. Cancelling an idle runner is a no-op.
    pub fn cancel(&self) -> bool {
        let mut running = self.inner.lock_running();
        let Some(current) = running.take() else {
            return false;
        };
        current.abort.abort();

        let (completed, total) = match &*self.inner.progress.borrow() {
            SequenceProgress::Acting { step, total, .. } => (step - 1, *total),
            SequenceProgress::Waiting {
                next_step, total, ..
            } => (next_step - 1, *total),
            _ => (0, 0),
        };
        self.inner
            .progress
            .send_replace(SequenceProgress::Cancelled { completed, total });
        info!(generation = current.generation, completed, total, "Sequence cancelled");
        true
    }
}

impl RunnerInner {
    fn lock_running(&self) -> MutexGuard<'_, Option<Running>> {
        self.running.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, generation: u64, progress: SequenceProgress) {
        if self.generation.load(Ordering::Acquire) == generation {
            self.progress.send_replace(progress);
        }
    }

    async fn run(self: Arc<Self>, plan: SequencePlan, generation: u64) -> SequenceReport {
        let ids: Vec<HistoryId> = plan.ordered_ids().cloned().collect();
        let total = ids.len();
        let delay_secs = plan.delay.secs();
        let mut report = SequenceReport::default();

        for (index, history_id) in ids.into_iter().enumerate() {
            let step = index + 1;
            if index > 0 {
                for remaining_secs in (1..=delay_secs).rev() {
                    self.publish(
                        generation,
                        SequenceProgress::Waiting {
                            next_step: step,
                            total,
                            remaining_secs,
                        },
                    );
                    tokio::time::sleep(COUNTDOWN_TICK).await;
                }
            }

            self.publish(
                generation,
                SequenceProgress::Acting {
                    step,
                    total,
                    history_id: history_id.clone(),
                },
            );

            match self.copy.execute(&history_id, plan.mode).await {
                Ok(()) => report.acted.push(history_id),
                Err(err) => {
                    error!(error = %format!("{err:#}"), step, "Sequence step failed, continuing");
                    self.notifier
                        .notify(Toast::error(format!("Could not act on entry {history_id}")))
                        .await;
                    report.failed.push(history_id);
                }
            }
        }

        let mut running = self.lock_running();
        if running.as_ref().map(|r| r.generation) == Some(generation) {
            running.take();
            self.progress.send_replace(SequenceProgress::Finished {
                total,
                failed: report.failed.len(),
            });
            info!(generation, acted = report.acted.len(), failed = report.failed.len(), "Sequence finished");
        }
        report
    }
}
