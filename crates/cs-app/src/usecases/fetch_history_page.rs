use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use cs_core::history::{HistoryPage, PageRequest};
use cs_core::ports::HistoryCommandPort;

/// Outcome of a load-more trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    Fetched(HistoryPage),
    /// Another fetch was outstanding; this trigger was dropped, not queued.
    Skipped,
}

/// Fetches the next page of the unfiltered history, one request at a time.
///
/// 分页加载历史记录（同一时间只允许一个请求）。
pub struct FetchNextHistoryPage {
    history: Arc<dyn HistoryCommandPort>,
    in_flight: AtomicBool,
}

impl FetchNextHistoryPage {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self {
            history,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The guard is released on success and on failure, so a later trigger
    /// can retry.
    #[tracing::instrument(
        name = "usecase.fetch_next_history_page.execute",
        skip(self),
        fields(offset = request.offset, limit = request.limit)
    )]
    pub async fn execute(&self, request: PageRequest) -> Result<PageFetch> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Page fetch already in flight, trigger dropped");
            return Ok(PageFetch::Skipped);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let page = self
            .history
            .fetch_next_clipboard_history_page(request)
            .await
            .context("Failed to fetch next history page")?;

        debug!(
            received = page.entries.len(),
            has_more = page.has_more,
            "Fetched history page"
        );
        Ok(PageFetch::Fetched(page))
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
