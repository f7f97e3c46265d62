/// Bulk loader: decode every catalog record once, in parallel, before viewing starts
///
/// One blocking task per record, no concurrency cap. Each task owns its
/// record's path and hands the decoded buffer back through the join set;
/// only the orchestrator writes into the catalog, and each slot exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

use super::loader::{self, DecodedImage};
use crate::error::{DecodeError, ViewerError};
use crate::state::catalog::Catalog;
use crate::state::data::{ImageRecord, LoadState};

/// Log a progress line every this many completions
const PROGRESS_EVERY: usize = 10;

/// Monotonic completed-task counter, shareable with a progress display
#[derive(Debug, Clone, Default)]
pub struct LoadProgress {
    completed: Arc<AtomicUsize>,
}

impl LoadProgress {
    #[cfg(test)]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    fn tick(&self) -> usize {
        self.completed.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Summary of the load phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Decode the whole catalog, blocking until every task has finished.
///
/// Builds a dedicated runtime whose blocking pool has one thread per record.
pub fn load_catalog(catalog: &mut Catalog, progress: &LoadProgress) -> Result<LoadReport, ViewerError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .max_blocking_threads(catalog.len().max(1))
        .build()
        .map_err(ViewerError::Runtime)?;

    Ok(runtime.block_on(load_all(catalog, progress)))
}

/// Decode every record of `catalog`, returning once all tasks are done
pub async fn load_all(catalog: &mut Catalog, progress: &LoadProgress) -> LoadReport {
    let total = catalog.len();
    let start = Instant::now();

    tracing::info!(
        total,
        "⏳ Loading images into RAM (memory for instant switching)"
    );

    let mut tasks = JoinSet::new();
    for (index, record) in catalog.records().iter().enumerate() {
        let path = record.path.clone();
        tasks.spawn_blocking(move || (index, loader::decode(&path)));
    }

    // Completion barrier
    while let Some(joined) = tasks.join_next().await {
        let done = progress.tick();
        if done % PROGRESS_EVERY == 0 {
            tracing::info!(done, total, "⏳ Processed {}/{}...", done, total);
        }

        match joined {
            Ok((index, result)) => {
                if let Some(record) = catalog.get_mut(index) {
                    apply_result(record, result);
                }
            }
            // The record stays Pending and is swept below
            Err(e) => tracing::error!("⚠️  Decode task did not finish: {}", e),
        }
    }

    let mut report = LoadReport {
        total,
        loaded: 0,
        failed: 0,
        elapsed: start.elapsed(),
    };

    for record in catalog.records_mut() {
        if record.load == LoadState::Pending {
            record.load = LoadState::Failed("decode task did not finish".into());
        }
        if record.is_loaded() {
            report.loaded += 1;
        } else {
            report.failed += 1;
        }
    }

    tracing::info!(
        loaded = report.loaded,
        failed = report.failed,
        "✅ Loaded {} images in {:.2} seconds",
        total,
        report.elapsed.as_secs_f64()
    );

    report
}

fn apply_result(record: &mut ImageRecord, result: Result<DecodedImage, DecodeError>) {
    match result {
        Ok(decoded) => {
            record.width = decoded.pixels.width;
            record.height = decoded.pixels.height;
            record.channels = decoded.source_channels;
            record.load = LoadState::Loaded(decoded.pixels);
        }
        Err(e) => {
            tracing::warn!(path = %record.path.display(), "❌ Failed to load: {}", e);
            record.load = LoadState::Failed(e.to_string());
        }
    }
}
