use crate::batch::{BATCH_SIZE, BatchCollector};
use crate::logger;
use crate::pipeline;
use crate::scan::KeyScanner;
use crate::store::{DestStore, SourceStore};
use crate::summary::MigrationSummary;
use anyhow::Result;

/// Resolved options the transfer engine needs; connection concerns stay
/// with the caller.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub pattern: String,
    pub replace: bool,
    pub batch_size: usize,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
            replace: false,
            batch_size: BATCH_SIZE,
        }
    }
}

/// Runs the whole migration: scan, batch, copy, accumulate.
///
/// Strictly sequential: a batch is fully fetched and restored before the
/// next SCAN page is requested, and the source fetch completes before the
/// destination write starts. `on_progress` receives the running scanned
/// count after every completed batch. A fatal error unwinds the run;
/// batches committed before it stay written.
pub fn run_migration<S, D, F>(
    src: &mut S,
    dst: &mut D,
    opts: &MigrateOptions,
    mut on_progress: F,
) -> Result<MigrationSummary>
where
    S: SourceStore,
    D: DestStore,
    F: FnMut(u64),
{
    let mut summary = MigrationSummary::default();
    let mut scanner = KeyScanner::new(&opts.pattern);
    let mut collector = BatchCollector::new(opts.batch_size);

    while let Some(page) = scanner.next_page(src)? {
        for key in page {
            if let Some(batch) = collector.push(key) {
                let outcome = pipeline::copy_batch(src, dst, &batch, opts.replace)?;
                summary.record_batch(&outcome);
                on_progress(summary.scanned);
            }
        }
    }
    if let Some(batch) = collector.finish() {
        let outcome = pipeline::copy_batch(src, dst, &batch, opts.replace)?;
        summary.record_batch(&outcome);
        on_progress(summary.scanned);
    }

    logger::debug(&format!("migration finished: {summary:?}"));
    Ok(summary)
}
