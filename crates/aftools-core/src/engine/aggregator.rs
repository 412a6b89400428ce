use crate::core::io::bundle::CONFIG_FILE_NAME;
use crate::core::models::prediction::Prediction;
use crate::engine::error::AggregationError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::run_builder::RunRecordBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use walkdir::WalkDir;

/// Finds every directory under `root` (inclusive) that holds a bundle `config.json`,
/// sorted by path.
#[instrument(skip_all, name = "bundle_discovery", fields(root = %root.display()))]
pub fn discover_bundles(root: &Path) -> Result<Vec<PathBuf>, AggregationError> {
    let mut bundles = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| AggregationError::Discovery {
            path: root.to_string_lossy().to_string(),
            source: e,
        })?;
        if entry.file_name() == CONFIG_FILE_NAME && entry.path().is_file() {
            if let Some(parent) = entry.path().parent() {
                bundles.push(parent.to_path_buf());
            }
        }
    }
    bundles.sort();

    info!(bundles = bundles.len(), "Bundle discovery finished.");
    Ok(bundles)
}

/// Builds the bundles one after another on the calling thread.
#[instrument(skip_all, name = "serial_aggregation")]
pub fn aggregate_serial(
    bundles: &[PathBuf],
    reporter: &ProgressReporter,
) -> Result<Vec<Prediction>, AggregationError> {
    let mut predictions = Vec::new();
    for dir in bundles {
        predictions.extend(collect_bundle(dir, reporter)?);
    }
    Ok(predictions)
}

/// Builds bundles on a dedicated pool of `workers` threads, one bundle per task.
///
/// Results are gathered by bundle index, so the output is grouped by bundle in the order the
/// bundles were given, whatever order the tasks finish in. The first failing bundle aborts
/// the whole aggregation.
#[derive(Debug, Clone, Copy)]
pub struct ParallelAggregator {
    workers: usize,
}

impl ParallelAggregator {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    #[instrument(skip_all, name = "parallel_aggregation", fields(workers = self.workers))]
    pub fn aggregate(
        &self,
        bundles: &[PathBuf],
        reporter: &ProgressReporter,
    ) -> Result<Vec<Prediction>, AggregationError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| AggregationError::WorkerPool(e.to_string()))?;

        let grouped: Vec<Vec<Prediction>> = pool.install(|| {
            bundles
                .par_iter()
                .map(|dir| collect_bundle(dir, reporter))
                .collect::<Result<Vec<_>, AggregationError>>()
        })?;

        Ok(grouped.into_iter().flatten().collect())
    }
}

fn collect_bundle(
    dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<Prediction>, AggregationError> {
    let predictions = RunRecordBuilder::new(dir).build()?;
    reporter.report(Progress::BundleCollected {
        dir: dir.to_path_buf(),
        predictions: predictions.len(),
    });
    reporter.report(Progress::TaskIncrement);
    Ok(predictions)
}
