use crate::core::models::prediction::Prediction;
use crate::engine::aggregator::{ParallelAggregator, aggregate_serial, discover_bundles};
use crate::engine::config::{AggregationConfig, OutputDialect};
use crate::engine::error::AggregationError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// The predictions found under one output directory.
#[derive(Debug, Clone)]
pub struct AfOutput {
    root: PathBuf,
    config: AggregationConfig,
}

impl AfOutput {
    pub fn new(root: impl Into<PathBuf>, config: AggregationConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn predictions(&self) -> Result<Vec<Prediction>, AggregationError> {
        self.predictions_with_progress(&ProgressReporter::new())
    }

    #[instrument(skip_all, name = "aggregation_workflow", fields(root = %self.root.display()))]
    pub fn predictions_with_progress(
        &self,
        reporter: &ProgressReporter,
    ) -> Result<Vec<Prediction>, AggregationError> {
        let predictions = self.config.dialect.collect_predictions(
            &self.root,
            self.config.workers,
            reporter,
        )?;
        info!(predictions = predictions.len(), "Aggregation complete.");
        Ok(predictions)
    }
}

impl OutputDialect {
    /// Collects the predictions under `root` in this dialect.
    ///
    /// `AlphaFold2` output parsing is not implemented and always returns an empty list.
    pub fn collect_predictions(
        self,
        root: &Path,
        workers: usize,
        reporter: &ProgressReporter,
    ) -> Result<Vec<Prediction>, AggregationError> {
        match self {
            OutputDialect::ColabFold => collect_colabfold(root, workers, reporter),
            OutputDialect::AlphaFold2 => {
                warn!("AlphaFold2 output parsing is not implemented; returning no predictions.");
                reporter.report(Progress::Message(
                    "AlphaFold2 output parsing is not implemented".to_string(),
                ));
                Ok(Vec::new())
            }
        }
    }
}

fn collect_colabfold(
    root: &Path,
    workers: usize,
    reporter: &ProgressReporter,
) -> Result<Vec<Prediction>, AggregationError> {
    reporter.report(Progress::PhaseStart {
        name: "ColabFold Aggregation",
    });

    let bundles = discover_bundles(root)?;
    reporter.report(Progress::TaskStart {
        total_steps: bundles.len() as u64,
    });

    let predictions = if workers > 1 {
        ParallelAggregator::new(workers).aggregate(&bundles, reporter)?
    } else {
        aggregate_serial(&bundles, reporter)?
    };

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(predictions)
}
