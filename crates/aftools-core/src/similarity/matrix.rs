use crate::engine::config::AlignmentConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::similarity::error::SimilarityError;
use crate::similarity::source::StructureSource;
use crate::similarity::usalign::SimilarityScorer;
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, instrument};

/// Scores one reference against an ordered list of targets.
///
/// Entry `i` of the result is `score(reference, targets[i])`. Comparisons run one at a time
/// unless more than one worker is requested; either way the output keeps target order and
/// a single failed comparison fails the whole vector.
#[derive(Debug, Clone)]
pub struct PairwiseMatrixBuilder<'s> {
    scorer: &'s SimilarityScorer,
    workers: usize,
}

impl<'s> PairwiseMatrixBuilder<'s> {
    pub fn new(scorer: &'s SimilarityScorer) -> Self {
        Self { scorer, workers: 1 }
    }

    /// Uses the worker count of `config`; the scorer is usually built from the same config.
    pub fn from_config(scorer: &'s SimilarityScorer, config: &AlignmentConfig) -> Self {
        Self::new(scorer).workers(config.workers)
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n.max(1);
        self
    }

    #[instrument(skip_all, name = "pairwise_tm_scores", fields(workers = self.workers))]
    pub fn build<R, T>(
        &self,
        reference: &R,
        targets: &[T],
        reporter: &ProgressReporter,
    ) -> Result<Vec<f64>, SimilarityError>
    where
        R: StructureSource + ?Sized,
        T: StructureSource + Sync,
    {
        reporter.report(Progress::PhaseStart {
            name: "Pairwise TM-scores",
        });
        let reference = reference.structure_path()?;
        info!(
            reference = %reference.display(),
            targets = targets.len(),
            "Scoring reference against targets."
        );

        reporter.report(Progress::TaskStart {
            total_steps: targets.len() as u64,
        });
        let scores = if self.workers > 1 {
            self.score_pooled(&reference, targets, reporter)?
        } else {
            targets
                .iter()
                .map(|target| self.score_one(&reference, target, reporter))
                .collect::<Result<Vec<_>, _>>()?
        };
        reporter.report(Progress::TaskFinish);

        reporter.report(Progress::PhaseFinish);
        Ok(scores)
    }

    fn score_pooled<T>(
        &self,
        reference: &Path,
        targets: &[T],
        reporter: &ProgressReporter,
    ) -> Result<Vec<f64>, SimilarityError>
    where
        T: StructureSource + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| SimilarityError::WorkerPool(e.to_string()))?;

        pool.install(|| {
            targets
                .par_iter()
                .map(|target| self.score_one(reference, target, reporter))
                .collect::<Result<Vec<_>, _>>()
        })
    }

    fn score_one<T>(
        &self,
        reference: &Path,
        target: &T,
        reporter: &ProgressReporter,
    ) -> Result<f64, SimilarityError>
    where
        T: StructureSource,
    {
        let score = self
            .scorer
            .score_paths(reference, &target.structure_path()?)?;
        reporter.report(Progress::TaskIncrement);
        Ok(score)
    }
}
