use crate::core::io::bundle::{Bundle, BundleConfig, RankedFile, RankedFileKind};
use crate::core::io::msa::{ChainBoundaries, MsaHeader, MsaReadError};
use crate::core::io::scores::ModelScores;
use crate::core::models::model::Model;
use crate::core::models::prediction::Prediction;
use crate::engine::error::AggregationError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Builds the predictions of a single ColabFold bundle directory.
///
/// A bundle may hold several runs; each `<run>.done.txt` marker yields one [`Prediction`].
/// A bundle without markers yields no predictions.
#[derive(Debug, Clone)]
pub struct RunRecordBuilder {
    dir: PathBuf,
}

impl RunRecordBuilder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[instrument(skip_all, name = "run_record_builder", fields(dir = %self.dir.display()))]
    pub fn build(&self) -> Result<Vec<Prediction>, AggregationError> {
        let bundle = Bundle::open(&self.dir)?;
        let config = bundle.config()?;

        let run_names = bundle.run_names();
        if run_names.is_empty() {
            debug!("No finished runs found in bundle.");
            return Ok(Vec::new());
        }

        run_names
            .iter()
            .map(|run_name| build_prediction(&bundle, &config, run_name))
            .collect()
    }
}

fn build_prediction(
    bundle: &Bundle,
    config: &BundleConfig,
    run_name: &str,
) -> Result<Prediction, AggregationError> {
    let bounds = read_chain_boundaries(&bundle.msa_path(run_name))?;

    let mut unrelaxed = bundle.ranked_files(run_name, RankedFileKind::Unrelaxed);
    if unrelaxed.len() > config.num_models {
        warn!(
            run = run_name,
            found = unrelaxed.len(),
            declared = config.num_models,
            "More ranked structures than declared models; keeping the top ranks only."
        );
        unrelaxed.truncate(config.num_models);
    }
    let mut relaxed = index_by_rank_token(bundle.ranked_files(run_name, RankedFileKind::Relaxed));
    let scores = index_by_rank_token(bundle.ranked_files(run_name, RankedFileKind::Scores));

    let mut models = Vec::with_capacity(unrelaxed.len());
    for (i, structure) in unrelaxed.into_iter().enumerate() {
        let score_path = scores.get(&structure.rank_token).ok_or_else(|| {
            AggregationError::MissingScoreFile {
                structure_path: structure.path.to_string_lossy().to_string(),
            }
        })?;

        let relaxed_path = if i < config.num_relax {
            let path = relaxed.remove(&structure.rank_token);
            if path.is_none() {
                warn!(
                    run = run_name,
                    rank = i + 1,
                    "Rank is within the relax count but has no relaxed structure."
                );
            }
            path
        } else {
            None
        };

        models.push(build_model(
            run_name,
            i + 1,
            structure.path,
            relaxed_path,
            score_path,
            &bounds,
            &config.af_version,
        )?);
    }

    info!(
        run = run_name,
        chains = bounds.num_chains(),
        models = models.len(),
        "Prediction assembled."
    );
    Ok(Prediction {
        name: run_name.to_string(),
        num_ranks: config.num_models,
        af_version: config.af_version.clone(),
        models,
        is_colabfold: true,
    })
}

fn read_chain_boundaries(msa_path: &Path) -> Result<ChainBoundaries, AggregationError> {
    let path = msa_path.to_string_lossy().to_string();
    let header = MsaHeader::read_from_path(msa_path).map_err(|e| match e {
        MsaReadError::Io(source) => AggregationError::Io {
            path: path.clone(),
            source,
        },
        MsaReadError::Header(source) => AggregationError::MalformedHeader {
            path: path.clone(),
            source,
        },
    })?;
    header
        .chain_boundaries()
        .map_err(|source| AggregationError::MalformedHeader { path, source })
}

fn index_by_rank_token(files: Vec<RankedFile>) -> HashMap<String, PathBuf> {
    files
        .into_iter()
        .map(|file| (file.rank_token, file.path))
        .collect()
}

fn build_model(
    run_name: &str,
    rank: usize,
    unrelaxed_path: PathBuf,
    relaxed_path: Option<PathBuf>,
    score_path: &Path,
    bounds: &ChainBoundaries,
    af_version: &str,
) -> Result<Model, AggregationError> {
    let scores = ModelScores::load(score_path)?;

    let expected = bounds.total_residues();
    for found in [scores.plddt.len(), scores.pae.nrows()] {
        if found != expected {
            return Err(AggregationError::ResidueCountMismatch {
                path: score_path.to_string_lossy().to_string(),
                run: run_name.to_string(),
                found,
                expected,
            });
        }
    }

    let mean_plddt = scores.mean_plddt();
    Ok(Model {
        name: run_name.to_string(),
        unrelaxed_path,
        relaxed_path,
        score_path: score_path.to_path_buf(),
        rank,
        mean_plddt,
        ptm: scores.ptm,
        iptm: scores.iptm,
        max_pae: scores.max_pae,
        pae: scores.pae,
        af_version: af_version.to_string(),
        residue_plddts: scores.plddt,
        chain_ends: bounds.chain_ends.clone(),
    })
}
