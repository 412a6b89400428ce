use nalgebra::DMatrix;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One ranked structure produced by a prediction run.
///
/// `residue_plddts` covers every residue of every chain, so its length always equals the
/// last entry of `chain_ends`.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(crate) name: String,
    pub(crate) unrelaxed_path: PathBuf,
    pub(crate) relaxed_path: Option<PathBuf>,
    pub(crate) score_path: PathBuf,
    pub(crate) rank: usize,            // 1-based, 1 is the most confident model
    pub(crate) mean_plddt: f64,
    pub(crate) ptm: f64,
    pub(crate) iptm: Option<f64>,      // Only written by multimer models
    pub(crate) max_pae: Option<f64>,
    pub(crate) pae: DMatrix<f64>,      // Residue x residue predicted aligned error
    pub(crate) af_version: String,
    pub(crate) residue_plddts: Vec<f64>,
    pub(crate) chain_ends: Vec<usize>, // Cumulative residue count at the end of each chain
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unrelaxed_path(&self) -> &Path {
        &self.unrelaxed_path
    }

    pub fn relaxed_path(&self) -> Option<&Path> {
        self.relaxed_path.as_deref()
    }

    pub fn score_path(&self) -> &Path {
        &self.score_path
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn mean_plddt(&self) -> f64 {
        self.mean_plddt
    }

    pub fn ptm(&self) -> f64 {
        self.ptm
    }

    pub fn iptm(&self) -> Option<f64> {
        self.iptm
    }

    pub fn max_pae(&self) -> Option<f64> {
        self.max_pae
    }

    pub fn pae(&self) -> &DMatrix<f64> {
        &self.pae
    }

    pub fn af_version(&self) -> &str {
        &self.af_version
    }

    pub fn residue_plddts(&self) -> &[f64] {
        &self.residue_plddts
    }

    pub fn chain_ends(&self) -> &[usize] {
        &self.chain_ends
    }

    pub fn num_residues(&self) -> usize {
        self.chain_ends.last().copied().unwrap_or(0)
    }

    pub fn num_chains(&self) -> usize {
        self.chain_ends.len()
    }

    /// The relaxed structure when one was written for this rank, otherwise the unrelaxed one.
    pub fn best_structure_path(&self) -> &Path {
        self.relaxed_path().unwrap_or(&self.unrelaxed_path)
    }

    /// Residue index ranges (half-open) of each chain, in chain order.
    pub fn chain_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.chain_ends
            .iter()
            .scan(0usize, |start, &end| {
                let range = *start..end;
                *start = end;
                Some(range)
            })
    }

    pub fn chain_lengths(&self) -> Vec<usize> {
        self.chain_ranges().map(|r| r.len()).collect()
    }

    /// Mean pLDDT of each chain.
    pub fn chain_mean_plddts(&self) -> Vec<f64> {
        self.chain_ranges()
            .map(|range| {
                let values = &self.residue_plddts[range];
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            })
            .collect()
    }
}
