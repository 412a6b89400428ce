use super::model::Model;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A finished run and the ranked models it produced, ordered by rank.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub(crate) name: String,
    pub(crate) num_ranks: usize, // Number of ranks requested in the bundle configuration
    pub(crate) af_version: String,
    pub(crate) models: Vec<Model>,
    pub(crate) is_colabfold: bool,
}

/// A flat, serialisable view of a prediction centred on its best model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub name: String,
    pub af_version: String,
    pub num_models: usize,
    pub best_model_path: PathBuf,
    pub mean_plddt: f64,
    pub ptm: f64,
    pub iptm: Option<f64>,
}

impl Prediction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    pub fn af_version(&self) -> &str {
        &self.af_version
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn is_colabfold(&self) -> bool {
        self.is_colabfold
    }

    /// The rank 1 model, if the run produced any.
    pub fn best_model(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn summary(&self) -> Option<PredictionSummary> {
        let best = self.best_model()?;
        Some(PredictionSummary {
            name: self.name.clone(),
            af_version: self.af_version.clone(),
            num_models: self.models.len(),
            best_model_path: best.best_structure_path().to_path_buf(),
            mean_plddt: best.mean_plddt(),
            ptm: best.ptm(),
            iptm: best.iptm(),
        })
    }
}
