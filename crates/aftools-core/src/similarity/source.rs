use crate::core::models::model::Model;
use crate::core::models::prediction::{Prediction, PredictionSummary};
use crate::similarity::error::SimilarityError;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Key under which tabular records store the path of their best structure.
pub const BEST_MODEL_PATH_KEY: &str = "best_model_path";

/// Something that points at a structure file.
///
/// Scoring only ever sees the resolved path; records unwrap to the path they carry and
/// resolve that in turn.
pub trait StructureSource {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError>;
}

impl StructureSource for Path {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        if self.as_os_str().is_empty() {
            return Err(SimilarityError::UnsupportedInput {
                description: "empty structure path".to_string(),
            });
        }
        Ok(self.to_path_buf())
    }
}

impl StructureSource for PathBuf {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        self.as_path().structure_path()
    }
}

impl StructureSource for str {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        Path::new(self).structure_path()
    }
}

impl StructureSource for String {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        self.as_str().structure_path()
    }
}

impl StructureSource for Model {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        self.best_structure_path().structure_path()
    }
}

impl StructureSource for Prediction {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        self.best_model()
            .ok_or_else(|| SimilarityError::EmptyPrediction {
                name: self.name().to_string(),
            })?
            .structure_path()
    }
}

impl StructureSource for PredictionSummary {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        self.best_model_path.structure_path()
    }
}

/// A JSON string is a path; a JSON object is a record whose `best_model_path` is resolved
/// recursively. Any other JSON value is rejected.
impl StructureSource for Value {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        match self {
            Value::String(path) => path.structure_path(),
            Value::Object(record) => record
                .get(BEST_MODEL_PATH_KEY)
                .ok_or_else(|| SimilarityError::UnsupportedInput {
                    description: format!("record without a '{BEST_MODEL_PATH_KEY}' field"),
                })?
                .structure_path(),
            other => Err(SimilarityError::UnsupportedInput {
                description: format!("JSON {}", json_kind(other)),
            }),
        }
    }
}

impl<T: StructureSource + ?Sized> StructureSource for &T {
    fn structure_path(&self) -> Result<PathBuf, SimilarityError> {
        (**self).structure_path()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::model::tests::model_fixture;
    use serde_json::json;

    #[test]
    fn plain_paths_resolve_to_themselves() {
        assert_eq!(
            "/data/a.pdb".structure_path().unwrap(),
            PathBuf::from("/data/a.pdb")
        );
        assert_eq!(
            String::from("b.pdb").structure_path().unwrap(),
            PathBuf::from("b.pdb")
        );
        assert_eq!(
            Path::new("c.pdb").structure_path().unwrap(),
            PathBuf::from("c.pdb")
        );
    }

    #[test]
    fn empty_path_is_unsupported() {
        assert!(matches!(
            "".structure_path(),
            Err(SimilarityError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn model_resolves_to_its_best_structure() {
        let model = model_fixture(1, true);
        assert_eq!(
            model.structure_path().unwrap(),
            PathBuf::from("/out/query_relaxed_rank_001.pdb")
        );
    }

    #[test]
    fn prediction_resolves_through_its_rank_one_model() {
        let prediction = Prediction {
            name: "query".to_string(),
            num_ranks: 2,
            af_version: "alphafold2_multimer_v3".to_string(),
            models: vec![model_fixture(1, false), model_fixture(2, true)],
            is_colabfold: true,
        };
        assert_eq!(
            prediction.structure_path().unwrap(),
            PathBuf::from("/out/query_unrelaxed_rank_001.pdb")
        );

        let summary = prediction.summary().unwrap();
        assert_eq!(
            summary.structure_path().unwrap(),
            prediction.structure_path().unwrap()
        );
    }

    #[test]
    fn prediction_without_models_cannot_be_resolved() {
        let prediction = Prediction {
            name: "empty".to_string(),
            num_ranks: 5,
            af_version: "alphafold2_ptm".to_string(),
            models: Vec::new(),
            is_colabfold: true,
        };
        assert!(matches!(
            prediction.structure_path(),
            Err(SimilarityError::EmptyPrediction { name }) if name == "empty"
        ));
    }

    #[test]
    fn json_record_unwraps_best_model_path() {
        let row = json!({"name": "q", "best_model_path": "/runs/q_relaxed_rank_001.pdb"});
        assert_eq!(
            row.structure_path().unwrap(),
            PathBuf::from("/runs/q_relaxed_rank_001.pdb")
        );
    }

    #[test]
    fn nested_json_records_are_unwrapped_recursively() {
        let row = json!({"best_model_path": {"best_model_path": "/runs/inner.pdb"}});
        assert_eq!(
            row.structure_path().unwrap(),
            PathBuf::from("/runs/inner.pdb")
        );
    }

    #[test]
    fn json_values_without_a_path_are_unsupported() {
        for value in [
            json!(42),
            json!(null),
            json!(["a.pdb"]),
            json!({"path": "a.pdb"}),
            json!({"best_model_path": 7}),
        ] {
            assert!(matches!(
                value.structure_path(),
                Err(SimilarityError::UnsupportedInput { .. })
            ));
        }
    }

    #[test]
    fn references_delegate_to_the_underlying_source() {
        let path = PathBuf::from("x.pdb");
        let by_ref: &PathBuf = &path;
        assert_eq!(by_ref.structure_path().unwrap(), path);
    }
}
