use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("Failed to launch alignment tool '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("Alignment tool exited with {status}; stderr: {stderr}")]
    ToolFailed {
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("Unexpected alignment tool output ({reason}); stdout: {stdout:?}")]
    UnexpectedOutput {
        reason: String,
        stdout: String,
        stderr: String,
    },

    #[error("Unsupported structure input: {description}")]
    UnsupportedInput { description: String },

    #[error("Prediction '{name}' has no models to compare")]
    EmptyPrediction { name: String },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}
