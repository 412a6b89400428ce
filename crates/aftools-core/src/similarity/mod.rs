//! # Similarity Module
//!
//! TM-score comparison of predicted structures through the external `USalign` binary.
//!
//! ## Architecture
//!
//! - **Structure Sources** ([`source`]) - Anything that resolves to a structure file path:
//!   plain paths, models, predictions, summary records and JSON rows with a `best_model_path`
//! - **Scoring** ([`usalign`]) - One `USalign` invocation per structure pair
//! - **Pairwise Vectors** ([`matrix`]) - One reference scored against many targets
//! - **Error Handling** ([`error`]) - Tool failures and unsupported inputs
//!
//! Scoring never substitutes a default value: a failed or unparseable tool run is an error.

pub mod error;
pub mod matrix;
pub mod source;
pub mod usalign;
