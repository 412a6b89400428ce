//! # Core Models Module
//!
//! Records describing what a structure prediction run produced.
//!
//! ## Key Components
//!
//! - [`model`] - One ranked model: structure paths, confidence scores and chain layout
//! - [`prediction`] - One run and its ranked models, plus a flat summary record
//!
//! Records are built once by [`crate::engine::run_builder`] and are read-only afterwards;
//! fields are crate-visible and exposed through accessors.
//!
//! ```ignore
//! use aftools::workflows::aggregate::AfOutput;
//!
//! let predictions = AfOutput::new("colabfold_out", Default::default()).predictions()?;
//! for model in predictions[0].models() {
//!     println!("rank {} mean pLDDT {:.1}", model.rank(), model.mean_plddt());
//! }
//! ```

pub mod model;
pub mod prediction;
