//! # af-tools Core Library
//!
//! A library for collecting the outputs of AlphaFold2-family structure prediction
//! pipelines (ColabFold in particular) into typed records, and for comparing the
//! resulting structures with an external TM-score alignment tool.
//!
//! ## Architectural Philosophy
//!
//! The library follows a layered layout so that each concern can be tested in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Model`, `Prediction`) and the
//!   parsers for the files a ColabFold bundle contains (MSA headers, score files, bundle
//!   configuration).
//!
//! - **[`engine`]: The Logic Core.** Turns bundle directories into predictions, either one
//!   directory at a time or across a bounded worker pool, and owns configuration, error
//!   types and progress reporting.
//!
//! - **[`similarity`]: Structural Comparison.** Resolves anything that points at a structure
//!   file to a path and scores pairs of structures by shelling out to `USalign`.
//!
//! - **[`workflows`]: The Public API.** The aggregation entry point that picks the output
//!   dialect and the execution mode from configuration.

pub mod core;
pub mod engine;
pub mod similarity;
pub mod workflows;
