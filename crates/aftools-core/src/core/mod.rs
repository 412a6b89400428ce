//! # Core Module
//!
//! Stateless building blocks shared by the rest of the library.
//!
//! ## Architecture
//!
//! - **Prediction Records** ([`models`]) - Ranked models and the predictions that own them
//! - **File I/O** ([`io`]) - Parsers for the files found in a ColabFold output bundle
//!
//! Nothing in this module touches more than one bundle at a time, and nothing here keeps
//! state between calls. Orchestration lives in [`crate::engine`].

pub mod io;
pub mod models;
