//! # Engine Module
//!
//! This module turns ColabFold output bundles on disk into [`Prediction`] records.
//!
//! ## Overview
//!
//! A bundle is any directory holding a ColabFold `config.json`. The engine discovers
//! bundles under a root, builds the predictions of each bundle with [`run_builder`], and
//! either walks the bundles one after another or spreads them over a bounded worker pool
//! ([`aggregator`]). Results are always grouped by bundle, in discovery order.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Worker counts, output dialect, alignment tool settings
//! - **Run Records** ([`run_builder`]) - One bundle directory to its predictions and models
//! - **Aggregation** ([`aggregator`]) - Bundle discovery, serial and pooled execution
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The aggregation error taxonomy
//!
//! [`Prediction`]: crate::core::models::prediction::Prediction

pub mod aggregator;
pub mod config;
pub mod error;
pub mod progress;
pub mod run_builder;

#[cfg(test)]
pub(crate) mod fixtures;
