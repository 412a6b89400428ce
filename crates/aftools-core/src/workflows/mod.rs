//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] parsers and the [`crate::engine`]
//! orchestration together.
//!
//! ## Architecture
//!
//! - **Output Aggregation** ([`aggregate`]) - Collects every prediction under an output
//!   directory, choosing the output dialect and serial or pooled execution from
//!   [`AggregationConfig`](crate::engine::config::AggregationConfig).

pub mod aggregate;
