//! Provides parsers for the files written by ColabFold.
//!
//! A finished ColabFold bundle holds a `config.json`, one `.done.txt` marker and one `.a3m`
//! alignment per run, and per-rank structure and score files. The submodules here read
//! each of those pieces; assembling them into predictions is the job of
//! [`crate::engine::run_builder`].

pub mod bundle;
pub mod msa;
pub mod scores;
