//! # ocean-common
//!
//! Shared error definitions, configuration models, and constants
//! used across the entire ocean workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives the generator and launcher
//! build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
