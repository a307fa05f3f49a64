//! # ocean-recipe
//!
//! Turns a service's build configuration into a build file.
//!
//! Handles:
//! - **Blubber**: Inspection of the build configuration (defined variants,
//!   in-container working directory).
//! - **Compiler**: The [`compiler::RecipeCompiler`] seam and its production
//!   implementation, which drives the external compiler binary.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod blubber;
pub mod compiler;

pub use compiler::{BlubberCli, BuildRecipe, RecipeCompiler, compile_service};
