//! Launch control for ocean compositions.
//!
//! Decides whether artifacts must be regenerated, builds images for the
//! single-service flow, and hands the terminal over to docker by
//! replacing the current process.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod image;
pub mod launch;
pub mod process;
