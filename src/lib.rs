//! Two-body central force problem
//!
//! Library crate behind the `two_body_problem` binary.
//!
//! Module organization:
//! - `run`: run directory layout and validation
//! - `dataset`: five-column trajectory table loader and derived quantities
//! - `sim`: reduced one-body integrator for `U(r) = k * r^n`
//! - `plot`: the nine diagnostic PNG plots
//! - `pipeline`: the `plot` subcommand, end to end
//! - `config`: compiled-in render settings
//! - `error`: crate-wide error type

pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod run;
pub mod sim;

pub use error::{Result, TwoBodyError};
