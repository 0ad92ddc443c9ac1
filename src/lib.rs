//! # pr-describe
//!
//! Generates pull request descriptions from the diff between HEAD and the
//! repository's base branch.
//!
//! The pipeline resolves the base branch ([`git::resolve_base_branch`]),
//! diffs the two commit trees ([`git::TreeDiffer`]), builds a prompt scaled to
//! the requested [`ai::DetailLevel`], asks a completion backend for the text
//! ([`ai::DescriptionService`]) and wraps the answer for display
//! ([`output::format_description`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod cli;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::pipeline::{DescriptionPipeline, Outcome, PipelineError, PipelineOptions};

/// The current version of pr-describe.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
