//! # leakcheck Library
//!
//! A thin command-line orchestrator for C memory-leak checking: formats a
//! single C source file, compiles it, runs a memory-analysis tool against the
//! binary, and inspects the tool's text report for a leak signature.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and argument validation
//! - [`config`] - Default formatting-style config provisioning
//! - [`error`] - Typed pipeline error taxonomy
//! - [`pipeline`] - The provision → format → compile → analyze → scan sequence
//! - [`runner`] - External process invocation with output capture and tee
//! - [`scanner`] - Leak-signature scan over the analysis report
//!
//! ## Example
//!
//! ```rust,ignore
//! use leakcheck::{Pipeline, PipelineRequest};
//!
//! let request = PipelineRequest {
//!     source_path: "demo.c".into(),
//!     keep_log: false,
//! };
//! let verdict = Pipeline::for_request(&request).run()?;
//! std::process::exit(verdict.exit_code());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod scanner;

pub use cli::Cli;
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineRequest};
pub use runner::{CommandResult, CommandSpec};
pub use scanner::LeakVerdict;
