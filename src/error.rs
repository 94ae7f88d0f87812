//! # Error Types
//!
//! Typed error taxonomy for the check pipeline. Every failure a step can
//! report travels through [`PipelineError`] back to the front-end, which maps
//! it to a process exit code; no component terminates the process directly.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while driving the check pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The style config file was absent and could not be created.
    ///
    /// Without a usable style config the formatting step is meaningless, so
    /// this aborts the whole run with its own exit code.
    #[error("failed to create style config {}: {source}", .path.display())]
    ConfigCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fatal pipeline step (format or compile) exited unsuccessfully.
    ///
    /// The exit code mirrors the failing tool's own code. `code` is `None`
    /// when the platform reported termination by signal.
    #[error("{step} failed with {}", code_label(.code))]
    StepFailed { step: String, code: Option<i32> },

    /// An external tool could not be launched at all.
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command line did not name a usable C source file.
    #[error("{0}")]
    Usage(String),
}

impl PipelineError {
    /// Process exit code the front-end should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::ConfigCreate { .. } => 2,
            PipelineError::StepFailed { code, .. } => code.unwrap_or(1),
            PipelineError::Spawn { .. } => 1,
            PipelineError::Usage(_) => 1,
        }
    }
}

/// Human-readable label for a subprocess termination status.
pub(crate) fn code_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "termination by signal".to_string(),
    }
}
