//! # CLI Module
//!
//! Command-line interface for leakcheck, defined with `clap` derive macros.
//!
//! `-h`/`--help` is handled by clap wherever it appears and exits before any
//! pipeline side effect. The source argument is optional at the clap level so
//! that a missing or unusable file is reported as a usage diagnostic with exit
//! code 1, before any file is touched.

use clap::Parser;
use std::path::PathBuf;

use crate::error::PipelineError;
use crate::pipeline::PipelineRequest;

/// Format, compile, and valgrind-check a single C source file.
///
/// Runs the fixed pipeline clang-format → gcc → valgrind and fails when the
/// valgrind report shows definite leaks. A `.clang-format` file is written
/// with default settings when none exists.
#[derive(Parser, Debug)]
#[command(name = "leakcheck")]
#[command(version)]
#[command(about = "Format, compile, and valgrind-check a single C source file")]
pub struct Cli {
    /// C source file to check (the name must contain ".c").
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Keep valgrind.log after the run instead of deleting it.
    #[arg(long)]
    pub keep_log: bool,
}

impl Cli {
    /// Validates the arguments into an immutable pipeline request.
    pub fn into_request(self) -> Result<PipelineRequest, PipelineError> {
        let source = self.source.ok_or_else(|| {
            PipelineError::Usage("specify a C source file with a .c extension".to_string())
        })?;

        let name = source.to_string_lossy();
        if !name.contains(".c") {
            return Err(PipelineError::Usage(format!(
                "{name} does not look like a C source file"
            )));
        }
        if !source.exists() {
            return Err(PipelineError::Usage(format!("source file not found: {name}")));
        }

        Ok(PipelineRequest {
            source_path: source,
            keep_log: self.keep_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    /// Verify that the CLI definition is valid.
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_source_is_a_usage_error() {
        let cli = Cli::parse_from(["leakcheck"]);
        let err = cli.into_request().expect_err("no source given");
        assert!(matches!(err, PipelineError::Usage(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn non_c_source_is_rejected() {
        let cli = Cli::parse_from(["leakcheck", "notes.txt"]);
        let err = cli.into_request().expect_err("not a C file");
        assert!(matches!(err, PipelineError::Usage(_)));
    }

    #[test]
    fn existing_c_source_builds_a_request() {
        let dir = TempDir::new().expect("tempdir");
        let source = dir.path().join("demo.c");
        fs::write(&source, "int main(void) { return 0; }\n").expect("write source");

        let cli = Cli::parse_from([
            "leakcheck".to_string(),
            source.display().to_string(),
            "--keep-log".to_string(),
        ]);
        let request = cli.into_request().expect("valid request");
        assert_eq!(request.source_path, source);
        assert!(request.keep_log);
    }
}
