//! # Pipeline Controller Module
//!
//! Sequences the fixed check pipeline:
//! provision → format → compile → analyze → scan → cleanup.
//!
//! The pipeline is single-threaded and fully sequential; each external tool is
//! awaited before the next starts, and there are no timeouts (a hung tool
//! hangs the run). Formatting and compilation failures abort the run with the
//! failing tool's own exit code. The analysis tool's exit code reflects the
//! *target program's* exit, not analysis success, so it never aborts the run:
//! the report is scanned regardless.

use std::fs;
use std::path::PathBuf;

use crate::config;
use crate::error::{code_label, PipelineError};
use crate::runner::CommandSpec;
use crate::scanner::{self, LeakVerdict};

/// Relative path the compiler writes the executable to.
pub const COMPILED_BINARY: &str = "./program";

/// Report file the analysis output is duplicated into.
pub const REPORT_FILE: &str = "valgrind.log";

/// Validated input for one pipeline run. Immutable once built.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Path to the C source file to check.
    pub source_path: PathBuf,
    /// Retain the report file after the run instead of deleting it.
    pub keep_log: bool,
}

/// The check pipeline, with every step's command spelled out.
///
/// [`Pipeline::for_request`] builds the stock clang-format/gcc/valgrind
/// toolchain; the fields are public so the control flow can be exercised with
/// substitute commands.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub style_config: PathBuf,
    pub format: CommandSpec,
    pub compile: CommandSpec,
    pub analyze: CommandSpec,
    pub report_path: PathBuf,
    pub keep_log: bool,
}

impl Pipeline {
    /// Builds the default toolchain for `request`, rooted in the working
    /// directory.
    pub fn for_request(request: &PipelineRequest) -> Self {
        let source = request.source_path.to_string_lossy().into_owned();
        Self {
            style_config: PathBuf::from(config::STYLE_CONFIG_FILE),
            format: CommandSpec::new("Formatting source file", "clang-format", ["-i", source.as_str()]),
            compile: CommandSpec::new("Compiling", "gcc", [source.as_str(), "-o", COMPILED_BINARY, "-g"]),
            analyze: CommandSpec::new(
                "Checking with valgrind",
                "valgrind",
                ["--leak-check=full", "--track-origins=yes", COMPILED_BINARY],
            ),
            report_path: PathBuf::from(REPORT_FILE),
            keep_log: request.keep_log,
        }
    }

    /// Drives the pipeline to completion.
    ///
    /// Returns the leak verdict on a completed run, or the first fatal error.
    /// Artifacts already produced (the compiled binary, the report) are left
    /// in place on failure; there is no rollback.
    pub fn run(&self) -> Result<LeakVerdict, PipelineError> {
        config::ensure_default_config(&self.style_config)?;

        self.run_fatal_step(&self.format)?;
        self.run_fatal_step(&self.compile)?;

        match self.analyze.run_tee(&self.report_path) {
            Ok(result) if !result.success() => {
                // Mirrors the analyzed program's exit, not analysis success.
                log::warn!(
                    "analysis tool reported {}; scanning report anyway",
                    code_label(&result.exit_code)
                );
            }
            Ok(_) => {}
            Err(err) => {
                log::warn!("analysis tool could not run: {err}");
            }
        }

        let verdict = scanner::scan(&self.report_path);

        if !self.keep_log {
            if let Err(err) = fs::remove_file(&self.report_path) {
                log::debug!("could not remove {}: {err}", self.report_path.display());
            }
        }

        Ok(verdict)
    }

    /// Runs a step whose nonzero exit aborts the whole pipeline.
    fn run_fatal_step(&self, spec: &CommandSpec) -> Result<(), PipelineError> {
        let result = spec.run()?;
        if result.success() {
            Ok(())
        } else {
            Err(PipelineError::StepFailed {
                step: result.description,
                code: result.exit_code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(description: &str, script: &str) -> CommandSpec {
        CommandSpec::new(description, "sh", ["-c", script])
    }

    /// Pipeline with inert format/compile steps, rooted in `dir`.
    fn fake_pipeline(dir: &TempDir, analyze_script: &str, keep_log: bool) -> Pipeline {
        Pipeline {
            style_config: dir.path().join(config::STYLE_CONFIG_FILE),
            format: sh("Formatting source file", "exit 0"),
            compile: sh("Compiling", "exit 0"),
            analyze: sh("Checking with valgrind", analyze_script),
            report_path: dir.path().join(REPORT_FILE),
            keep_log,
        }
    }

    #[test]
    fn compile_failure_skips_analysis_and_mirrors_exit_code() {
        let dir = TempDir::new().expect("tempdir");
        let marker = dir.path().join("analysis-ran");
        let mut pipeline = fake_pipeline(
            &dir,
            &format!("touch {}", marker.display()),
            false,
        );
        pipeline.compile = sh("Compiling", "exit 3");

        let err = pipeline.run().expect_err("compile failure is fatal");
        assert_eq!(err.exit_code(), 3);
        assert!(!marker.exists(), "analysis must not run after failed compile");
        assert!(!pipeline.report_path.exists());
    }

    #[test]
    fn format_failure_skips_everything_downstream() {
        let dir = TempDir::new().expect("tempdir");
        let marker = dir.path().join("compile-ran");
        let mut pipeline = fake_pipeline(&dir, "exit 0", false);
        pipeline.format = sh("Formatting source file", "exit 5");
        pipeline.compile = sh("Compiling", &format!("touch {}", marker.display()));

        let err = pipeline.run().expect_err("format failure is fatal");
        assert_eq!(err.exit_code(), 5);
        assert!(!marker.exists());
    }

    #[test]
    fn analysis_failure_is_not_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let pipeline = fake_pipeline(
            &dir,
            "echo '   definitely lost: 0 bytes in 0 blocks'; exit 42",
            false,
        );

        let verdict = pipeline.run().expect("run completes");
        assert_eq!(verdict, LeakVerdict::NoLeaks);
    }

    #[test]
    fn leaky_report_yields_leaks_detected_and_log_is_removed() {
        let dir = TempDir::new().expect("tempdir");
        let pipeline = fake_pipeline(
            &dir,
            "echo '   definitely lost: 48 bytes in 2 blocks'",
            false,
        );

        let verdict = pipeline.run().expect("run completes");
        assert_eq!(verdict, LeakVerdict::LeaksDetected);
        assert!(!pipeline.report_path.exists(), "log removed without --keep-log");
    }

    #[test]
    fn keep_log_retains_the_report_file() {
        let dir = TempDir::new().expect("tempdir");
        let pipeline = fake_pipeline(
            &dir,
            "echo '   definitely lost: 0 bytes in 0 blocks'",
            true,
        );

        let verdict = pipeline.run().expect("run completes");
        assert_eq!(verdict, LeakVerdict::NoLeaks);
        assert!(pipeline.report_path.exists(), "log kept with --keep-log");
    }

    #[test]
    fn unlaunchable_analyzer_surfaces_as_unreadable_report() {
        let dir = TempDir::new().expect("tempdir");
        let mut pipeline = fake_pipeline(&dir, "exit 0", false);
        pipeline.analyze =
            CommandSpec::new("Checking with valgrind", "leakcheck-no-such-tool", ["x"]);

        let verdict = pipeline.run().expect("run completes");
        assert_eq!(verdict, LeakVerdict::ReportUnreadable);
    }

    #[test]
    fn provisioning_happens_before_formatting() {
        let dir = TempDir::new().expect("tempdir");
        let pipeline = fake_pipeline(&dir, "echo ok", true);

        pipeline.run().expect("run completes");
        let written =
            std::fs::read_to_string(&pipeline.style_config).expect("style config written");
        assert_eq!(written, config::DEFAULT_STYLE);
    }
}
