//! # Process Runner Module
//!
//! Launches the external tools the pipeline depends on and reports how they
//! terminated.
//!
//! Commands are described structurally as an executable plus a discrete
//! argument list ([`CommandSpec`]) and handed to [`std::process::Command`];
//! no shell is involved and no command line is built by string interpolation.
//! Captured stdout and stderr are combined into one stream that is echoed to
//! the terminal and, for the analysis step, duplicated into the report file by
//! a tee adapter owned by the runner.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

use colored::*;

use crate::error::{code_label, PipelineError};

/// Structured description of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Human-readable label for diagnostics ("Compiling", ...).
    pub description: String,
    /// Executable name or path.
    pub program: String,
    /// Arguments passed verbatim, one element per argument.
    pub args: Vec<String>,
}

/// Termination report for one command invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub description: String,
    pub command_line: String,
    /// Subprocess exit code; `None` when terminated by signal.
    pub exit_code: Option<i32>,
}

impl CommandSpec {
    pub fn new<S, I, A>(description: S, program: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            description: description.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Display form of the invocation, for banners and diagnostics only.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Runs the command to completion, echoing its combined output.
    pub fn run(&self) -> Result<CommandResult, PipelineError> {
        self.execute(None)
    }

    /// Runs the command, additionally duplicating its combined output into
    /// the file at `report_path`. The file is created (or truncated), fully
    /// written, and closed before this returns.
    pub fn run_tee(&self, report_path: &Path) -> Result<CommandResult, PipelineError> {
        self.execute(Some(report_path))
    }

    // Output is captured in full and then echoed stdout-first, stderr-second;
    // the interleaving a live combined stream would show is not preserved.
    fn execute(&self, tee_path: Option<&Path>) -> Result<CommandResult, PipelineError> {
        println!("\n{} {}", "==>".cyan().bold(), self.description.bold());
        println!("$ {}", self.command_line().dimmed());

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|err| PipelineError::Spawn {
                program: self.program.clone(),
                source: err,
            })?;

        let mut tee = Tee::open(tee_path);
        tee.write_chunk(&output.stdout);
        tee.write_chunk(&output.stderr);
        drop(tee);

        let result = CommandResult {
            description: self.description.clone(),
            command_line: self.command_line(),
            exit_code: output.status.code(),
        };

        if !result.success() {
            eprintln!(
                "{} {} ({})",
                "[!] Command failed:".red().bold(),
                result.command_line,
                code_label(&result.exit_code)
            );
        }

        Ok(result)
    }
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Writes every chunk to the terminal and, when open, to the report file.
struct Tee {
    report: Option<File>,
}

impl Tee {
    fn open(path: Option<&Path>) -> Self {
        let report = path.and_then(|path| match File::create(path) {
            Ok(file) => Some(file),
            Err(err) => {
                log::warn!("could not create report {}: {}", path.display(), err);
                None
            }
        });
        Self { report }
    }

    fn write_chunk(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout.write_all(chunk) {
            log::debug!("terminal write failed: {}", err);
        }
        if let Some(report) = &mut self.report {
            if let Err(err) = report.write_all(chunk) {
                log::warn!("report write failed: {}", err);
            }
        }
    }
}
