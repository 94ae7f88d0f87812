//! # Style Config Provisioner
//!
//! Makes sure a formatting-style config exists before the formatter runs. An
//! existing file is never touched; an absent one is written with a fixed
//! default. The default is an opaque blob as far as this program is concerned,
//! nothing in it is parsed or validated.

use std::fs;
use std::path::Path;

use colored::*;

use crate::error::PipelineError;

/// Style config file name, resolved against the working directory.
pub const STYLE_CONFIG_FILE: &str = ".clang-format";

/// Default style settings written when no config is present.
pub const DEFAULT_STYLE: &str = "---\n\
BasedOnStyle: Google\n\
IndentWidth: 4\n\
ColumnLimit: 110\n";

/// Ensures a style config exists at `path`, writing [`DEFAULT_STYLE`] if not.
///
/// Creation failure is fatal for the whole run and surfaces as
/// [`PipelineError::ConfigCreate`]; the formatting step is meaningless
/// without a usable config.
pub fn ensure_default_config(path: &Path) -> Result<(), PipelineError> {
    if path.exists() {
        log::debug!("style config {} already present", path.display());
        return Ok(());
    }

    println!(
        "{} {} not found, writing defaults",
        "[*]".yellow().bold(),
        path.display()
    );

    fs::write(path, DEFAULT_STYLE).map_err(|err| PipelineError::ConfigCreate {
        path: path.to_path_buf(),
        source: err,
    })?;

    println!(
        "{} Created {}",
        "[+]".green().bold(),
        path.display().to_string().yellow()
    );
    Ok(())
}
