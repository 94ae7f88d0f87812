//! # leakcheck CLI Entry Point
//!
//! Parses arguments, drives the check pipeline, and converts its outcome to a
//! process exit code: 0 when formatting and compilation succeeded and no leaks
//! were found; the failing tool's own code when formatting or compilation
//! fails; 1 for detected leaks, an unreadable report, or a usage error; 2 when
//! the style config cannot be created.

use clap::Parser;
use colored::*;
use leakcheck::{Cli, LeakVerdict, Pipeline};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let request = match cli.into_request() {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{} {}", "[!]".red().bold(), err);
            eprintln!("Usage: leakcheck <source-file> [--keep-log]  (see --help)");
            return err.exit_code();
        }
    };

    println!(
        "{} {}",
        "[*] Checking:".green().bold(),
        request.source_path.display().to_string().yellow()
    );

    let pipeline = Pipeline::for_request(&request);
    match pipeline.run() {
        Ok(LeakVerdict::NoLeaks) => {
            println!("\n{}", "[+] No memory leaks detected.".green().bold());
            0
        }
        Ok(LeakVerdict::LeaksDetected) => {
            eprintln!("\n{}", "[!] Memory leaks detected!".red().bold());
            LeakVerdict::LeaksDetected.exit_code()
        }
        Ok(LeakVerdict::ReportUnreadable) => {
            eprintln!(
                "\n{} {}",
                "[!] Could not read report:".red().bold(),
                pipeline.report_path.display()
            );
            LeakVerdict::ReportUnreadable.exit_code()
        }
        Err(err) => {
            eprintln!("\n{} {}", "[!]".red().bold(), err);
            err.exit_code()
        }
    }
}
