//! Command line entry point shared by the racer binaries.

use crate::{report, Builder, Mode, Racer};

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Arguments accepted by both racer binaries.
#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Memory order to race with.
    #[arg(value_enum)]
    pub mode: Mode,
}

impl Args {
    /// Parses a full argument vector, program name first.
    ///
    /// Anything other than exactly one known mode is rejected, including a
    /// mode behind a `--` separator.
    pub fn parse_from_args<I, T>(args: I) -> Option<Args>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() != 2 {
            return None;
        }
        Args::try_parse_from(args).ok()
    }
}

/// The usage line printed for invalid arguments.
pub fn usage(program: &str) -> String {
    format!("usage: {} {{relaxed|acq_rel|seq_cst}}", program)
}

/// Installs the `tracing` subscriber, filtered by `MEMORDER_LOG`.
///
/// Diagnostics go to standard error so standard output carries nothing but
/// violation lines.
pub fn init_logging() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_env("MEMORDER_LOG"))
        .with_writer(std::io::stderr)
        .without_time()
        .with_thread_names(true)
        .try_init();
}

/// Runs `racer` as a process: parses the arguments, reads the configuration
/// from the environment and reports violations on standard output.
pub fn main(racer: Racer) -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let program = argv
        .first()
        .map(|arg0| arg0.to_string_lossy().into_owned())
        .unwrap_or_else(|| racer.program().to_string());

    let args = match Args::parse_from_args(&argv) {
        Some(args) => args,
        None => {
            eprintln!("{}", usage(&program));
            return ExitCode::FAILURE;
        }
    };

    init_logging();

    let builder = match Builder::from_env() {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            return ExitCode::FAILURE;
        }
    };

    match builder.run(racer, args.mode, report::Stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            ExitCode::FAILURE
        }
    }
}
