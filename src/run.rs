//! Configure and run a racer.

use crate::report::{Report, Tally};
use crate::{relaxed, seq_cst, Error, Mode};

use std::fmt;
use std::num::NonZeroUsize;
use std::env::{self, VarError};
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be nonzero"),
};

const VARS: [&str; 3] = [
    "MEMORDER_MAX_ITERATIONS",
    "MEMORDER_CAPACITY",
    "MEMORDER_REPORT_FILE",
];

/// Which racer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "report", derive(serde::Serialize))]
#[cfg_attr(feature = "report", serde(rename_all = "snake_case"))]
pub enum Racer {
    /// The producer/consumer racer in [`relaxed`](crate::relaxed).
    Relaxed,

    /// The two writer, two reader racer in [`seq_cst`](crate::seq_cst).
    SeqCst,
}

/// Outcome of a bounded run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "report", derive(serde::Serialize))]
pub struct Summary {
    /// The racer that ran.
    pub racer: Racer,

    /// The memory order it ran with.
    pub mode: Mode,

    /// Completed iterations, or rounds for [`Racer::SeqCst`].
    pub iterations: u64,

    /// Violations observed.
    pub failures: u64,

    /// `failures / iterations`.
    pub rate: f64,

    /// Wall clock time of the run, in seconds.
    pub elapsed_secs: f64,
}

/// Configure a run.
#[derive(Debug)]
#[non_exhaustive] // Support adding more fields in the future
pub struct Builder {
    /// Number of iterations (rounds for [`Racer::SeqCst`]) after which the
    /// racer stops. Unbounded when `None`.
    ///
    /// Defaults to `MEMORDER_MAX_ITERATIONS` environment variable.
    pub max_iterations: Option<u64>,

    /// Capacity of the relaxed racer's data buffer.
    ///
    /// Defaults to `MEMORDER_CAPACITY` environment variable, or 10000.
    pub capacity: NonZeroUsize,

    /// After a bounded run, store the [`Summary`] as JSON in this file.
    /// Requires the `report` feature.
    ///
    /// Defaults to `MEMORDER_REPORT_FILE` environment variable.
    pub report_file: Option<PathBuf>,
}

impl Builder {
    /// Create a new `Builder` instance with default values, ignoring the
    /// environment.
    pub fn new() -> Builder {
        Builder {
            max_iterations: None,
            capacity: DEFAULT_CAPACITY,
            report_file: None,
        }
    }

    /// Create a new `Builder` from the `MEMORDER_*` environment variables.
    ///
    /// A variable that is set but not valid Unicode is an invalid value.
    pub fn from_env() -> Result<Builder, Error> {
        for var in VARS {
            if let Err(VarError::NotUnicode(value)) = env::var(var) {
                return Err(Error::InvalidVar(var, value.to_string_lossy().into_owned()));
            }
        }

        Builder::from_lookup(|var| env::var(var).ok())
    }

    /// Create a new `Builder` reading each `MEMORDER_*` variable through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Builder, Error>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut builder = Builder::new();

        if let Some(v) = lookup("MEMORDER_MAX_ITERATIONS") {
            let max = v
                .parse()
                .map_err(|_| Error::InvalidVar("MEMORDER_MAX_ITERATIONS", v))?;
            builder.max_iterations = Some(max);
        }

        if let Some(v) = lookup("MEMORDER_CAPACITY") {
            builder.capacity = v
                .parse()
                .map_err(|_| Error::InvalidVar("MEMORDER_CAPACITY", v))?;
        }

        if let Some(v) = lookup("MEMORDER_REPORT_FILE") {
            if v.is_empty() {
                return Err(Error::InvalidVar("MEMORDER_REPORT_FILE", v));
            }
            builder.report_file = Some(v.into());
        }

        Ok(builder)
    }

    /// Set the number of iterations after which the racer stops.
    pub fn max_iterations(&mut self, max: u64) -> &mut Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set the summary file.
    pub fn report_file(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        self.report_file = Some(file.into());
        self
    }

    /// Run `racer` with `mode`, passing violations to `report`.
    ///
    /// Only returns once a bounded run completed, or on error.
    pub fn run<R>(&self, racer: Racer, mode: Mode, report: R) -> Result<Summary, Error>
    where
        R: Report + Send + 'static,
    {
        if self.report_file.is_some() {
            summary_file::check_supported()?;
        }

        info!(
            %racer,
            %mode,
            capacity = self.capacity.get(),
            max_iterations = ?self.max_iterations,
            "starting"
        );

        let start = Instant::now();
        let (tally, _) = match racer {
            Racer::Relaxed => relaxed::run(mode, self.capacity, self.max_iterations, report)?,
            Racer::SeqCst => seq_cst::run(mode, self.max_iterations, report)?,
        };

        let summary = Summary::new(racer, mode, tally, start.elapsed().as_secs_f64());
        info!(
            iterations = summary.iterations,
            failures = summary.failures,
            rate = summary.rate,
            elapsed_secs = summary.elapsed_secs,
            "completed"
        );

        if let Some(ref path) = self.report_file {
            summary_file::store(&summary, path)?;
        }

        Ok(summary)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Summary {
    fn new(racer: Racer, mode: Mode, tally: Tally, elapsed_secs: f64) -> Summary {
        Summary {
            racer,
            mode,
            iterations: tally.iterations,
            failures: tally.failures,
            rate: tally.rate(),
            elapsed_secs,
        }
    }
}

impl Racer {
    /// The binary running this racer.
    pub fn program(&self) -> &'static str {
        match self {
            Racer::Relaxed => "memory_order_relaxed",
            Racer::SeqCst => "memory_order_seq_cst",
        }
    }
}

impl fmt::Display for Racer {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Racer::Relaxed => fmt.write_str("relaxed"),
            Racer::SeqCst => fmt.write_str("seq_cst"),
        }
    }
}

#[cfg(feature = "report")]
mod summary_file {
    use super::Summary;
    use crate::Error;

    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;

    pub(super) fn check_supported() -> Result<(), Error> {
        Ok(())
    }

    pub(super) fn store(summary: &Summary, fs_path: &Path) -> Result<(), Error> {
        let mut file = BufWriter::new(File::create(fs_path)?);
        serde_json::to_writer_pretty(&mut file, summary)?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(not(feature = "report"))]
mod summary_file {
    use super::Summary;
    use crate::Error;

    use std::path::Path;

    pub(super) fn check_supported() -> Result<(), Error> {
        Err(Error::ReportUnsupported)
    }

    pub(super) fn store(_summary: &Summary, _fs_path: &Path) -> Result<(), Error> {
        Err(Error::ReportUnsupported)
    }
}
