use std::io;

/// Errors returned while configuring or running a racer.
///
/// Ordering violations observed by a racer are not errors. They are counted
/// and reported through [`Report`](crate::report::Report).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The memory order name is not one of `relaxed`, `acq_rel`, `seq_cst`.
    #[error("unknown memory order `{0}`, expected one of relaxed, acq_rel, seq_cst")]
    UnknownMode(String),

    /// A `MEMORDER_*` environment variable holds an unusable value.
    #[error("invalid value for `{0}`: {1:?}")]
    InvalidVar(&'static str, String),

    /// A worker thread could not be started.
    #[error("failed to spawn the {0} thread")]
    Spawn(&'static str, #[source] io::Error),

    /// A worker thread panicked.
    #[error("the {0} thread panicked")]
    WorkerPanicked(&'static str),

    /// Writing the run summary failed.
    #[error("failed to write the run summary")]
    Io(#[from] io::Error),

    /// Serializing the run summary failed.
    #[cfg(feature = "report")]
    #[error("failed to serialize the run summary")]
    Serialize(#[from] serde_json::Error),

    /// A summary file was requested from a build without the `report` feature.
    #[error("not compiled with the `report` feature")]
    ReportUnsupported,
}
