//! Memory-order selection.

use crate::Error;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::Ordering;

/// The memory order a racer runs with.
///
/// A mode is not an [`Ordering`] itself. It names a pair of orderings, one for
/// loads and one for stores, see [`Mode::orderings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[cfg_attr(feature = "report", derive(serde::Serialize))]
#[cfg_attr(feature = "report", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// No ordering beyond atomicity.
    #[value(name = "relaxed")]
    Relaxed,

    /// Acquire loads and release stores.
    #[value(name = "acq_rel")]
    AcqRel,

    /// One total order over all operations.
    #[value(name = "seq_cst")]
    SeqCst,
}

/// The load and store orderings derived from a [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orderings {
    /// Ordering for loads.
    pub read: Ordering,

    /// Ordering for stores and read-modify-write increments.
    pub write: Ordering,
}

impl Mode {
    /// Every mode, weakest first.
    pub const ALL: [Mode; 3] = [Mode::Relaxed, Mode::AcqRel, Mode::SeqCst];

    /// The name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Relaxed => "relaxed",
            Mode::AcqRel => "acq_rel",
            Mode::SeqCst => "seq_cst",
        }
    }

    /// Splits the mode into load and store orderings.
    ///
    /// `AcqRel` is not a valid ordering for a plain load or store, so it splits
    /// into `Acquire` for loads and `Release` for stores. `Relaxed` and
    /// `SeqCst` apply to both sides unchanged.
    pub fn orderings(self) -> Orderings {
        match self {
            Mode::Relaxed => Orderings::uniform(Ordering::Relaxed),
            Mode::AcqRel => Orderings {
                read: Ordering::Acquire,
                write: Ordering::Release,
            },
            Mode::SeqCst => Orderings::uniform(Ordering::SeqCst),
        }
    }
}

impl Orderings {
    fn uniform(order: Ordering) -> Orderings {
        Orderings {
            read: order,
            write: order,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode, Error> {
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}
