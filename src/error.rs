use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the extraction / broadening / plotting pipeline.
#[derive(Debug, Error)]
pub enum UvVisError {
    /// The log file could not be opened or read.
    #[error("cannot read log file {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A matched line whose numeric captures do not parse as reals.
    #[error("malformed excitation record on line {line}: {text:?}")]
    MalformedRecord { line: usize, text: String },

    /// A matched line reporting an excitation energy that is not positive.
    #[error("non-positive excitation energy {energy_ev} eV on line {line}")]
    NonPositiveEnergy { line: usize, energy_ev: f64 },

    /// Labels and log files are not paired one to one.
    #[error("configuration mismatch: {logfiles} log file(s) but {labels} label(s)")]
    ConfigMismatch { logfiles: usize, labels: usize },

    /// Broadening width, grid size or wavelength range is unusable.
    #[error("invalid parameter `{name}`: {reason}")]
    DegenerateParameter { name: &'static str, reason: String },

    /// The configuration file could not be parsed.
    #[error("invalid configuration file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported output format for {0} (expected .png or .svg)")]
    UnsupportedOutput(PathBuf),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl UvVisError {
    pub(crate) fn degenerate(name: &'static str, reason: impl Into<String>) -> Self {
        UvVisError::DegenerateParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UvVisError>;
