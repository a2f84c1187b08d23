//! Simulated UV-Vis absorption spectra from TDDFT log files.
//!
//! Singlet excitations are pulled out of the logs with a line pattern,
//! converted to wavelengths (`λ = 1240 / E`), broadened with Gaussians on a
//! shared wavelength grid and collected into a [`chart::SpectrumChart`] that
//! can be shown in the viewer or written out through a [`chart::sink::ChartSink`].

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use error::{Result, UvVisError};
