use std::path::PathBuf;

use crate::error::{Result, UvVisError};

/// Conversion constant between photon energy (eV) and wavelength (nm).
pub const EV_NM: f64 = 1240.0;

// ---------------------------------------------------------------------------
// Excitation – one matched line of a TDDFT log
// ---------------------------------------------------------------------------

/// A single singlet excitation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Excitation {
    /// Excitation energy as printed in the log.
    pub energy_ev: f64,
    /// `EV_NM / energy_ev`.
    pub wavelength_nm: f64,
    /// Used as the Gaussian peak amplitude.
    pub oscillator_strength: f64,
}

impl Excitation {
    /// Build an excitation from the energy reported in the log.
    ///
    /// The energy must be strictly positive; callers check this before
    /// constructing (see [`crate::data::extract`]).
    pub fn from_energy(energy_ev: f64, oscillator_strength: f64) -> Self {
        Excitation {
            energy_ev,
            wavelength_nm: EV_NM / energy_ev,
            oscillator_strength,
        }
    }
}

/// Excitations of one log file, in line order.
pub type ExcitationSet = Vec<Excitation>;

// ---------------------------------------------------------------------------
// Sample – a labelled excitation set
// ---------------------------------------------------------------------------

/// One plotted sample: its legend label, where it came from and its lines.
#[derive(Debug, Clone)]
pub struct Sample {
    pub label: String,
    pub source: Option<PathBuf>,
    pub excitations: ExcitationSet,
}

impl Sample {
    pub fn new(label: impl Into<String>, excitations: ExcitationSet) -> Self {
        Sample {
            label: label.into(),
            source: None,
            excitations,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }
}

// ---------------------------------------------------------------------------
// WavelengthGrid – shared x axis
// ---------------------------------------------------------------------------

/// Evenly spaced wavelengths from `low` to `high`, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    points: Vec<f64>,
}

impl WavelengthGrid {
    /// Build a grid of `num_points` samples over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`UvVisError::DegenerateParameter`] if
    ///   - `num_points` is zero
    ///   - a limit is not finite
    ///   - the range is reversed or has zero width
    pub fn linspace(low: f64, high: f64, num_points: usize) -> Result<Self> {
        if num_points == 0 {
            return Err(UvVisError::degenerate(
                "num_points",
                "at least one grid point is required",
            ));
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(UvVisError::degenerate(
                "xrange",
                format!("limits must be finite, got ({low}, {high})"),
            ));
        }
        if low >= high {
            return Err(UvVisError::degenerate(
                "xrange",
                format!("range must be ascending with non-zero width, got ({low}, {high})"),
            ));
        }

        let points = if num_points == 1 {
            vec![low]
        } else {
            let step = (high - low) / (num_points - 1) as f64;
            let mut pts: Vec<f64> = (0..num_points).map(|i| low + i as f64 * step).collect();
            // Pin the end point so rounding never pushes it off the range.
            pts[num_points - 1] = high;
            pts
        };
        Ok(WavelengthGrid { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn low(&self) -> f64 {
        self.points[0]
    }

    pub fn high(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}

// ---------------------------------------------------------------------------
// Spectrum – broadened intensities on a grid
// ---------------------------------------------------------------------------

/// Accumulated broadened intensity, aligned 1:1 with a [`WavelengthGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub values: Vec<f64>,
}

impl Spectrum {
    pub fn zeros(grid: &WavelengthGrid) -> Self {
        Spectrum {
            values: vec![0.0; grid.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value, or `0.0` for an empty spectrum.
    pub fn max(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    /// Values rescaled to `[0, 1]`. A flat spectrum maps to all zeros.
    pub fn min_max_scaled(&self) -> Vec<f64> {
        let min = self.values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            vec![0.0; self.values.len()]
        } else {
            self.values.iter().map(|&v| (v - min) / range).collect()
        }
    }
}
