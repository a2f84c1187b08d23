//! Chart assembly: excitation sets in, a renderable [`SpectrumChart`] out.
//!
//! Nothing here draws. The chart is handed to a [`sink::ChartSink`] (image
//! or CSV file) or to the egui viewer.

pub mod sink;

use crate::color::{generate_palette, Rgb};
use crate::config::{validate_width, SpectrumConfig};
use crate::data::broaden::broadened_spectrum;
use crate::data::model::{ExcitationSet, Sample, Spectrum, WavelengthGrid};
use crate::error::{Result, UvVisError};

pub const DEFAULT_TITLE: &str = "Simulated UV-Vis Absorption Spectrum";
pub const X_LABEL: &str = "Wavelength (nm)";
pub const Y_LABEL: &str = "Oscillator strength (arb. units)";

/// One curve of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub spectrum: Spectrum,
    pub color: Rgb,
}

/// A fully computed chart: shared grid plus one series per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: WavelengthGrid,
    pub series: Vec<Series>,
}

impl SpectrumChart {
    /// Largest intensity over all series (`0.0` when everything is flat).
    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .map(|s| s.spectrum.max())
            .fold(0.0, f64::max)
    }
}

/// Broaden every excitation set on a shared grid and label the curves.
///
/// `sets` and `labels` are parallel lists.
///
/// # Errors
///
/// - [`UvVisError::ConfigMismatch`] if the two lists differ in length
/// - [`UvVisError::DegenerateParameter`] for a non-positive width, an empty
///   grid or a reversed / zero-width range
pub fn plot_spectra(
    sets: &[ExcitationSet],
    labels: &[String],
    width: f64,
    xrange: (f64, f64),
    num_points: usize,
) -> Result<SpectrumChart> {
    if sets.len() != labels.len() {
        return Err(UvVisError::ConfigMismatch {
            logfiles: sets.len(),
            labels: labels.len(),
        });
    }
    validate_width(width)?;
    let grid = WavelengthGrid::linspace(xrange.0, xrange.1, num_points)?;
    log::debug!(
        "grid {:.1}..{:.1} nm, {} points, width {width} nm",
        grid.low(),
        grid.high(),
        grid.len()
    );

    let palette = generate_palette(sets.len());
    let series = sets
        .iter()
        .zip(labels)
        .zip(palette)
        .map(|((set, label), color)| Series {
            label: label.clone(),
            spectrum: broadened_spectrum(set, &grid, width),
            color,
        })
        .collect();

    Ok(SpectrumChart {
        title: DEFAULT_TITLE.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        grid,
        series,
    })
}

/// [`plot_spectra`] over labelled samples, with the parameters of `config`.
pub fn chart_for_samples(samples: &[Sample], config: &SpectrumConfig) -> Result<SpectrumChart> {
    let sets: Vec<ExcitationSet> = samples.iter().map(|s| s.excitations.clone()).collect();
    let labels: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();
    plot_spectra(&sets, &labels, config.width, config.xrange, config.num_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Excitation;
    use approx::assert_relative_eq;

    #[test]
    fn one_series_per_set_with_grid_length() {
        let sets = vec![
            vec![Excitation::from_energy(3.0, 0.5)],
            vec![],
            vec![Excitation::from_energy(2.0, 0.1), Excitation::from_energy(4.0, 0.9)],
        ];
        let labels: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let chart = plot_spectra(&sets, &labels, 10.0, (200.0, 800.0), 601).unwrap();

        assert_eq!(chart.series.len(), 3);
        for s in &chart.series {
            assert_eq!(s.spectrum.len(), 601);
        }
        assert_eq!(chart.series[1].label, "b");
        assert!(chart.series[1].spectrum.values.iter().all(|&v| v == 0.0));
        assert_eq!(chart.x_label, "Wavelength (nm)");
        assert_eq!(chart.y_label, "Oscillator strength (arb. units)");
    }

    #[test]
    fn peak_sits_on_grid_point() {
        // 1240 / 2.48 = 500 nm, which is grid point 300 of 200..800 step 1.
        let sets = vec![vec![Excitation::from_energy(2.48, 0.7)]];
        let chart = plot_spectra(&sets, &["x".to_string()], 5.0, (200.0, 800.0), 601).unwrap();
        let values = &chart.series[0].spectrum.values;
        assert_relative_eq!(values[300], 0.7, max_relative = 1e-9);
        assert_relative_eq!(chart.y_max(), 0.7, max_relative = 1e-9);
    }

    #[test]
    fn mismatched_labels_fail() {
        let sets = vec![vec![], vec![], vec![]];
        let labels = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            plot_spectra(&sets, &labels, 10.0, (200.0, 800.0), 100),
            Err(UvVisError::ConfigMismatch { logfiles: 3, labels: 2 })
        ));
    }

    #[test]
    fn zero_width_fails() {
        let err = plot_spectra(&[vec![]], &["a".to_string()], 0.0, (200.0, 800.0), 100).unwrap_err();
        assert!(matches!(err, UvVisError::DegenerateParameter { name: "width", .. }));
    }
}
