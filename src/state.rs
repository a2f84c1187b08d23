use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tddft_uvvis::chart::sink::{ChartSink, CsvSink, ImageSink};
use tddft_uvvis::chart::{chart_for_samples, SpectrumChart};
use tddft_uvvis::config::{label_from_path, SpectrumConfig};
use tddft_uvvis::data::extract::extract_file;
use tddft_uvvis::data::model::Sample;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Editable copies of the plot parameters, applied together.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInputs {
    pub width: f64,
    pub xmin: f64,
    pub xmax: f64,
    pub num_points: usize,
}

impl From<&SpectrumConfig> for ParamInputs {
    fn from(config: &SpectrumConfig) -> Self {
        Self {
            width: config.width,
            xmin: config.xrange.0,
            xmax: config.xrange.1,
            num_points: config.num_points,
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Plot parameters currently in effect.
    pub config: SpectrumConfig,

    /// Loaded samples, in legend order.
    pub samples: Vec<Sample>,

    /// Chart computed from `samples` and `config`.
    pub chart: Option<SpectrumChart>,

    /// Indices of series hidden from the plot.
    pub hidden: BTreeSet<usize>,

    /// Show every series rescaled to [0, 1].
    pub minmax_scaling: bool,

    /// Values being edited in the side panel.
    pub inputs: ParamInputs,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: SpectrumConfig, samples: Vec<Sample>) -> Self {
        let mut state = Self {
            inputs: ParamInputs::from(&config),
            config,
            samples,
            chart: None,
            hidden: BTreeSet::new(),
            minmax_scaling: false,
            status_message: None,
        };
        state.rebuild_chart();
        state
    }

    /// Recompute the chart from the current samples and parameters.
    pub fn rebuild_chart(&mut self) {
        match chart_for_samples(&self.samples, &self.config) {
            Ok(chart) => {
                self.chart = Some(chart);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build chart: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.chart = None;
            }
        }
    }

    /// Validate the edited parameters and apply them, or keep the old ones.
    pub fn apply_inputs(&mut self) {
        let candidate = SpectrumConfig {
            width: self.inputs.width,
            xrange: (self.inputs.xmin, self.inputs.xmax),
            num_points: self.inputs.num_points,
            ..self.config.clone()
        };
        match candidate.validate_plot_params() {
            Ok(()) => {
                log::debug!(
                    "width {} nm, range {:?}, {} points",
                    candidate.width,
                    candidate.xrange,
                    candidate.num_points
                );
                self.config = candidate;
                self.rebuild_chart();
            }
            Err(e) => {
                log::warn!("Rejected plot parameters: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Extract a log file and append it as a new sample.
    pub fn add_log_file(&mut self, path: &Path) -> Result<()> {
        let excitations =
            extract_file(path).with_context(|| format!("loading {}", path.display()))?;
        let label = label_from_path(path);
        log::info!("Added sample {label:?} with {} excitation(s)", excitations.len());

        self.config.logfiles.push(path.to_path_buf());
        self.config.labels.push(label.clone());
        self.samples.push(Sample::new(label, excitations).with_source(path));
        self.rebuild_chart();
        Ok(())
    }

    /// Add several log files; the last failure, if any, stays in the status line.
    pub fn add_log_files(&mut self, paths: &[PathBuf]) {
        let mut failure = None;
        for path in paths {
            if let Err(e) = self.add_log_file(path) {
                log::error!("Failed to load file: {e:#}");
                failure = Some(format!("Error: {e:#}"));
            }
        }
        if failure.is_some() {
            self.status_message = failure;
        }
    }

    /// Remove a sample and its series.
    pub fn remove_sample(&mut self, idx: usize) {
        if idx >= self.samples.len() {
            return;
        }
        self.samples.remove(idx);
        if idx < self.config.logfiles.len() {
            self.config.logfiles.remove(idx);
        }
        if idx < self.config.labels.len() {
            self.config.labels.remove(idx);
        }
        // Hidden indices above the removed one shift down by one.
        self.hidden = self
            .hidden
            .iter()
            .filter(|&&h| h != idx)
            .map(|&h| if h > idx { h - 1 } else { h })
            .collect();
        self.rebuild_chart();
    }

    pub fn is_visible(&self, idx: usize) -> bool {
        !self.hidden.contains(&idx)
    }

    pub fn toggle_visible(&mut self, idx: usize) {
        if !self.hidden.remove(&idx) {
            self.hidden.insert(idx);
        }
    }

    /// Write the current chart; `.csv` gives a table, `.png` / `.svg` a picture.
    pub fn export(&self, path: &Path) -> Result<()> {
        let chart = self.chart.as_ref().context("no chart to export")?;
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            CsvSink::new(path).render(chart)?;
        } else {
            ImageSink::new(path).render(chart)?;
        }
        Ok(())
    }
}
