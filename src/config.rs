use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UvVisError};

pub const DEFAULT_WIDTH_NM: f64 = 10.0;
pub const DEFAULT_XRANGE_NM: (f64, f64) = (200.0, 800.0);
pub const DEFAULT_NUM_POINTS: usize = 1000;

// ---------------------------------------------------------------------------
// SpectrumConfig – everything one run needs
// ---------------------------------------------------------------------------

/// Inputs and plotting parameters for one run.
///
/// JSON layout:
///
/// ```json
/// {
///   "logfiles": ["a.log", "b.log"],
///   "labels": ["A", "B"],
///   "width": 10.0,
///   "xrange": [200.0, 800.0],
///   "num_points": 1000
/// }
/// ```
///
/// Every field except `logfiles` may be omitted. Without `labels` each file
/// is labelled by its stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    pub logfiles: Vec<PathBuf>,
    pub labels: Vec<String>,
    /// Gaussian standard deviation in nm.
    pub width: f64,
    /// `(low, high)` in nm.
    pub xrange: (f64, f64),
    pub num_points: usize,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            logfiles: Vec::new(),
            labels: Vec::new(),
            width: DEFAULT_WIDTH_NM,
            xrange: DEFAULT_XRANGE_NM,
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

impl SpectrumConfig {
    /// Read a JSON configuration file, filling in missing labels.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| UvVisError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&text).map_err(|source| UvVisError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.fill_default_labels();
        log::debug!("Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.labels.len() != self.logfiles.len() {
            return Err(UvVisError::ConfigMismatch {
                logfiles: self.logfiles.len(),
                labels: self.labels.len(),
            });
        }
        self.validate_plot_params()
    }

    /// Check width, range and grid size only.
    pub fn validate_plot_params(&self) -> Result<()> {
        validate_width(self.width)?;
        let (low, high) = self.xrange;
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
        if self.num_points == 0 {
            return Err(UvVisError::degenerate(
                "num_points",
                "at least one grid point is required",
            ));
        }
        Ok(())
    }

    /// Use each file's stem as its label when no labels were given.
    pub fn fill_default_labels(&mut self) {
        if self.labels.is_empty() {
            self.labels = self.logfiles.iter().map(|p| label_from_path(p)).collect();
        }
    }
}

pub fn validate_width(width: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(UvVisError::degenerate(
            "width",
            format!("broadening width must be a positive number of nm, got {width}"),
        ));
    }
    Ok(())
}

/// Legend label derived from a file name: `runs/pbe0.log` → `pbe0`.
pub fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(files: usize, labels: usize) -> SpectrumConfig {
        SpectrumConfig {
            logfiles: (0..files).map(|i| PathBuf::from(format!("f{i}.log"))).collect(),
            labels: (0..labels).map(|i| format!("L{i}")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(config(2, 2).validate().is_ok());
        assert!(SpectrumConfig::default().validate().is_ok());
    }

    #[test]
    fn mismatch_is_reported_with_counts() {
        match config(3, 2).validate() {
            Err(UvVisError::ConfigMismatch { logfiles, labels }) => {
                assert_eq!((logfiles, labels), (3, 2));
            }
            other => panic!("expected ConfigMismatch, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        let cases = [
            ("width", SpectrumConfig { width: 0.0, ..config(1, 1) }),
            ("width", SpectrumConfig { width: -3.0, ..config(1, 1) }),
            ("width", SpectrumConfig { width: f64::NAN, ..config(1, 1) }),
            ("xrange", SpectrumConfig { xrange: (600.0, 200.0), ..config(1, 1) }),
            ("xrange", SpectrumConfig { xrange: (400.0, 400.0), ..config(1, 1) }),
            ("num_points", SpectrumConfig { num_points: 0, ..config(1, 1) }),
        ];
        for (expected, cfg) in cases {
            match cfg.validate() {
                Err(UvVisError::DegenerateParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("{expected}: expected DegenerateParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn json_with_partial_fields() {
        let cfg: SpectrumConfig =
            serde_json::from_str(r#"{"logfiles": ["a.log"], "labels": ["A"], "xrange": [250.0, 650.0]}"#)
                .unwrap();
        assert_eq!(cfg.xrange, (250.0, 650.0));
        assert_eq!(cfg.width, DEFAULT_WIDTH_NM);
        assert_eq!(cfg.num_points, DEFAULT_NUM_POINTS);
    }

    #[test]
    fn labels_default_to_file_stems() {
        let mut cfg = SpectrumConfig {
            logfiles: vec![PathBuf::from("runs/pbe0.log"), PathBuf::from("cam.out")],
            ..Default::default()
        };
        cfg.fill_default_labels();
        assert_eq!(cfg.labels, vec!["pbe0", "cam"]);
    }

    #[test]
    fn json_file_without_labels_uses_file_stems() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"logfiles": ["runs/pbe0.log", "cam.out"]}"#).unwrap();

        let cfg = SpectrumConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.labels, vec!["pbe0", "cam"]);
        assert!(cfg.validate().is_ok());
    }
}
