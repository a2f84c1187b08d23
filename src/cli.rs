use std::path::PathBuf;

use clap::Parser;
use tddft_uvvis::config::SpectrumConfig;

/// Simulated UV-Vis spectra from TDDFT log files.
///
/// With no output file the spectra are shown in a window; `--output` and
/// `--csv` write files instead (add `--show` to get both).
#[derive(Parser, Debug)]
#[command(name = "tddft-uvvis", version)]
pub struct Cli {
    /// TDDFT log files, one curve each
    #[arg(value_name = "LOGFILE")]
    pub logfiles: Vec<PathBuf>,

    /// Legend label, once per log file (defaults to the file names)
    #[arg(short = 'l', long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// JSON configuration file; command line values take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Gaussian broadening width in nm
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Lower end of the wavelength range in nm
    #[arg(long)]
    pub xmin: Option<f64>,

    /// Upper end of the wavelength range in nm
    #[arg(long)]
    pub xmax: Option<f64>,

    /// Number of wavelength grid points
    #[arg(short = 'n', long)]
    pub num_points: Option<usize>,

    /// Write the chart to a .png or .svg file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the broadened spectra to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Open the viewer window even when writing files
    #[arg(long)]
    pub show: bool,
}

impl Cli {
    /// Merge the optional config file with the command line.
    ///
    /// An empty label list means "use the file names"; a partial one is left
    /// as is so that validation reports the mismatch.
    pub fn to_config(&self) -> tddft_uvvis::Result<SpectrumConfig> {
        let mut config = match &self.config {
            Some(path) => SpectrumConfig::from_json_file(path)?,
            None => SpectrumConfig::default(),
        };

        if !self.logfiles.is_empty() {
            config.logfiles = self.logfiles.clone();
            config.labels = self.labels.clone();
        } else if !self.labels.is_empty() {
            config.labels = self.labels.clone();
        }
        config.fill_default_labels();

        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(lo) = self.xmin {
            config.xrange.0 = lo;
        }
        if let Some(hi) = self.xmax {
            config.xrange.1 = hi;
        }
        if let Some(n) = self.num_points {
            config.num_points = n;
        }
        Ok(config)
    }

    pub fn wants_window(&self) -> bool {
        self.show || (self.output.is_none() && self.csv.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tddft-uvvis").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn files_and_labels() {
        let cli = parse(&["a.log", "b.log", "-l", "A", "--label", "B", "-w", "15", "--xmin", "250"]);
        let cfg = cli.to_config().unwrap();
        assert_eq!(cfg.logfiles, vec![PathBuf::from("a.log"), PathBuf::from("b.log")]);
        assert_eq!(cfg.labels, vec!["A", "B"]);
        assert_eq!(cfg.width, 15.0);
        assert_eq!(cfg.xrange, (250.0, 800.0));
        assert!(cli.wants_window());
    }

    #[test]
    fn missing_labels_use_file_stems() {
        let cfg = parse(&["runs/s1.log", "s2.out"]).to_config().unwrap();
        assert_eq!(cfg.labels, vec!["s1", "s2"]);
    }

    #[test]
    fn partial_labels_are_kept_for_validation() {
        let cfg = parse(&["a.log", "b.log", "c.log", "-l", "A", "-l", "B"]).to_config().unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn command_line_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"logfiles": ["x.log"], "labels": ["X"], "width": 4.0, "num_points": 50}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cfg = parse(&["-c", path.as_str(), "-n", "200"]).to_config().unwrap();
        assert_eq!(cfg.logfiles, vec![PathBuf::from("x.log")]);
        assert_eq!(cfg.labels, vec!["X"]);
        assert_eq!(cfg.width, 4.0);
        assert_eq!(cfg.num_points, 200);
    }

    #[test]
    fn file_outputs_skip_the_window_unless_asked() {
        assert!(!parse(&["a.log", "-o", "out.png"]).wants_window());
        assert!(!parse(&["a.log", "--csv", "out.csv"]).wants_window());
        assert!(parse(&["a.log", "-o", "out.svg", "--show"]).wants_window());
    }
}
