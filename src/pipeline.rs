use crate::chart::{chart_for_samples, SpectrumChart};
use crate::config::SpectrumConfig;
use crate::data::extract::extract_file;
use crate::data::model::Sample;
use crate::error::Result;

/// Validate `config`, then extract every log file in order.
///
/// Validation happens before the first file is opened. Extraction stops at
/// the first file that fails.
pub fn load_samples(config: &SpectrumConfig) -> Result<Vec<Sample>> {
    config.validate()?;
    config
        .logfiles
        .iter()
        .zip(&config.labels)
        .map(|(path, label)| {
            let excitations = extract_file(path)?;
            Ok(Sample::new(label.clone(), excitations).with_source(path))
        })
        .collect()
}

/// Full run: extract, broaden and assemble the chart.
pub fn run(config: &SpectrumConfig) -> Result<SpectrumChart> {
    let samples = load_samples(config)?;
    chart_for_samples(&samples, config)
}
