use std::path::PathBuf;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::SpectrumChart;
use crate::error::{Result, UvVisError};

/// Something that consumes a finished chart: a file writer, a window, …
pub trait ChartSink {
    fn render(&mut self, chart: &SpectrumChart) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Image sink (plotters)
// ---------------------------------------------------------------------------

/// Writes the chart as a PNG or SVG picture, chosen by file extension.
#[derive(Debug, Clone)]
pub struct ImageSink {
    path: PathBuf,
    size: (u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Png,
    Svg,
}

impl ImageSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (1024, 768),
        }
    }

    fn format(&self) -> Result<ImageFormat> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(UvVisError::UnsupportedOutput(self.path.clone())),
        }
    }
}

impl ChartSink for ImageSink {
    fn render(&mut self, chart: &SpectrumChart) -> Result<()> {
        let render_err = |e: String| UvVisError::Render(format!("{}: {e}", self.path.display()));
        match self.format()? {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
                draw_chart(&root, chart).map_err(|e| render_err(e.to_string()))?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
                draw_chart(&root, chart).map_err(|e| render_err(e.to_string()))?;
            }
        }
        log::info!("Wrote chart to {}", self.path.display());
        Ok(())
    }
}

/// Draw caption, grid mesh, one line per series and the legend.
fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &SpectrumChart,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (mut x_left, mut x_right) = (chart.grid.low(), chart.grid.high());
    if x_left == x_right {
        x_left -= 1.0;
        x_right += 1.0;
    }
    let y_max = chart.y_max();
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d(x_left..x_right, 0.0..y_top)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    let xs = chart.grid.points();
    for series in &chart.series {
        let color = RGBColor(series.color.0, series.color.1, series.color.2);
        ctx.draw_series(LineSeries::new(
            xs.iter().copied().zip(series.spectrum.values.iter().copied()),
            color.stroke_width(2),
        ))?
        .label(series.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV sink
// ---------------------------------------------------------------------------

/// Writes the chart as a table: `wavelength_nm` followed by one column per series.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ChartSink for CsvSink {
    fn render(&mut self, chart: &SpectrumChart) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        let header = std::iter::once("wavelength_nm").chain(chart.series.iter().map(|s| s.label.as_str()));
        writer.write_record(header)?;

        for (i, x) in chart.grid.points().iter().enumerate() {
            let row = std::iter::once(x.to_string())
                .chain(chart.series.iter().map(|s| s.spectrum.values[i].to_string()));
            writer.write_record(row)?;
        }
        writer.flush()?;

        log::info!(
            "Wrote {} rows x {} series to {}",
            chart.grid.len(),
            chart.series.len(),
            self.path.display()
        );
        Ok(())
    }
}
