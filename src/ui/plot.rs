use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spectrum plot (central panel)
// ---------------------------------------------------------------------------

/// Render the broadened spectra in the central panel.
pub fn spectrum_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(chart) if !chart.series.is_empty() => chart,
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Add a TDDFT log to view its spectrum  (File → Add log…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title.as_str());
    });

    let y_label = if state.minmax_scaling {
        "Normalised intensity"
    } else {
        chart.y_label.as_str()
    };

    Plot::new("spectrum_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(y_label)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, series) in chart.series.iter().enumerate() {
                if !state.is_visible(idx) {
                    continue;
                }

                let y_values: Vec<f64> = if state.minmax_scaling {
                    series.spectrum.min_max_scaled()
                } else {
                    series.spectrum.values.clone()
                };

                let points: PlotPoints = chart
                    .grid
                    .points()
                    .iter()
                    .zip(y_values.iter())
                    .map(|(&xi, &yi)| [xi, yi])
                    .collect();

                let color = Color32::from_rgb(series.color.0, series.color.1, series.color.2);
                let line = Line::new(points)
                    .name(&series.label)
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
