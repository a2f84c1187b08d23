use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – broadening parameters and sample list
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Broadening");
    ui.separator();

    egui::Grid::new("params")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Width");
            ui.add(
                egui::DragValue::new(&mut state.inputs.width)
                    .speed(0.5)
                    .range(0.01..=1000.0)
                    .suffix(" nm"),
            );
            ui.end_row();

            ui.label("From");
            ui.add(egui::DragValue::new(&mut state.inputs.xmin).speed(5.0).suffix(" nm"));
            ui.end_row();

            ui.label("To");
            ui.add(egui::DragValue::new(&mut state.inputs.xmax).speed(5.0).suffix(" nm"));
            ui.end_row();

            ui.label("Points");
            ui.add(
                egui::DragValue::new(&mut state.inputs.num_points)
                    .speed(10.0)
                    .range(1..=100_000),
            );
            ui.end_row();
        });

    let dirty = state.inputs != crate::state::ParamInputs::from(&state.config);
    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(dirty, egui::Button::new("Apply")).clicked() {
            state.apply_inputs();
        }
        if ui.add_enabled(dirty, egui::Button::new("Reset")).clicked() {
            state.inputs = crate::state::ParamInputs::from(&state.config);
        }
    });

    ui.add_space(8.0);
    ui.heading("Samples");
    ui.separator();

    let Some(chart) = &state.chart else {
        ui.label("No samples loaded.");
        return;
    };

    // Collect what the rows need so state can be mutated inside the loop.
    let rows: Vec<(String, Color32, usize)> = chart
        .series
        .iter()
        .zip(&state.samples)
        .map(|(series, sample)| {
            let c = series.color;
            (series.label.clone(), Color32::from_rgb(c.0, c.1, c.2), sample.excitations.len())
        })
        .collect();

    let mut toggled = None;
    let mut removed = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, (label, color, n_lines)) in rows.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    let mut checked = state.is_visible(idx);
                    let text = RichText::new(label).color(*color).strong();
                    if ui.checkbox(&mut checked, text).changed() {
                        toggled = Some(idx);
                    }
                    ui.label(format!("({n_lines} lines)"));
                    if ui.small_button("✕").on_hover_text("Remove sample").clicked() {
                        removed = Some(idx);
                    }
                });
            }
        });

    if let Some(idx) = toggled {
        state.toggle_visible(idx);
    }
    if let Some(idx) = removed {
        state.remove_sample(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Add log…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.chart.is_some(), egui::Button::new("Export…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(chart) = &state.chart {
            let visible = (0..chart.series.len()).filter(|&i| state.is_visible(i)).count();
            ui.label(format!(
                "{} samples loaded, {} visible",
                chart.series.len(),
                visible
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Add TDDFT log files")
        .add_filter("Log files", &["log", "out", "txt"])
        .add_filter("All files", &["*"])
        .pick_files();

    if let Some(paths) = files {
        state.add_log_files(&paths);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export spectrum")
        .set_file_name("spectrum.png")
        .add_filter("PNG image", &["png"])
        .add_filter("SVG image", &["svg"])
        .add_filter("CSV table", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
