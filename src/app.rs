use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct UvVisApp {
    pub state: AppState,
}

impl eframe::App for UvVisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: parameters and samples ----
        egui::SidePanel::left("sample_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectrum_plot(ui, &self.state);
        });
    }
}

/// Open the viewer and block until the window is closed.
pub fn show_window(state: AppState) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TDDFT UV-Vis Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(UvVisApp { state }))),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}
