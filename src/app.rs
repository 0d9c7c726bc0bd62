use std::path::PathBuf;

use eframe::egui;

use crate::config::ReportConfig;
use crate::state::ReportState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Read-only viewer for an already rendered report.
pub struct PredictionViewerApp {
    pub state: ReportState,
    /// Where the static figure was written, shown in the summary bar.
    pub output: PathBuf,
}

impl PredictionViewerApp {
    pub fn new(state: ReportState, output: PathBuf) -> Self {
        Self { state, output }
    }
}

impl eframe::App for PredictionViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: summary ----
        egui::TopBottomPanel::top("summary_bar").show(ctx, |ui| {
            panels::summary_bar(ui, &self.state, &self.output);
        });

        // ---- Central panel: 2×2 charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::quadrant_grid(ui, &self.state);
        });
    }
}

/// Open the viewer window. Blocks until the window is closed.
pub fn run_viewer(state: ReportState, config: &ReportConfig) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([1500.0, 1000.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let app = PredictionViewerApp::new(state, config.output.clone());
    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
