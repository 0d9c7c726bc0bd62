use std::path::Path;

use eframe::egui::{self, RichText, Ui, Vec2};

use crate::state::ReportState;
use crate::ui::plot;

/// Height reserved above each plot for its title and annotation.
const HEADER_HEIGHT: f32 = 40.0;

// ---------------------------------------------------------------------------
// Central panel – 2×2 chart grid
// ---------------------------------------------------------------------------

/// Render the four charts in a 2×2 grid filling the available space.
pub fn quadrant_grid(ui: &mut Ui, state: &ReportState) {
    let spacing = ui.spacing().item_spacing;
    let available = ui.available_size();
    let cell = egui::vec2(
        ((available.x - spacing.x) / 2.0).max(0.0),
        ((available.y - spacing.y) / 2.0).max(0.0),
    );

    let r_squared = format!("R² = {:.4}", state.correlation.r_squared);
    let error_stats = format!(
        "Mean: {:.4}   Std: {:.4}",
        state.error_summary.mean, state.error_summary.std
    );

    ui.horizontal(|ui: &mut Ui| {
        quadrant(ui, cell, "Actual vs Predicted Prices", Some(&r_squared), |ui, size| {
            plot::scatter_plot(ui, state, size)
        });
        quadrant(ui, cell, "Time Series: Actual vs Predicted", None, |ui, size| {
            plot::time_series_plot(ui, state, size)
        });
    });
    ui.horizontal(|ui: &mut Ui| {
        quadrant(ui, cell, "Error Distribution", Some(&error_stats), |ui, size| {
            plot::error_histogram_plot(ui, state, size)
        });
        quadrant(ui, cell, "Residual Plot", None, |ui, size| {
            plot::residual_plot(ui, state, size)
        });
    });
}

fn quadrant(
    ui: &mut Ui,
    cell: Vec2,
    title: &str,
    note: Option<&str>,
    add_plot: impl FnOnce(&mut Ui, Vec2),
) {
    ui.allocate_ui(cell, |ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.set_width(cell.x);
            ui.label(RichText::new(title).strong().size(16.0));
            ui.label(RichText::new(note.unwrap_or("")).monospace());
            let plot_size = egui::vec2(cell.x, (cell.y - HEADER_HEIGHT).max(50.0));
            add_plot(ui, plot_size);
        });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the summary strip above the grid.
pub fn summary_bar(ui: &mut Ui, state: &ReportState, output: &Path) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} records", state.len()));
        ui.separator();
        ui.label(format!(
            "correlation {:.4}, R² {:.4}",
            state.correlation.correlation, state.correlation.r_squared
        ));
        ui.separator();
        ui.label(format!(
            "error mean {:.4}, std {:.4}",
            state.error_summary.mean, state.error_summary.std
        ));
        ui.separator();
        ui.label(RichText::new(format!("saved to {}", output.display())).weak());
    });
}
