use eframe::egui::{Color32, Ui, Vec2};
use egui_plot::{
    Bar, BarChart, Corner, HLine, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points,
    VLine,
};

use crate::color::SeriesColors;
use crate::state::ReportState;

// ---------------------------------------------------------------------------
// Interactive versions of the four report charts
// ---------------------------------------------------------------------------

fn translucent(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha)
}

/// Actual vs predicted scatter with the perfect-prediction diagonal.
pub fn scatter_plot(ui: &mut Ui, state: &ReportState, size: Vec2) {
    let colors = SeriesColors::default();
    let (lo, hi) = state.dataset.value_extent().unwrap_or((0.0, 1.0));

    Plot::new("scatter_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("Actual Price")
        .y_axis_label("Predicted Price")
        .legend(Legend::default().position(Corner::RightBottom))
        .show(ui, |plot_ui| {
            let points: PlotPoints = state
                .scatter_points()
                .into_iter()
                .map(|(a, p)| [a, p])
                .collect();
            plot_ui.points(
                Points::new(points)
                    .radius(3.5)
                    .color(translucent(colors.scatter.to_color32(), 0.6)),
            );

            plot_ui.line(
                Line::new(vec![[lo, lo], [hi, hi]])
                    .name("Perfect Prediction")
                    .color(colors.reference.to_color32())
                    .style(LineStyle::dashed_loose())
                    .width(2.0),
            );
        });
}

/// Actual and predicted prices over the row index.
pub fn time_series_plot(ui: &mut Ui, state: &ReportState, size: Vec2) {
    let colors = SeriesColors::default();
    let (actual, predicted) = state.time_series();

    Plot::new("time_series_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("Time Index")
        .y_axis_label("Price")
        .legend(Legend::default().position(Corner::LeftTop))
        .show(ui, |plot_ui| {
            let series = [
                ("Actual", &actual, colors.actual, MarkerShape::Circle),
                ("Predicted", &predicted, colors.predicted, MarkerShape::Square),
            ];
            for (name, values, color, shape) in series {
                let line: PlotPoints = values.iter().map(|&(x, y)| [x, y]).collect();
                let markers: PlotPoints = values.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(line)
                        .name(name)
                        .color(color.to_color32())
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(markers)
                        .name(name)
                        .color(color.to_color32())
                        .shape(shape)
                        .filled(true)
                        .radius(2.5),
                );
            }
        });
}

/// Histogram of prediction errors with a zero-error guide.
pub fn error_histogram_plot(ui: &mut Ui, state: &ReportState, size: Vec2) {
    let colors = SeriesColors::default();

    let bars: Vec<Bar> = state
        .histogram
        .iter_bins()
        .map(|(lo, hi, count)| {
            Bar::new((lo + hi) / 2.0, count as f64)
                .width(hi - lo)
                .stroke((1.0, Color32::BLACK))
        })
        .collect();

    Plot::new("error_histogram_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("Prediction Error")
        .y_axis_label("Frequency")
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars).color(translucent(colors.histogram.to_color32(), 0.7)),
            );
            plot_ui.vline(
                VLine::new(0.0)
                    .name("Zero Error")
                    .color(colors.reference.to_color32())
                    .style(LineStyle::dashed_loose())
                    .width(2.0),
            );
        });
}

/// Residuals against predicted value with a zero line.
pub fn residual_plot(ui: &mut Ui, state: &ReportState, size: Vec2) {
    let colors = SeriesColors::default();

    Plot::new("residual_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("Predicted Price")
        .y_axis_label("Residual (Actual - Predicted)")
        .show(ui, |plot_ui| {
            let points: PlotPoints = state
                .residual_points()
                .into_iter()
                .map(|(p, e)| [p, e])
                .collect();
            plot_ui.points(
                Points::new(points)
                    .radius(3.5)
                    .color(translucent(colors.scatter.to_color32(), 0.6)),
            );
            plot_ui.hline(
                HLine::new(0.0)
                    .color(colors.reference.to_color32())
                    .style(LineStyle::dashed_loose())
                    .width(2.0),
            );
        });
}
