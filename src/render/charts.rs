use std::error::Error;
use std::ops::Range;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{padded_range, DrawResult, FigureStyle};
use crate::color::Rgb;
use crate::state::ReportState;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

// ---------------------------------------------------------------------------
// Quadrant (0, 0): actual vs predicted scatter
// ---------------------------------------------------------------------------

pub(super) fn scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    state: &ReportState,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let (lo, hi) = state.dataset.value_extent().unwrap_or((0.0, 1.0));
    let range = padded_range([lo, hi]);

    let mut chart = build_chart(
        area,
        "Actual vs Predicted Prices",
        range.clone(),
        range.clone(),
        style,
    )?;
    draw_mesh(&mut chart, "Actual Price", "Predicted Price", true, style)?;

    let fill = style.colors.scatter.to_plotters().mix(0.6).filled();
    let radius = style.scatter_radius;
    chart.draw_series(
        state
            .scatter_points()
            .into_iter()
            .map(|p| Circle::new(p, radius, fill)),
    )?;

    let reference = style.colors.reference.to_plotters().stroke_width(style.line_width);
    chart
        .draw_series(dashed(vec![(lo, lo), (hi, hi)], style))?
        .label("Perfect Prediction")
        .legend(line_legend(reference, style));

    annotate(
        &chart,
        (&range, &range),
        &[format!("R² = {:.4}", state.correlation.r_squared)],
        Rgb::WHEAT,
        style,
    )?;
    draw_legend(&mut chart, SeriesLabelPosition::LowerRight, style)
}

// ---------------------------------------------------------------------------
// Quadrant (0, 1): actual and predicted over the row index
// ---------------------------------------------------------------------------

pub(super) fn time_series<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    state: &ReportState,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let (actual, predicted) = state.time_series();
    let x_range = padded_range([0.0, state.len().saturating_sub(1) as f64]);
    let y_range = padded_range(state.actual.iter().chain(&state.predicted).copied());

    let mut chart = build_chart(
        area,
        "Time Series: Actual vs Predicted",
        x_range,
        y_range,
        style,
    )?;
    draw_mesh(&mut chart, "Time Index", "Price", true, style)?;

    let r = style.marker_radius as i32;

    let actual_color = style.colors.actual.to_plotters();
    let actual_line = actual_color.stroke_width(style.line_width);
    chart
        .draw_series(LineSeries::new(actual.iter().copied(), actual_line))?
        .label("Actual")
        .legend(line_legend(actual_line, style));
    chart.draw_series(
        actual
            .iter()
            .map(|&p| Circle::new(p, style.marker_radius, actual_color.filled())),
    )?;

    let predicted_color = style.colors.predicted.to_plotters();
    let predicted_line = predicted_color.stroke_width(style.line_width);
    chart
        .draw_series(LineSeries::new(predicted.iter().copied(), predicted_line))?
        .label("Predicted")
        .legend(line_legend(predicted_line, style));
    chart.draw_series(predicted.iter().map(|&p| {
        EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], predicted_color.filled())
    }))?;

    draw_legend(&mut chart, SeriesLabelPosition::UpperLeft, style)
}

// ---------------------------------------------------------------------------
// Quadrant (1, 0): error histogram
// ---------------------------------------------------------------------------

pub(super) fn error_distribution<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    state: &ReportState,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let hist = &state.histogram;
    // The zero-error guide is always in view.
    let x_range = padded_range(hist.edges.iter().copied().chain([0.0]));
    let y_top = (hist.max_count().max(1) as f64) * 1.05;
    let y_range = 0.0..y_top;

    let mut chart = build_chart(
        area,
        "Error Distribution",
        x_range.clone(),
        y_range.clone(),
        style,
    )?;
    draw_mesh(&mut chart, "Prediction Error", "Frequency", false, style)?;

    let fill = style.colors.histogram.to_plotters().mix(0.7).filled();
    chart.draw_series(
        hist.iter_bins()
            .map(|(lo, hi, count)| Rectangle::new([(lo, 0.0), (hi, count as f64)], fill)),
    )?;
    let edge = BLACK.stroke_width((style.line_width / 4).max(1));
    chart.draw_series(
        hist.iter_bins()
            .map(|(lo, hi, count)| Rectangle::new([(lo, 0.0), (hi, count as f64)], edge)),
    )?;

    let reference = style.colors.reference.to_plotters().stroke_width(style.line_width);
    chart
        .draw_series(dashed(vec![(0.0, 0.0), (0.0, y_top)], style))?
        .label("Zero Error")
        .legend(line_legend(reference, style));

    let summary = &state.error_summary;
    annotate(
        &chart,
        (&x_range, &y_range),
        &[
            format!("Mean: {:.4}", summary.mean),
            format!("Std: {:.4}", summary.std),
        ],
        Rgb::LIGHT_BLUE,
        style,
    )?;
    draw_legend(&mut chart, SeriesLabelPosition::UpperRight, style)
}

// ---------------------------------------------------------------------------
// Quadrant (1, 1): residuals against predicted value
// ---------------------------------------------------------------------------

pub(super) fn residuals<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    state: &ReportState,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let x_range = padded_range(state.predicted.iter().copied());
    let y_range = padded_range(state.errors.iter().copied().chain([0.0]));

    let mut chart = build_chart(area, "Residual Plot", x_range.clone(), y_range, style)?;
    draw_mesh(
        &mut chart,
        "Predicted Price",
        "Residual (Actual - Predicted)",
        true,
        style,
    )?;

    let fill = style.colors.scatter.to_plotters().mix(0.6).filled();
    let radius = style.scatter_radius;
    chart.draw_series(
        state
            .residual_points()
            .into_iter()
            .map(|p| Circle::new(p, radius, fill)),
    )?;

    chart.draw_series(dashed(
        vec![(x_range.start, 0.0), (x_range.end, 0.0)],
        style,
    ))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn build_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    title: &str,
    x: Range<f64>,
    y: Range<f64>,
    style: &FigureStyle,
) -> Result<Chart<'a, DB>, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let caption = ("sans-serif", style.caption_px)
        .into_font()
        .style(FontStyle::Bold);
    let chart = ChartBuilder::on(area)
        .caption(title, caption)
        .margin(style.margin)
        .x_label_area_size(style.label_area())
        .y_label_area_size(style.label_area())
        .build_cartesian_2d(x, y)?;
    Ok(chart)
}

/// Axes, tick labels and a light grid. Histograms keep only horizontal lines.
fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    x_desc: &str,
    y_desc: &str,
    vertical_grid: bool,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(("sans-serif", style.tick_px))
        .axis_desc_style(("sans-serif", style.label_px))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(WHITE);
    if !vertical_grid {
        mesh.disable_x_mesh();
    }
    mesh.draw()?;
    Ok(())
}

fn dashed(
    points: Vec<(f64, f64)>,
    style: &FigureStyle,
) -> DashedLineSeries<std::vec::IntoIter<(f64, f64)>, u32> {
    let stroke = style.colors.reference.to_plotters().stroke_width(style.line_width);
    DashedLineSeries::new(points, style.line_width * 3, style.line_width * 2, stroke)
}

fn line_legend(
    stroke: ShapeStyle,
    style: &FigureStyle,
) -> impl Fn((i32, i32)) -> PathElement<(i32, i32)> {
    let len = style.label_px as i32;
    move |(x, y)| PathElement::new(vec![(x, y), (x + len, y)], stroke)
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    position: SeriesLabelPosition,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    chart
        .configure_series_labels()
        .position(position)
        .label_font(("sans-serif", style.tick_px))
        .legend_area_size(style.label_px as u32 + style.margin)
        .margin(style.margin)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()?;
    Ok(())
}

/// Text box anchored near the top-left corner of the plotting area.
fn annotate<DB: DrawingBackend>(
    chart: &Chart<'_, DB>,
    (x, y): (&Range<f64>, &Range<f64>),
    lines: &[String],
    background: Rgb,
    style: &FigureStyle,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let font_px = style.annotation_px;
    let pad = (font_px * 0.4) as i32;
    let line_h = (font_px * 1.3) as i32;
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = (widest as f64 * font_px * 0.6) as i32 + 2 * pad;
    let height = line_h * lines.len() as i32 + 2 * pad;

    let anchor = (
        x.start + 0.03 * (x.end - x.start),
        y.end - 0.04 * (y.end - y.start),
    );
    let area = chart.plotting_area();

    area.draw(
        &(EmptyElement::at(anchor)
            + Rectangle::new(
                [(0, 0), (width, height)],
                background.to_plotters().mix(0.5).filled(),
            )),
    )?;
    for (i, line) in lines.iter().enumerate() {
        area.draw(
            &(EmptyElement::at(anchor)
                + Text::new(
                    line.clone(),
                    (pad, pad + i as i32 * line_h),
                    ("sans-serif", font_px).into_font(),
                )),
        )?;
    }
    Ok(())
}
