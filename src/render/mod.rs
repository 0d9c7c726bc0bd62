/// Static figure: the four diagnostic charts composed into one PNG.
///
/// ```text
///   ReportState ──► charts (plotters, in-memory RGB buffer) ──► PNG (image)
/// ```
mod charts;

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::SeriesColors;
use crate::config::ReportConfig;
use crate::state::ReportState;

type DrawResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Figure style: point sizes converted to pixels
// ---------------------------------------------------------------------------

/// Pixel sizes for fonts, strokes and markers at the configured DPI.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub title_px: f64,
    pub caption_px: f64,
    pub label_px: f64,
    pub tick_px: f64,
    pub annotation_px: f64,
    pub line_width: u32,
    pub marker_radius: u32,
    pub scatter_radius: u32,
    pub margin: u32,
    pub colors: SeriesColors,
}

impl FigureStyle {
    pub fn new(config: &ReportConfig) -> Self {
        let px = |pt: f64| config.font_px(pt);
        Self {
            title_px: px(16.0),
            caption_px: px(14.0),
            label_px: px(12.0),
            tick_px: px(10.0),
            annotation_px: px(11.0),
            line_width: px(2.0).round().max(1.0) as u32,
            marker_radius: px(2.0).round().max(1.0) as u32,
            // A 50 pt² marker area gives a radius of √50 / 2 pt.
            scatter_radius: px(50f64.sqrt() / 2.0).round().max(1.0) as u32,
            margin: px(8.0).round() as u32,
            colors: SeriesColors::default(),
        }
    }

    fn label_area(&self) -> u32 {
        (self.label_px * 2.0 + self.tick_px * 3.0).round() as u32
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Render the 2×2 figure and write it to `config.output` as PNG.
pub fn render_to_file(state: &ReportState, config: &ReportConfig) -> Result<()> {
    let (width, height) = config.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, state, config).map_err(|e| anyhow!("drawing figure: {e}"))?;
        root.present()
            .map_err(|e| anyhow!("rasterising figure: {e}"))?;
    }

    log::info!(
        "rendered {width}x{height} figure for {} records",
        state.len()
    );
    save_png(buffer, (width, height), &config.output)
}

/// Draw title and the four quadrants onto any plotters backend.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    state: &ReportState,
    config: &ReportConfig,
) -> DrawResult
where
    DB::ErrorType: 'static,
{
    let style = FigureStyle::new(config);
    root.fill(&WHITE)?;

    let title_font = ("sans-serif", style.title_px)
        .into_font()
        .style(FontStyle::Bold);
    let body = root.titled(&config.title, title_font)?;

    let quadrants = body.split_evenly((2, 2));
    charts::scatter(&quadrants[0], state, &style)?;
    charts::time_series(&quadrants[1], state, &style)?;
    charts::error_distribution(&quadrants[2], state, &style)?;
    charts::residuals(&quadrants[3], state, &style)?;
    Ok(())
}

/// Encode an RGB buffer as PNG, creating the parent directory if needed.
pub fn save_png(buffer: Vec<u8>, (width, height): (u32, u32), path: &Path) -> Result<()> {
    let img = image::RgbImage::from_raw(width, height, buffer)
        .context("pixel buffer does not match figure size")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Extent of `values` padded by 5 % per side.
///
/// A zero-width extent is widened; no finite values falls back to `-1..1`.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return -1.0..1.0;
    }
    if lo == hi {
        let half = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        return (lo - half)..(hi + half);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PredictionDataset, PredictionRecord};

    fn state_of(records: Vec<PredictionRecord>) -> ReportState {
        ReportState::new(PredictionDataset::from_records(records), 30).unwrap()
    }

    /// Render at 30 DPI into `dir` and check every quadrant received ink.
    fn render_and_check(state: &ReportState, dir: &Path) {
        let config = ReportConfig {
            output: dir.join("out").join("prediction_analysis.png"),
            dpi: 30,
            show: false,
            ..ReportConfig::default()
        };
        render_to_file(state, &config).unwrap();

        let img = image::open(&config.output).unwrap().to_rgb8();
        let (w, h) = config.pixel_size();
        assert_eq!(img.dimensions(), (w, h));

        for (qx, qy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let (x0, y0) = (qx * w / 2, qy * h / 2);
            let inked = (x0..x0 + w / 2)
                .flat_map(|x| (y0..y0 + h / 2).map(move |y| (x, y)))
                .filter(|&(x, y)| img.get_pixel(x, y).0 != [255, 255, 255])
                .count();
            assert!(inked > 0, "quadrant ({qx}, {qy}) is blank");
        }
    }

    #[test]
    fn renders_all_four_quadrants_to_png() {
        let records = (0..50)
            .map(|i| {
                let actual = 100.0 + (i as f64 * 0.3).sin() * 5.0;
                PredictionRecord::new(actual, actual + (i as f64 * 0.7).cos())
            })
            .collect();
        let dir = tempfile::tempdir().unwrap();
        render_and_check(&state_of(records), dir.path());
    }

    #[test]
    fn renders_a_single_record() {
        let state = state_of(vec![PredictionRecord::new(10.0, 12.0)]);
        assert!(state.error_summary.std.is_nan());
        let dir = tempfile::tempdir().unwrap();
        render_and_check(&state, dir.path());
    }

    #[test]
    fn renders_constant_records() {
        let state = state_of(vec![PredictionRecord::new(5.0, 5.0); 3]);
        assert!(state.correlation.r_squared.is_nan());
        let dir = tempfile::tempdir().unwrap();
        render_and_check(&state, dir.path());
    }

    #[test]
    fn padded_range_adds_five_percent() {
        let r = padded_range([0.0, 10.0, 5.0]);
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn padded_range_widens_degenerate_extents() {
        assert_eq!(padded_range([0.0, 0.0]), -0.5..0.5);
        let r = padded_range([100.0]);
        assert!(r.start < 100.0 && r.end > 100.0);
        assert_eq!(padded_range([f64::NAN]), -1.0..1.0);
        assert_eq!(padded_range(std::iter::empty()), -1.0..1.0);
    }

    #[test]
    fn style_scales_with_dpi() {
        let style = FigureStyle::new(&ReportConfig::default());
        assert!((style.label_px - 50.0).abs() < 1e-9);
        assert!(style.title_px > style.caption_px);
        assert!(style.scatter_radius > style.marker_radius);
    }

    #[test]
    fn save_png_creates_parent_and_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("figure.png");
        let mut buffer = vec![255u8; 4 * 3 * 3];
        buffer[0] = 10;

        save_png(buffer, (4, 3), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 255, 255]);
    }

    #[test]
    fn save_png_rejects_mismatched_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_png(vec![0u8; 5], (4, 3), &dir.path().join("x.png")).unwrap_err();
        assert!(err.to_string().contains("pixel buffer"));
    }
}
