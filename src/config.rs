use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// Fixed settings for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Prediction table to read.
    pub input: PathBuf,
    /// Where the composed PNG is written.
    pub output: PathBuf,
    /// Figure size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: u32,
    pub histogram_bins: usize,
    pub title: String,
    /// Open the interactive viewer after saving.
    pub show: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("output/predictions.csv"),
            output: PathBuf::from("output/prediction_analysis.png"),
            figure_size: (15.0, 10.0),
            dpi: 300,
            histogram_bins: 30,
            title: "Stock Price Prediction Results".to_string(),
            show: true,
        }
    }
}

impl ReportConfig {
    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = self.dpi as f64;
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// Convert a font size in points to pixels at the configured DPI.
    pub fn font_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_figure_is_4500_by_3000() {
        assert_eq!(ReportConfig::default().pixel_size(), (4500, 3000));
    }

    #[test]
    fn font_size_scales_with_dpi() {
        let mut cfg = ReportConfig::default();
        cfg.dpi = 72;
        assert_eq!(cfg.font_px(12.0), 12.0);
        cfg.dpi = 144;
        assert_eq!(cfg.font_px(12.0), 24.0);
    }
}
