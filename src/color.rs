use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Backend-neutral colour
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour convertible to both egui and plotters colour types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const WHEAT: Rgb = Rgb(245, 222, 179);
    pub const LIGHT_BLUE: Rgb = Rgb(173, 216, 230);

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// `hue_offset` rotates the wheel, in degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours shared by the PNG and the viewer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    pub actual: Rgb,
    pub predicted: Rgb,
    pub scatter: Rgb,
    pub histogram: Rgb,
    /// Perfect-prediction and zero-error guides.
    pub reference: Rgb,
}

impl Default for SeriesColors {
    fn default() -> Self {
        // Start near blue so the first two series read blue / orange.
        let palette = generate_palette(2, 210.0);
        Self {
            actual: palette[0],
            predicted: palette[1],
            scatter: palette[0],
            histogram: palette[0],
            reference: Rgb::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length_and_distinct_entries() {
        let p = generate_palette(4, 0.0);
        assert_eq!(p.len(), 4);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0, 0.0).is_empty());
    }

    #[test]
    fn series_colours_distinguish_actual_from_predicted() {
        let c = SeriesColors::default();
        assert_ne!(c.actual, c.predicted);
        assert_eq!(c.reference, Rgb::RED);
    }

    #[test]
    fn conversions_keep_channels() {
        let c = Rgb(1, 2, 3);
        assert_eq!(c.to_color32(), Color32::from_rgb(1, 2, 3));
        let RGBColor(r, g, b) = c.to_plotters();
        assert_eq!((r, g, b), (1, 2, 3));
    }
}
