use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Species;

/// Dashboard theme colours, one per species in [`Species::ALL`] order.
const THEME_HEX: [&str; 3] = ["#003f5c", "#d45087", "#2f4b7c"];

/// Opacity of overlaid histogram bars.
pub const OVERLAY_OPACITY: f32 = 0.6;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb`.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Same colour at the given opacity.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

// ---------------------------------------------------------------------------
// Color mapping: species → Color32
// ---------------------------------------------------------------------------

/// Maps each species to its theme colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Species, Color32>,
}

impl Default for ColorMap {
    /// Theme colours, falling back to a generated hue if a theme entry does
    /// not parse.
    fn default() -> Self {
        let generated = generate_palette(Species::ALL.len());
        let mapping = Species::ALL
            .into_iter()
            .zip(THEME_HEX)
            .zip(generated)
            .map(|((sp, hex), fallback)| (sp, parse_hex(hex).unwrap_or(fallback)))
            .collect();
        ColorMap { mapping }
    }
}

impl ColorMap {
    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
