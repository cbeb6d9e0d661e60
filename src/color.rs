use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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

/// Fixed colours for the single-site Success / Failed slices.
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
pub const FAILED_COLOR: Color32 = Color32::from_rgb(214, 69, 65);

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct labels of one dimension (sites, booster categories)
/// to distinct colours. Labels keep their given order in the legend.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub dimension: String,
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(dimension: &str, labels: &[String]) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();

        ColorMap {
            dimension: dimension.to_string(),
            order: labels.to_vec(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label; unknown labels fall back to grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) in the order the labels were given.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|label| (label.clone(), self.color_for(label)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_map_keeps_label_order() {
        let labels = vec!["v1.0".to_string(), "FT".to_string(), "B4".to_string()];
        let map = ColorMap::new("Booster Version Category", &labels);
        let legend: Vec<String> = map.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(legend, labels);
        assert_ne!(map.color_for("FT"), map.color_for("B4"));
        assert_eq!(map.color_for("unknown"), Color32::GRAY);
    }
}
