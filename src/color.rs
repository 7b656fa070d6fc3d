use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

// ---------------------------------------------------------------------------
// Species palette
// ---------------------------------------------------------------------------

const SATURATION: f32 = 0.75;
const LIGHTNESS: f32 = 0.55;

/// `n` colours with hues spread evenly around the wheel.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let rgb = Srgb::<f32>::from_color(Hsl::new(i as f32 * step, SATURATION, LIGHTNESS))
                .into_format::<u8>();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: species label → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per category so a species keeps its colour while the
/// selection changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours in the given label order.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a String>) -> Self {
        let labels: Vec<&String> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(label, color)| ((*label).clone(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_and_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert!(generate_palette(0).is_empty());
        // Hue 0 starts the wheel at red.
        assert!(p[0].r() > p[0].g() && p[0].r() > p[0].b());
    }

    #[test]
    fn unknown_label_is_gray() {
        let labels = vec!["Adelie".to_string(), "Gentoo".to_string()];
        let cm = ColorMap::new(&labels);
        assert_ne!(cm.color_for("Adelie"), cm.color_for("Gentoo"));
        assert_eq!(cm.color_for("Emperor"), Color32::GRAY);
    }
}
