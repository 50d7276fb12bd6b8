use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Categorical mapping: income group → Color32
// ---------------------------------------------------------------------------

/// Maps each income group to a distinct colour for the distribution chart.
#[derive(Debug, Clone)]
pub struct GroupColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl GroupColors {
    /// Build a colour per group from the sorted distinct group list.
    pub fn new(groups: &[String]) -> Self {
        let palette = generate_palette(groups.len());
        let mapping = groups
            .iter()
            .cloned()
            .zip(palette)
            .collect::<BTreeMap<String, Color32>>();
        GroupColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, group: &str) -> Color32 {
        self.mapping
            .get(group)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Sequential scale: year value → Color32 (map shading)
// ---------------------------------------------------------------------------

/// Linear dark-violet to yellow scale over a fitted value range. Countries
/// with no value render in the null colour.
#[derive(Debug, Clone, Copy)]
pub struct ValueScale {
    min: f64,
    max: f64,
}

impl ValueScale {
    /// Fit the scale to the non-null values present; `None` when there are no
    /// values at all.
    pub fn fit(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Some(ValueScale { min, max })
        } else {
            None
        }
    }

    pub fn null_color() -> Color32 {
        Color32::from_gray(70)
    }

    /// Colour for a value, clamped into the fitted range.
    pub fn color_for(&self, value: f64) -> Color32 {
        let t = if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0) as f32
        } else {
            // degenerate range: everything gets the top colour
            1.0
        };
        // hue 270° (violet) → 50° (yellow), brightening with the value
        let hue = 270.0 - t * 220.0;
        let lightness = 0.22 + t * 0.38;
        hsl_to_color32(Hsl::new(hue, 0.85, lightness))
    }

    /// A handful of (value, colour) stops for the map legend, low to high.
    pub fn legend_stops(&self, n: usize) -> Vec<(f64, Color32)> {
        if n < 2 {
            return vec![(self.max, self.color_for(self.max))];
        }
        (0..n)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (n - 1) as f64;
                (v, self.color_for(v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for i in 1..p.len() {
            assert_ne!(p[0], p[i]);
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn scale_fits_and_clamps() {
        let scale = ValueScale::fit([10.0, 70000.0, 500.0].into_iter()).unwrap();
        assert_eq!(scale.color_for(5.0), scale.color_for(10.0));
        assert_eq!(scale.color_for(1e9), scale.color_for(70000.0));
        assert_ne!(scale.color_for(10.0), scale.color_for(70000.0));
    }

    #[test]
    fn empty_scale_is_none() {
        assert!(ValueScale::fit(std::iter::empty()).is_none());
    }

    #[test]
    fn legend_spans_the_range() {
        let scale = ValueScale::fit([0.0, 100.0].into_iter()).unwrap();
        let stops = scale.legend_stops(5);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0].0, 0.0);
        assert_eq!(stops[4].0, 100.0);
    }
}
