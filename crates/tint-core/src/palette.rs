//! Automatic colors for operations without an explicit color
//!
//! A palette maps `(index, total)` to a color by sampling a perceptually
//! uniform colormap at evenly spaced positions, so that N unlabeled operations
//! get N well separated and reproducible colors.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Source of colors for operations without an explicit color
pub trait AutoColor {
    /// Color of the operation at `index` in a history of `total` operations
    fn auto_color(&self, index: usize, total: usize) -> Color;
}

impl<F> AutoColor for F
where
    F: Fn(usize, usize) -> Color,
{
    fn auto_color(&self, index: usize, total: usize) -> Color {
        self(index, total)
    }
}

/// Perceptually uniform colormaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
}

// Nine evenly spaced control points per colormap.
const VIRIDIS: [u32; 9] = [
    0x440154, 0x472c7a, 0x3b518b, 0x2c718e, 0x21908d, 0x27ad81, 0x5cc863, 0xaadc32, 0xfde725,
];
const PLASMA: [u32; 9] = [
    0x0d0887, 0x4c02a1, 0x7e03a8, 0xa92395, 0xcc4778, 0xe56b5d, 0xf89441, 0xfdc328, 0xf0f921,
];
const INFERNO: [u32; 9] = [
    0x000004, 0x1f0c48, 0x550f6d, 0x88226a, 0xba3655, 0xe35933, 0xf98e09, 0xf9cb35, 0xfcffa4,
];
const MAGMA: [u32; 9] = [
    0x000004, 0x1c1044, 0x4f127b, 0x812581, 0xb5367a, 0xe55064, 0xfb8761, 0xfec287, 0xfcfdbf,
];
const CIVIDIS: [u32; 9] = [
    0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8678, 0xa59c74, 0xc3b369, 0xfee838,
];

impl Palette {
    fn control_points(self) -> &'static [u32; 9] {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Plasma => &PLASMA,
            Self::Inferno => &INFERNO,
            Self::Magma => &MAGMA,
            Self::Cividis => &CIVIDIS,
        }
    }

    /// Evaluate the colormap at `t` in `0.0..=1.0`
    pub fn at(self, t: f32) -> Color {
        let points = self.control_points();
        let segments = (points.len() - 1) as f32;
        let scaled = t.clamp(0.0, 1.0) * segments;
        let i = (scaled.floor() as usize).min(points.len() - 2);
        let local = scaled - i as f32;
        Color::from_hex(points[i]).lerp(Color::from_hex(points[i + 1]), local)
    }

    /// Sample `index` out of `total` evenly spaced colors
    ///
    /// The first sample sits at the start of the colormap and the last one at
    /// its end.
    pub fn sample(self, index: usize, total: usize) -> Color {
        if total <= 1 {
            return self.at(0.0);
        }
        self.at(index.min(total - 1) as f32 / (total - 1) as f32)
    }

    /// All `total` samples in order
    pub fn build(self, total: usize) -> Vec<Color> {
        (0..total).map(|i| self.sample(i, total)).collect()
    }
}

impl AutoColor for Palette {
    fn auto_color(&self, index: usize, total: usize) -> Color {
        self.sample(index, total)
    }
}
