use serde::{Serialize, Serializer};

/// Color bucket assigned by an item's rank among all items, darkest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ColorBand {
    Darkest,
    Darker,
    Dark,
    Light,
    Lighter,
    Lightest,
}

impl ColorBand {
    pub const ALL: [ColorBand; 6] = [
        ColorBand::Darkest,
        ColorBand::Darker,
        ColorBand::Dark,
        ColorBand::Light,
        ColorBand::Lighter,
        ColorBand::Lightest,
    ];

    /// Band for the item at `rank` (0 = heaviest) out of `count` items.
    ///
    /// `thresholds` are the ascending percentile upper bounds of the first five bands.
    pub fn for_rank(rank: usize, count: usize, thresholds: &[f64; 5]) -> Self {
        if count == 0 {
            return ColorBand::Darkest;
        }
        let percentile = rank as f64 / count as f64;
        thresholds
            .iter()
            .position(|&t| percentile < t)
            .map(|i| Self::ALL[i])
            .unwrap_or(ColorBand::Lightest)
    }

    /// Fill color of a box in this band.
    pub fn fill(self) -> AppColor {
        let value = match self {
            ColorBand::Darkest => 0.38,
            ColorBand::Darker => 0.48,
            ColorBand::Dark => 0.58,
            ColorBand::Light => 0.70,
            ColorBand::Lighter => 0.82,
            ColorBand::Lightest => 0.92,
        };
        // saturation eases off as the band lightens
        let saturation = 0.78 - 0.08 * self as u8 as f32;
        hsv_to_rgb(BASE_HUE, saturation, value)
    }

    /// Label color that stays readable on `fill()`.
    pub fn text(self) -> AppColor {
        if self.fill().luma() < LIGHT_TEXT_LUMA {
            AppColor::new(1.0, 1.0, 1.0)
        } else {
            AppColor::new(0.10, 0.12, 0.16)
        }
    }
}

/// Fills darker than this get white labels.
const LIGHT_TEXT_LUMA: f32 = 0.45;

/// Hue shared by all bands (teal-blue).
const BASE_HUE: f32 = 200.0 / 360.0;

/// RGBA color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// `#rrggbb` for the renderer.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    /// Perceived brightness (Rec. 601 luma).
    pub fn luma(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

impl Serialize for AppColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b, a: 1.0 }
}
