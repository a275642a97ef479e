//! Visual lookup tables: the size scale and the plasma color gradient.

use serde::{Deserialize, Serialize};

/// Ascending marker sizes, one per size quantile bucket.
pub const SIZES: [u32; 6] = [6, 9, 12, 15, 18, 21];

/// Marker size when no column drives the size channel.
pub const DEFAULT_SIZE: u32 = 9;

/// Marker color when no column drives the color channel.
pub const DEFAULT_COLOR: &str = "#31AADE";

/// Number of quantile buckets (and gradient colors) for numeric color columns.
pub const QUANTILE_COLOR_COUNT: usize = 11;

/// Plasma colormap sampled at 11 evenly spaced stops.
pub const PLASMA_STOPS: [(u8, u8, u8); 11] = [
    (0x0C, 0x07, 0x86),
    (0x40, 0x03, 0x9C),
    (0x6A, 0x00, 0xA7),
    (0x8F, 0x0D, 0xA3),
    (0xB0, 0x2A, 0x8F),
    (0xCA, 0x46, 0x78),
    (0xE0, 0x64, 0x61),
    (0xF1, 0x82, 0x4C),
    (0xFC, 0xA6, 0x35),
    (0xFC, 0xCC, 0x25),
    (0xEF, 0xF8, 0x21),
];

/// `n` colors spread evenly along the plasma gradient, dark to bright.
///
/// Intermediate colors are linearly interpolated in RGB between the stops;
/// `plasma(11)` returns the stops themselves.
pub fn plasma(n: usize) -> Vec<String> {
    match n {
        0 => Vec::new(),
        1 => vec![to_hex(PLASMA_STOPS[0])],
        _ => {
            let last = (PLASMA_STOPS.len() - 1) as f64;
            (0..n)
                .map(|i| {
                    let position = i as f64 * last / (n - 1) as f64;
                    let lo = position.floor() as usize;
                    let hi = (lo + 1).min(PLASMA_STOPS.len() - 1);
                    let frac = position - lo as f64;
                    to_hex(lerp(PLASMA_STOPS[lo], PLASMA_STOPS[hi], frac))
                })
                .collect()
        }
    }
}

fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let channel = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Ordered bucket-to-visual lookup tables, built once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingTables {
    pub sizes: Vec<u32>,
    pub default_size: u32,
    pub default_color: String,
    pub quantile_colors: Vec<String>,
}

impl EncodingTables {
    pub fn new(
        sizes: Vec<u32>,
        default_size: u32,
        default_color: impl Into<String>,
        quantile_color_count: usize,
    ) -> Self {
        Self {
            sizes,
            default_size,
            default_color: default_color.into(),
            quantile_colors: plasma(quantile_color_count),
        }
    }

    /// Size for a size bucket; codes past the table clamp to the largest size.
    pub fn size_for(&self, code: usize) -> u32 {
        self.sizes
            .get(code)
            .or_else(|| self.sizes.last())
            .copied()
            .unwrap_or(self.default_size)
    }

    /// Color for a quantile color bucket.
    pub fn quantile_color_for(&self, code: usize) -> &str {
        self.quantile_colors
            .get(code)
            .or_else(|| self.quantile_colors.last())
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    /// One color per category.
    pub fn categorical_colors(&self, categories: usize) -> Vec<String> {
        plasma(categories)
    }
}

impl Default for EncodingTables {
    fn default() -> Self {
        Self::new(
            SIZES.to_vec(),
            DEFAULT_SIZE,
            DEFAULT_COLOR,
            QUANTILE_COLOR_COUNT,
        )
    }
}
