use plotters::style::{Color, HSLColor, RGBColor};

pub const INK: RGBColor = RGBColor(20, 20, 20);
pub const MUTED: RGBColor = RGBColor(110, 110, 110);
pub const GRID: RGBColor = RGBColor(225, 225, 225);
pub const GUIDE: RGBColor = RGBColor(150, 150, 150);
pub const PAPER: RGBColor = RGBColor(255, 255, 255);

/// `count` evenly spaced hues at fixed saturation and lightness, assigned in
/// summary order.
pub fn pitch_colors(count: usize) -> Vec<RGBColor> {
    (0..count)
        .map(|index| {
            let hue = index as f64 / count.max(1) as f64;
            let (r, g, b) = HSLColor(hue, 0.65, 0.5).rgb();
            RGBColor(r, g, b)
        })
        .collect()
}
