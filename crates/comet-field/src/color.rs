//! Colors for comets and stars.

use comet_core::ColorTheme;
use ratatui::style::Color;

/// Trail color for the theme at `intensity` (0.0 dim - 1.0 bright).
pub fn trail_color(theme: ColorTheme, intensity: f32) -> Color {
    let intensity = intensity.clamp(0.0, 1.0);
    hsl_to_rgb(theme.hue(), theme.saturation(), 0.12 + intensity * 0.55)
}

/// Star color, from dim slate to pale blue.
pub fn star_color(brightness: f32) -> Color {
    let b = brightness.clamp(0.0, 1.0);
    let lerp = |lo: f32, hi: f32| (lo + (hi - lo) * b) as u8;
    Color::Rgb(lerp(60.0, 170.0), lerp(60.0, 170.0), lerp(80.0, 220.0))
}

/// Convert HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = h.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(to_u8(r), to_u8(g), to_u8(b))
}
