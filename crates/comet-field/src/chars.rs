//! Glyphs used when painting the field.

/// Characters used for ambient stars.
pub const STAR_CHARS: &[char] = &['.', '*', '+', '·', '✦', '✧'];

/// Comet head.
pub const COMET_HEAD: char = '✦';

/// Comet trail, brightest first.
pub const TRAIL_CHARS: &[char] = &['╱', '/', '·', '.'];

/// Pick a trail glyph for an intensity in `[0, 1]`.
pub fn trail_char(intensity: f32) -> char {
    let steps = TRAIL_CHARS.len();
    let idx = ((1.0 - intensity.clamp(0.0, 1.0)) * steps as f32) as usize;
    TRAIL_CHARS[idx.min(steps - 1)]
}
