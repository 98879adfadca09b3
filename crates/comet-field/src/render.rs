//! Read-only rendering of a particle field.

use std::f32::consts::TAU;

use comet_core::ColorTheme;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::chars::{COMET_HEAD, STAR_CHARS, trail_char};
use crate::color::{star_color, trail_color};
use crate::particle::Particle;

/// Number of trail cells behind a comet head.
const TRAIL_LENGTH: usize = 8;

/// Stars dimmer than this are not drawn.
const STAR_CUTOFF: f32 = 0.2;

/// Paints comets and stars into a buffer.
///
/// Holds shared borrows only; drawing never touches the live set.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    comets: &'a [Particle],
    stars: &'a [Particle],
    now_ms: u64,
    theme: ColorTheme,
}

impl<'a> FieldView<'a> {
    pub fn new(comets: &'a [Particle], stars: &'a [Particle], now_ms: u64) -> Self {
        Self {
            comets,
            stars,
            now_ms,
            theme: ColorTheme::default(),
        }
    }

    pub fn theme(mut self, theme: ColorTheme) -> Self {
        self.theme = theme;
        self
    }
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for star in self.stars {
            render_star(star, self.now_ms, area, buf);
        }
        for comet in self.comets {
            render_comet(comet, self.now_ms, self.theme, area, buf);
        }
    }
}

/// Map a percent position to fractional cell coordinates inside `area`.
fn to_cells(x_pct: f32, y_pct: f32, area: Rect) -> (f32, f32) {
    let x = x_pct / 100.0 * area.width.saturating_sub(1) as f32;
    let y = y_pct / 100.0 * area.height.saturating_sub(1) as f32;
    (x, y)
}

/// Write `ch` at fractional cell coordinates, ignoring anything outside `area`.
fn put(buf: &mut Buffer, area: Rect, x: f32, y: f32, ch: char, color: Color) {
    let (x, y) = (x.round(), y.round());
    if x < 0.0 || y < 0.0 || x >= area.width as f32 || y >= area.height as f32 {
        return;
    }
    let pos = (area.x + x as u16, area.y + y as u16);
    if let Some(cell) = buf.cell_mut(pos) {
        cell.set_char(ch).set_fg(color);
    }
}

fn render_comet(comet: &Particle, now_ms: u64, theme: ColorTheme, area: Rect, buf: &mut Buffer) {
    let Some(phase) = comet.phase_at(now_ms) else {
        return;
    };
    let (ox, oy) = to_cells(comet.origin_x, comet.origin_y, area);

    // Down and to the left, far enough to clear the area on any aspect ratio.
    // Cells are about twice as tall as wide, so the slope is at most 1:2.
    let trail = TRAIL_LENGTH as f32;
    let travel_x = -((area.width as f32).max(2.0 * area.height as f32) + 2.0 * trail);
    let travel_y = area.height as f32 + trail;
    let slope = travel_y / -travel_x;
    let head_x = ox + travel_x * phase;
    let head_y = oy + travel_y * phase;
    let fade = 1.0 - phase * 0.6;

    for i in (1..=TRAIL_LENGTH).rev() {
        let intensity = (1.0 - i as f32 / (TRAIL_LENGTH + 1) as f32) * fade;
        let x = head_x + i as f32;
        let y = head_y - i as f32 * slope;
        put(buf, area, x, y, trail_char(intensity), trail_color(theme, intensity));
    }
    put(buf, area, head_x, head_y, COMET_HEAD, theme.color());
}

fn render_star(star: &Particle, now_ms: u64, area: Rect, buf: &mut Buffer) {
    let brightness = star_brightness(star, now_ms);
    if brightness < STAR_CUTOFF {
        return;
    }
    let (x, y) = to_cells(star.origin_x, star.origin_y, area);
    let ch = STAR_CHARS[star.id as usize % STAR_CHARS.len()];
    put(buf, area, x, y, ch, star_color(brightness));
}

/// Twinkle brightness in `[0, 1]`.
fn star_brightness(star: &Particle, now_ms: u64) -> f32 {
    let period = star.duration_secs.max(0.1);
    let t = now_ms as f32 / 1000.0 + star.delay_secs;
    0.5 + 0.5 * (t / period * TAU).sin()
}
