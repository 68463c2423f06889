/// Scene composition: draws one frame of a session onto any `Surface`.

use crossterm::style::Color;

use crate::domain::language::Language;
use crate::sim::session::Session;
use super::surface::{Align, Font, Surface};

pub const BACKGROUND: Color = Color::Black;
pub const FLASH: Color = Color::White;
const HUD: Color = Color::White;

/// Line height of the HUD font in pixels.
const HUD_LINE_PX: f32 = 20.0;

pub fn language_color(lang: Language) -> Color {
    match lang {
        Language::Cpp => Color::Rgb { r: 0x33, g: 0x99, b: 0xFF },
        Language::CSharp => Color::Rgb { r: 238, g: 130, b: 238 },   // violet
        Language::Java => Color::Rgb { r: 50, g: 205, b: 50 },       // limegreen
        Language::Python => Color::Rgb { r: 0x4B, g: 0x8B, b: 0xBE },
        Language::Javascript => Color::Rgb { r: 0xF7, g: 0xDF, b: 0x1E },
    }
}

pub fn draw<S: Surface + ?Sized>(session: &Session, now: f64, surface: &mut S) {
    let width = session.viewport.width;
    let height = session.viewport.height;
    let margin = session.cfg.margin_px;

    surface.clear(BACKGROUND);

    // ── Aliens ──
    surface.set_font(Font::Alien);
    let lang_color = language_color(session.language);
    for a in session.aliens.iter() {
        let color = if a.is_flashing(now) { FLASH } else { lang_color };
        surface.set_transform(a.x, a.y, a.angle);
        surface.draw_text(&a.code, 0.0, 0.0, color, Align::Start);
        surface.reset_transform();
    }

    // ── HUD ──
    surface.set_font(Font::Hud);
    let typed = format!("Typed: {}", session.input.as_str());
    let typed_y = height - session.cfg.miss_threshold_px - HUD_LINE_PX;
    surface.draw_text(&typed, width / 2.0, typed_y, HUD, Align::Center);

    let score = format!("Score: {}/{}", session.score.matched, session.score.spawned);
    surface.draw_text(&score, width - margin, margin, HUD, Align::End);
}
