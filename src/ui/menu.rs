/// Language selection screen, shown once before the session starts.
///
/// ↑/↓ move the cursor, 1-5 jump straight to a language, Enter or Space
/// confirms. Quitting is handled by the caller (Esc / Ctrl+C).

use crossterm::style::Color;

use crate::domain::language::Language;
use super::scene::{language_color, BACKGROUND};
use super::surface::{Align, Font, Surface};

const TITLE_COLOR: Color = Color::Rgb { r: 50, g: 205, b: 50 };
const TEXT_COLOR: Color = Color::Rgb { r: 50, g: 205, b: 50 };
const DIM: Color = Color::DarkGrey;
const LINE_PX: f32 = 20.0;

pub struct Menu {
    cursor: usize,
}

impl Menu {
    pub fn new(preselect: Option<Language>) -> Self {
        let cursor = preselect
            .and_then(|l| Language::ALL.iter().position(|&x| x == l))
            .unwrap_or(0);
        Menu { cursor }
    }

    pub fn selected(&self) -> Language {
        Language::ALL[self.cursor]
    }

    /// Returns the chosen language once the player confirms.
    pub fn handle_key(&mut self, key: &str) -> Option<Language> {
        let count = Language::ALL.len();
        match key {
            "ArrowUp" | "k" => {
                self.cursor = (self.cursor + count - 1) % count;
                None
            }
            "ArrowDown" | "j" | "Tab" => {
                self.cursor = (self.cursor + 1) % count;
                None
            }
            "Enter" | " " => Some(self.selected()),
            _ => {
                let n = key.parse::<usize>().ok().filter(|n| (1..=count).contains(n))?;
                self.cursor = n - 1;
                Some(self.selected())
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, _height) = surface.size();
        let center = width / 2.0;

        surface.clear(BACKGROUND);
        surface.reset_transform();

        surface.set_font(Font::Hud);
        surface.draw_text("Code Invaders", center, 2.0 * LINE_PX, TITLE_COLOR, Align::Center);

        surface.set_font(Font::Alien);
        surface.draw_text(
            "Type falling language keywords to destroy them.",
            center, 4.0 * LINE_PX, TEXT_COLOR, Align::Center,
        );
        surface.draw_text("Select a language to begin:", center, 5.0 * LINE_PX, TEXT_COLOR, Align::Center);

        for (i, lang) in Language::ALL.iter().enumerate() {
            let y = (7 + i) as f32 * LINE_PX;
            let (marker, color) = if i == self.cursor {
                ("▸", language_color(*lang))
            } else {
                (" ", DIM)
            };
            let line = format!("{marker} {}  {:<10}", i + 1, lang.label());
            surface.draw_text(&line, center, y, color, Align::Center);
        }

        surface.draw_text(
            "↑↓ choose   ENTER start   ESC quit",
            center, 14.0 * LINE_PX, DIM, Align::Center,
        );
    }
}
