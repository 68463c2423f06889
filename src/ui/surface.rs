/// Drawing surface abstraction.
///
/// The simulation only needs `TextMeasure` (spawn placement, resize
/// clamping). The scene needs the full `Surface`. Coordinates are virtual
/// pixels with the origin at the top-left.

use crossterm::style::Color;

pub trait TextMeasure {
    /// Rendered width of `text` in the game font, in pixels.
    fn measure_text(&self, text: &str) -> f32;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Font {
    /// Falling words.
    Alien,
    /// Typed buffer and score.
    Hud,
}

/// Horizontal anchor for `draw_text`; `y` is always the top of the line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    Start,
    Center,
    End,
}

pub trait Surface: TextMeasure {
    /// Current size in pixels (width, height).
    fn size(&self) -> (f32, f32);
    fn clear(&mut self, color: Color);
    fn set_font(&mut self, font: Font);
    /// Translate the origin to `(x, y)` and rotate by `angle` radians.
    fn set_transform(&mut self, x: f32, y: f32, angle: f32);
    fn reset_transform(&mut self);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color, align: Align);
}
