//! Decorative starfield for the header band.
//!
//! Stars are scattered once at startup and twinkle with the tick counter.
//! Nothing here reads conversation state.

use crate::theme::Theme;
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Number of stars scattered across the header.
pub const STAR_COUNT: usize = 50;

/// Twinkle frames, dim to bright.
const FRAMES: [char; 4] = ['·', '∙', '•', '✦'];

/// A single star, positioned as a fraction of the area.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    x: f32,
    y: f32,
    phase: usize,
}

/// Randomly placed stars.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatter stars using the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    /// Scatter stars using the given RNG.
    pub fn with_rng<R: Rng>(rng: &mut R) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                phase: rng.random_range(0..FRAMES.len()),
            })
            .collect();
        Self { stars }
    }

    /// Widget drawing the stars at the given animation tick.
    pub fn widget<'a>(&'a self, tick: usize, theme: &'a Theme) -> StarfieldWidget<'a> {
        StarfieldWidget {
            field: self,
            tick,
            theme,
        }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a [`Starfield`] into empty cells of an area.
pub struct StarfieldWidget<'a> {
    field: &'a Starfield,
    tick: usize,
    theme: &'a Theme,
}

impl Widget for StarfieldWidget<'_> {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default().fg(self.theme.star).bg(self.theme.base);

        for star in &self.field.stars {
            let x = area.x + ((star.x * f32::from(area.width)) as u16).min(area.width - 1);
            let y = area.y + ((star.y * f32::from(area.height)) as u16).min(area.height - 1);
            let frame = FRAMES[(star.phase + self.tick) % FRAMES.len()];
            if let Some(cell) = buf.cell_mut((x, y)) {
                if cell.symbol() == " " {
                    cell.set_char(frame).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> Starfield {
        Starfield::with_rng(&mut StdRng::seed_from_u64(7))
    }

    fn star_cells(buf: &Buffer) -> usize {
        buf.content()
            .iter()
            .filter(|c| FRAMES.iter().any(|f| c.symbol() == f.to_string()))
            .count()
    }

    #[test]
    fn test_starfield_has_stars() {
        let field = seeded();
        assert_eq!(field.stars.len(), STAR_COUNT);
        assert!(field.stars.iter().all(|s| (0.0..1.0).contains(&s.x)));
    }

    #[test]
    fn test_starfield_renders_inside_area() {
        let field = seeded();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        field.widget(0, &theme).render(area, &mut buf);
        assert!(star_cells(&buf) > 0);
    }

    #[test]
    fn test_starfield_does_not_overwrite_text() {
        let field = seeded();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "XXXXXXXXXX", Style::default());
        field.widget(3, &theme).render(area, &mut buf);
        assert_eq!(star_cells(&buf), 0);
    }

    #[test]
    fn test_starfield_twinkles_with_tick() {
        let field = seeded();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut first = Buffer::empty(area);
        let mut second = Buffer::empty(area);
        field.widget(0, &theme).render(area, &mut first);
        field.widget(1, &theme).render(area, &mut second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_starfield_zero_area() {
        let field = seeded();
        let theme = Theme::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        field.widget(0, &theme).render(Rect::new(0, 0, 0, 0), &mut buf);
    }
}
