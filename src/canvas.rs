//! Drawing surface abstraction.
//!
//! The progress widget only ever paints one thing: a solid rectangle
//! anchored at the left edge. [`Canvas`] is the seam between that and the
//! host's rendering; [`TerminalCanvas`] is the implementation used by
//! `view()`, which turns cells into lipgloss-styled lines.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

// Number of colour stops between the background and the fill colour used
// to approximate partial opacity in a terminal.
const OPACITY_STEPS: usize = 16;

/// An axis-aligned rectangle. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// First column.
    pub left: i32,
    /// First row.
    pub top: i32,
    /// One past the last column.
    pub right: i32,
    /// One past the last row.
    pub bottom: i32,
}

impl Rect {
    /// Builds a rectangle from its edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent, never negative.
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    /// Vertical extent, never negative.
    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    /// True when the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Paint used for a fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    /// Hex (`#RRGGBB`) or named colour.
    pub color: String,
    /// Alpha in `[0, 1]`.
    pub opacity: f64,
}

/// Something the widget can paint onto.
pub trait Canvas {
    /// Fills `rect` with `fill`. Parts outside the surface are ignored.
    fn fill_rect(&mut self, rect: Rect, fill: &FillStyle);
}

/// A grid of terminal cells rendered with lipgloss.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    width: usize,
    fill_char: char,
    background: String,
    rows: Vec<Vec<Option<lipgloss::Color>>>,
}

impl TerminalCanvas {
    /// A blank surface of `width × height` cells.
    ///
    /// `background` is the colour partial opacity blends towards.
    pub fn new(width: usize, height: usize, fill_char: char, background: &str) -> Self {
        Self {
            width,
            fill_char,
            background: background.to_string(),
            rows: vec![vec![None; width]; height],
        }
    }

    /// Number of painted cells in `row`.
    pub fn painted(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .map_or(0, |cells| cells.iter().filter(|c| c.is_some()).count())
    }

    /// Renders the surface, one line per row. Unpainted cells are spaces.
    pub fn render(&self) -> String {
        let blank = " ".to_string();
        let glyph = self.fill_char.to_string();
        self.rows
            .iter()
            .map(|cells| {
                let mut line = String::with_capacity(self.width);
                for cell in cells {
                    match cell {
                        Some(color) => {
                            let styled = Style::new().foreground(color.clone()).render(&glyph);
                            line.push_str(&styled);
                        }
                        None => line.push_str(&blank),
                    }
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn resolve(&self, fill: &FillStyle) -> Option<lipgloss::Color> {
        if fill.opacity <= 0.0 {
            return None;
        }
        let color = lipgloss::Color::from(fill.color.as_str());
        if fill.opacity >= 1.0 {
            return Some(color);
        }

        let ramp = lipgloss::blending::blend_1d(
            OPACITY_STEPS,
            vec![lipgloss::Color::from(self.background.as_str()), color.clone()],
        );
        let idx = ((OPACITY_STEPS - 1) as f64 * fill.opacity).round() as usize;
        Some(ramp.get(idx).cloned().unwrap_or(color))
    }
}

impl Canvas for TerminalCanvas {
    fn fill_rect(&mut self, rect: Rect, fill: &FillStyle) {
        if rect.is_empty() {
            return;
        }
        let Some(color) = self.resolve(fill) else {
            return;
        };

        let clamp = |v: i32, max: usize| (v.max(0) as usize).min(max);
        let (left, right) = (clamp(rect.left, self.width), clamp(rect.right, self.width));
        let (top, bottom) = (
            clamp(rect.top, self.rows.len()),
            clamp(rect.bottom, self.rows.len()),
        );

        for row in &mut self.rows[top..bottom] {
            for cell in &mut row[left..right] {
                *cell = Some(color.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(opacity: f64) -> FillStyle {
        FillStyle {
            color: "#FF0000".to_string(),
            opacity,
        }
    }

    #[test]
    fn test_rect_extent() {
        let rect = Rect::new(0, 0, 12, 2);
        assert_eq!(rect.width(), 12);
        assert_eq!(rect.height(), 2);
        assert!(!rect.is_empty());
        assert!(Rect::new(5, 0, 3, 1).is_empty());
    }

    #[test]
    fn test_fill_is_clipped_to_surface() {
        let mut canvas = TerminalCanvas::new(10, 2, '█', "#000000");
        canvas.fill_rect(Rect::new(-4, -1, 25, 9), &solid(1.0));
        assert_eq!(canvas.painted(0), 10);
        assert_eq!(canvas.painted(1), 10);
    }

    #[test]
    fn test_render_has_one_line_per_row() {
        let mut canvas = TerminalCanvas::new(8, 3, '█', "#000000");
        canvas.fill_rect(Rect::new(0, 0, 3, 3), &solid(1.0));

        let out = canvas.render();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let clean = lipgloss::strip_ansi(line);
            assert_eq!(clean.chars().filter(|&c| c == '█').count(), 3);
            assert_eq!(lipgloss::width_visible(line), 8);
        }
    }

    #[test]
    fn test_transparent_fill_paints_nothing() {
        let mut canvas = TerminalCanvas::new(6, 1, '█', "#000000");
        canvas.fill_rect(Rect::new(0, 0, 6, 1), &solid(0.0));
        assert_eq!(canvas.painted(0), 0);
        assert_eq!(lipgloss::strip_ansi(&canvas.render()), "      ");
    }

    #[test]
    fn test_partial_opacity_still_paints() {
        let mut canvas = TerminalCanvas::new(4, 1, '█', "#000000");
        canvas.fill_rect(Rect::new(0, 0, 4, 1), &solid(0.5));
        assert_eq!(canvas.painted(0), 4);
    }
}
