//! Rendering for the progress component.

use super::model::Model;
use crate::canvas::{Canvas, FillStyle, Rect, TerminalCanvas};

impl Model {
    /// Paints the filled portion, `[0, rendered_width) × [0, height)`, in the
    /// progress colour at the current opacity.
    ///
    /// The rectangle never extends past `layout_width`, so canvases that do
    /// not clip stay inside the widget.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::canvas::{Canvas, FillStyle, Rect};
    /// use animated_progress::progress::new;
    ///
    /// struct Last(Option<Rect>);
    ///
    /// impl Canvas for Last {
    ///     fn fill_rect(&mut self, rect: Rect, _fill: &FillStyle) {
    ///         self.0 = Some(rect);
    ///     }
    /// }
    ///
    /// let mut bar = new(&[]);
    /// bar.set_layout_width(20);
    /// let _ = bar.set_progress(50);
    /// bar.advance(bar.duration());
    ///
    /// let mut canvas = Last(None);
    /// bar.draw(&mut canvas);
    /// assert_eq!(canvas.0, Some(Rect::new(0, 0, 10, 1)));
    /// ```
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        let right = self.rendered_width.min(self.layout_width);
        let rect = Rect::new(0, 0, right, self.height);
        let fill = FillStyle {
            color: self.progress_color.clone(),
            opacity: self.fade.opacity(),
        };
        canvas.fill_rect(rect, &fill);
    }

    /// Renders the bar as `height` lines of `layout_width` cells.
    ///
    /// Empty before the first layout pass. Cells past the rendered width
    /// show the fill character in the background colour.
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    /// use lipgloss_extras::lipgloss;
    ///
    /// let mut bar = new(&[]);
    /// assert_eq!(bar.view(), "");
    ///
    /// bar.set_layout_width(12);
    /// assert_eq!(lipgloss::width_visible(&bar.view()), 12);
    /// ```
    pub fn view(&self) -> String {
        if self.layout_width <= 0 {
            return String::new();
        }

        let mut canvas = TerminalCanvas::new(
            self.layout_width as usize,
            self.height.max(1) as usize,
            self.fill_char,
            &self.background_color,
        );
        self.draw(&mut canvas);
        canvas.render()
    }
}
