//! Vector PDF output for laid-out cards.

mod metrics;
mod writer;

pub use metrics::text_width;
pub use writer::{PdfPage, encode_win_ansi};

use crate::layout::{CardSurface, GridLine, LineKind, PlacedText};

/// Distance from the visual center of a line of text down to its baseline, in em.
const BASELINE_DROP: f32 = 0.36;

/// Paints a [`CardLayout`](crate::layout::CardLayout) onto a [`PdfPage`].
pub struct PdfSurface {
    page: PdfPage,
}

impl PdfSurface {
    pub fn new(side_points: f32, title: &str) -> Self {
        Self {
            page: PdfPage::new(side_points, title),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.page.finish()
    }

    fn scale(&self, at: (f32, f32)) -> (f32, f32) {
        (at.0 * self.page.side(), at.1 * self.page.side())
    }
}

impl CardSurface for PdfSurface {
    fn draw_line(&mut self, line: &GridLine) {
        let (gray, width) = match line.kind {
            LineKind::Border => (0.0, 1.0),
            LineKind::Divider => (0.69, 0.8),
        };
        let from = self.scale(line.from);
        let to = self.scale(line.to);
        self.page.line(from, to, gray, width);
    }

    fn draw_text(&mut self, text: &PlacedText<'_>) {
        let size = f32::from(text.font_size);
        let encoded = encode_win_ansi(text.text);
        let width = text_width(&encoded, size, text.weight);
        let (cx, cy) = self.scale(text.center);
        self.page.text(
            &encoded,
            (cx - width / 2.0, cy - BASELINE_DROP * size),
            size,
            text.weight,
        );
    }
}
