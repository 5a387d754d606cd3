//! Card geometry shared by every output surface.
//!
//! Positions are expressed as fractions of the square page, origin at the
//! bottom-left corner, so each surface only has to scale them to its own units.

use crate::error::BingoError;
use crate::sampler::Card;

pub const DEFAULT_GRID_SIZE: usize = 5;
pub const DEFAULT_PHYSICAL_SIZE_IN: f32 = 8.0;

/// Blank border around the grid, as a fraction of the page side.
const MARGIN: f32 = 0.0625;
/// Height of the category and value baselines within a cell, from its bottom edge.
const CATEGORY_ROW: f32 = 0.85;
const VALUE_ROW: f32 = 0.70;

/// Shape of every card in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardConfig {
    /// Cells per side of the square grid.
    pub grid_size: usize,
    /// Side of the square page, in inches.
    pub physical_size_in: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            physical_size_in: DEFAULT_PHYSICAL_SIZE_IN,
        }
    }
}

impl CardConfig {
    /// Items needed to fill one card.
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Page side in PDF points.
    pub fn side_points(&self) -> f32 {
        self.physical_size_in * 72.0
    }
}

/// Font size in points for a cell string, picked from its length in characters.
pub fn font_size_for(text: &str) -> u8 {
    match text.chars().count() {
        0..=13 => 10,
        14..=16 => 9,
        17..=19 => 8,
        20..=22 => 7,
        23..=25 => 6,
        _ => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Whether a line is part of the outer frame or an interior divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Border,
    Divider,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub kind: LineKind,
}

/// A string centered on `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText<'a> {
    pub text: &'a str,
    pub center: (f32, f32),
    pub font_size: u8,
    pub weight: FontWeight,
}

/// Anything a laid-out card can be painted onto.
pub trait CardSurface {
    fn draw_line(&mut self, line: &GridLine);
    fn draw_text(&mut self, text: &PlacedText<'_>);
}

/// Fully positioned content of one card.
#[derive(Debug, Clone)]
pub struct CardLayout<'a> {
    pub lines: Vec<GridLine>,
    pub texts: Vec<PlacedText<'a>>,
}

impl<'a> CardLayout<'a> {
    /// Place a card's items on the grid.
    ///
    /// Item `j + i * n` goes to the cell in column `i` (left to right) and row
    /// `j` (bottom to top); its category sits above its value.
    pub fn new(config: &CardConfig, card: &Card<'a>) -> Result<Self, BingoError> {
        let n = config.grid_size;
        if card.len() != config.cell_count() {
            return Err(BingoError::CardSizeMismatch {
                expected: config.cell_count(),
                actual: card.len(),
            });
        }

        let mut lines = Vec::with_capacity(2 * (n + 1));
        for k in 0..=n {
            let kind = if k == 0 || k == n {
                LineKind::Border
            } else {
                LineKind::Divider
            };
            let at = k as f32;
            lines.push(GridLine {
                from: to_page(n, at, 0.0),
                to: to_page(n, at, n as f32),
                kind,
            });
            lines.push(GridLine {
                from: to_page(n, 0.0, at),
                to: to_page(n, n as f32, at),
                kind,
            });
        }

        let mut texts = Vec::with_capacity(2 * card.len());
        for i in 0..n {
            for j in 0..n {
                let item = card.items()[j + i * n];
                let x = i as f32 + 0.5;
                texts.push(PlacedText {
                    text: item.category(),
                    center: to_page(n, x, j as f32 + CATEGORY_ROW),
                    font_size: font_size_for(item.category()),
                    weight: FontWeight::Bold,
                });
                texts.push(PlacedText {
                    text: item.value(),
                    center: to_page(n, x, j as f32 + VALUE_ROW),
                    font_size: font_size_for(item.value()),
                    weight: FontWeight::Regular,
                });
            }
        }

        Ok(Self { lines, texts })
    }

    pub fn paint<S: CardSurface + ?Sized>(&self, surface: &mut S) {
        for line in &self.lines {
            surface.draw_line(line);
        }
        for text in &self.texts {
            surface.draw_text(text);
        }
    }
}

/// Map grid units (0..=n on both axes) to page fractions.
fn to_page(n: usize, x: f32, y: f32) -> (f32, f32) {
    let span = 1.0 - 2.0 * MARGIN;
    let n = n as f32;
    (MARGIN + x / n * span, MARGIN + y / n * span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_size_steps_down_with_length() {
        let cases = [
            (0, 10),
            (13, 10),
            (14, 9),
            (16, 9),
            (17, 8),
            (19, 8),
            (20, 7),
            (22, 7),
            (23, 6),
            (25, 6),
            (26, 5),
            (80, 5),
        ];
        for (len, size) in cases {
            assert_eq!(font_size_for(&"x".repeat(len)), size, "length {len}");
        }
    }

    #[test]
    fn font_size_counts_characters_not_bytes() {
        assert_eq!(font_size_for("ñññññññññññññ"), 10);
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|k| Item::new(format!("C{k}"), format!("v{k}")).unwrap())
            .collect()
    }

    #[test]
    fn short_and_long_categories_on_one_card() {
        let mut owned = items(25);
        owned[0] = Item::new("Short cat!", "v").unwrap();
        owned[1] = Item::new("A very long category name here", "v").unwrap();
        let card = Card::new(owned.iter().collect());
        let layout = CardLayout::new(&CardConfig::default(), &card).unwrap();
        let short = layout.texts.iter().find(|t| t.text == "Short cat!").unwrap();
        let long = layout
            .texts
            .iter()
            .find(|t| t.text.starts_with("A very long"))
            .unwrap();
        assert_eq!(short.font_size, 10);
        assert_eq!(long.font_size, 5);
    }

    #[test]
    fn items_fill_columns_bottom_to_top() {
        let owned = items(9);
        let card = Card::new(owned.iter().collect());
        let config = CardConfig {
            grid_size: 3,
            ..CardConfig::default()
        };
        let layout = CardLayout::new(&config, &card).unwrap();
        assert_eq!(layout.texts.len(), 18);

        let center = |label: &str| layout.texts.iter().find(|t| t.text == label).unwrap().center;
        let (x0, y0) = center("C0");
        let (x1, y1) = center("C1");
        let (x3, y3) = center("C3");
        assert_eq!(x0, x1);
        assert!(y1 > y0);
        assert!(x3 > x0);
        assert_eq!(y3, y0);
    }

    #[test]
    fn category_is_bold_and_above_value() {
        let owned = items(4);
        let card = Card::new(owned.iter().collect());
        let config = CardConfig {
            grid_size: 2,
            ..CardConfig::default()
        };
        let layout = CardLayout::new(&config, &card).unwrap();
        let category = &layout.texts[0];
        let value = &layout.texts[1];
        assert_eq!(category.weight, FontWeight::Bold);
        assert_eq!(value.weight, FontWeight::Regular);
        assert_eq!(category.center.0, value.center.0);
        assert!(category.center.1 > value.center.1);
    }

    #[test]
    fn grid_has_border_and_dividers() {
        let owned = items(25);
        let card = Card::new(owned.iter().collect());
        let layout = CardLayout::new(&CardConfig::default(), &card).unwrap();
        let borders = layout
            .lines
            .iter()
            .filter(|l| l.kind == LineKind::Border)
            .count();
        assert_eq!(layout.lines.len(), 12);
        assert_eq!(borders, 4);
        for line in &layout.lines {
            for v in [line.from.0, line.from.1, line.to.0, line.to.1] {
                assert!((MARGIN - 1e-6..=1.0 - MARGIN + 1e-6).contains(&v));
            }
        }
    }

    #[test]
    fn wrong_item_count_is_rejected() {
        let owned = items(24);
        let card = Card::new(owned.iter().collect());
        let err = CardLayout::new(&CardConfig::default(), &card).unwrap_err();
        assert!(matches!(
            err,
            BingoError::CardSizeMismatch {
                expected: 25,
                actual: 24
            }
        ));
    }
}
