//! Core library for generating printable get-to-know-you bingo cards.
//!
//! A run parses a delimited table into an [`ItemPool`], draws a card's worth
//! of items per card with a [`Sampler`] and writes each card with a
//! [`CardRenderer`].

mod error;
mod items;
mod labels;
mod layout;
mod pdf;
mod preview;
mod render;
mod sampler;

pub use error::BingoError;
pub use items::{Item, ItemPool, ParseOptions};
pub use labels::{CardLabel, load_labels, parse_labels};
pub use layout::{
    CardConfig, CardLayout, CardSurface, DEFAULT_GRID_SIZE, DEFAULT_PHYSICAL_SIZE_IN, FontWeight,
    GridLine, LineKind, PlacedText, font_size_for,
};
pub use pdf::PdfSurface;
pub use preview::{ImageSurface, PreviewOptions};
pub use render::{CardRenderer, RenderOptions, RenderedCard};
pub use sampler::{Card, Sampler};

use std::path::PathBuf;

/// How the cards of a run are counted and named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardNaming {
    /// `bingo_card_001.pdf`, `bingo_card_002.pdf`, ...
    Numbered(usize),
    /// `bingo_card<label>.pdf` for each label, in order.
    Labeled(Vec<CardLabel>),
}

impl CardNaming {
    pub fn card_count(&self) -> usize {
        match self {
            CardNaming::Numbered(count) => *count,
            CardNaming::Labeled(labels) => labels.len(),
        }
    }

    /// File names for every card, in generation order. Names are produced on demand.
    pub fn file_names(&self) -> Box<dyn Iterator<Item = PathBuf> + '_> {
        match self {
            CardNaming::Numbered(count) => Box::new(
                (1..=*count).map(|idx| PathBuf::from(format!("bingo_card_{:03}.pdf", idx))),
            ),
            CardNaming::Labeled(labels) => Box::new(
                labels
                    .iter()
                    .map(|label| PathBuf::from(format!("bingo_card{}.pdf", label))),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbered_names_are_zero_padded() {
        let names: Vec<PathBuf> = CardNaming::Numbered(3).file_names().collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("bingo_card_001.pdf"),
                PathBuf::from("bingo_card_002.pdf"),
                PathBuf::from("bingo_card_003.pdf"),
            ]
        );
        assert_eq!(
            CardNaming::Numbered(1000).file_names().nth(999),
            Some(PathBuf::from("bingo_card_1000.pdf"))
        );
    }

    #[test]
    fn labeled_names_use_the_normalized_label() {
        let naming = CardNaming::Labeled(parse_labels("Alice\nSt. Louis, MO\n"));
        assert_eq!(naming.card_count(), 2);
        assert_eq!(
            naming.file_names().collect::<Vec<_>>(),
            vec![
                PathBuf::from("bingo_card_Alice.pdf"),
                PathBuf::from("bingo_card_St_Louis_MO.pdf"),
            ]
        );
    }

    #[test]
    fn huge_counts_name_cards_lazily() {
        let naming = CardNaming::Numbered(usize::MAX);
        assert_eq!(naming.card_count(), usize::MAX);
        let mut names = naming.file_names();
        assert_eq!(names.next(), Some(PathBuf::from("bingo_card_001.pdf")));
        assert_eq!(names.next(), Some(PathBuf::from("bingo_card_002.pdf")));
    }
}
