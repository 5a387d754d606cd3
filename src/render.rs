use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::layout::{CardConfig, CardLayout};
use crate::pdf::PdfSurface;
use crate::preview::{ImageSurface, PreviewOptions};
use crate::sampler::Card;

/// Output options beyond the card shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Also write a PNG preview next to each PDF.
    pub preview: Option<PreviewOptions>,
}

/// Files written for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub pdf: PathBuf,
    pub preview: Option<PathBuf>,
}

/// Turns sampled cards into documents on disk.
#[derive(Debug, Clone, Copy)]
pub struct CardRenderer {
    config: CardConfig,
    options: RenderOptions,
}

impl CardRenderer {
    pub fn new(config: CardConfig, options: RenderOptions) -> Self {
        Self { config, options }
    }

    /// Write `card` as a single-page PDF at `path`, replacing any existing file.
    ///
    /// The page is built entirely in memory and only touches disk once complete,
    /// so a layout failure leaves nothing behind.
    pub fn render(&self, card: &Card<'_>, path: &Path) -> Result<RenderedCard> {
        let layout = CardLayout::new(&self.config, card)?;

        let bytes = {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "bingo card".to_string());
            let mut surface = PdfSurface::new(self.config.side_points(), &title);
            layout.paint(&mut surface);
            surface.into_bytes()
        };
        fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote card");

        let preview = match &self.options.preview {
            Some(options) => {
                let target = path.with_extension("png");
                let image = {
                    let mut surface = ImageSurface::new(&self.config, options);
                    layout.paint(&mut surface);
                    surface.into_image()
                };
                image
                    .save(&target)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                debug!(path = %target.display(), "wrote preview");
                Some(target)
            }
            None => None,
        };

        Ok(RenderedCard {
            pdf: path.to_path_buf(),
            preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BingoError;
    use crate::items::Item;
    use pretty_assertions::assert_eq;

    fn owned_items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|k| Item::new(format!("Category {k}"), format!("Fact {k}")).unwrap())
            .collect()
    }

    #[test]
    fn writes_a_pdf_and_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bingo_card_001.pdf");
        fs::write(&path, b"stale").unwrap();

        let owned = owned_items(25);
        let card = Card::new(owned.iter().collect());
        let renderer = CardRenderer::new(CardConfig::default(), RenderOptions::default());
        let rendered = renderer.render(&card, &path).unwrap();

        assert_eq!(rendered.pdf, path);
        assert_eq!(rendered.preview, None);
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Category 24)"));
        assert!(text.contains("(Fact 0)"));
        assert!(text.contains("/MediaBox [0 0 576.00 576.00]"));
    }

    #[test]
    fn preview_is_written_beside_the_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bingo_card_Alice.pdf");
        let owned = owned_items(4);
        let card = Card::new(owned.iter().collect());
        let config = CardConfig {
            grid_size: 2,
            physical_size_in: 2.0,
        };
        let options = RenderOptions {
            preview: Some(PreviewOptions { dpi: 72 }),
        };
        let rendered = CardRenderer::new(config, options).render(&card, &path).unwrap();
        let png = dir.path().join("bingo_card_Alice.png");
        assert_eq!(rendered.preview.as_deref(), Some(png.as_path()));
        let decoded = ::image::open(&png).unwrap();
        assert_eq!(decoded.width(), 144);
    }

    #[test]
    fn mismatched_card_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bingo_card_001.pdf");
        let owned = owned_items(3);
        let card = Card::new(owned.iter().collect());
        let renderer = CardRenderer::new(CardConfig::default(), RenderOptions::default());
        let err = renderer.render(&card, &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BingoError>(),
            Some(BingoError::CardSizeMismatch { .. })
        ));
        assert!(!path.exists());
    }
}
