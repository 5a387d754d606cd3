use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::layout::{CardConfig, CardSurface, FontWeight, GridLine, LineKind, PlacedText};

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
/// Fraction of the em occupied by a capital letter.
const CAP_HEIGHT: f32 = 0.7;
/// Largest preview side in pixels; bigger pages are rasterised at a lower DPI.
const MAX_SIDE_PX: u32 = 8192;

/// Options controlling PNG previews.
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub dpi: u32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self { dpi: 150 }
    }
}

struct Palette {
    page: Rgba<u8>,
    border: Rgba<u8>,
    divider: Rgba<u8>,
    text: Rgba<u8>,
}

const PALETTE: Palette = Palette {
    page: Rgba([0xff, 0xff, 0xff, 0xff]),
    border: Rgba([0x00, 0x00, 0x00, 0xff]),
    divider: Rgba([0xb0, 0xb0, 0xb0, 0xff]),
    text: Rgba([0x1f, 0x1b, 0x14, 0xff]),
};

/// Raster canvas for one card preview.
pub struct ImageSurface {
    image: RgbaImage,
    dpi: u32,
}

impl ImageSurface {
    pub fn new(config: &CardConfig, options: &PreviewOptions) -> Self {
        let inches = config.physical_size_in.max(0.0);
        let fit = (MAX_SIDE_PX as f32 / inches).floor() as u32;
        let dpi = options.dpi.clamp(72, 600).min(fit).max(1);
        let side = inches_to_px(inches, dpi).clamp(1, MAX_SIDE_PX);
        Self {
            image: ImageBuffer::from_pixel(side, side, PALETTE.page),
            dpi,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fractional page position (origin bottom-left) to pixel position (origin top-left).
    fn to_px(&self, at: (f32, f32)) -> (f32, f32) {
        let side = self.image.width() as f32;
        (at.0 * side, (1.0 - at.1) * side)
    }

    fn glyph_scale(&self, font_size: u8) -> u32 {
        let cap_px = f32::from(font_size) * CAP_HEIGHT * self.dpi as f32 / 72.0;
        ((cap_px / GLYPH_HEIGHT as f32).round() as u32).max(1)
    }
}

impl CardSurface for ImageSurface {
    fn draw_line(&mut self, line: &GridLine) {
        let color = match line.kind {
            LineKind::Border => PALETTE.border,
            LineKind::Divider => PALETTE.divider,
        };
        let from = self.to_px(line.from);
        let to = self.to_px(line.to);
        draw_line_segment_mut(&mut self.image, from, to, color);
    }

    fn draw_text(&mut self, text: &PlacedText<'_>) {
        let scale = self.glyph_scale(text.font_size);
        let advance = (GLYPH_WIDTH as u32 + 1) * scale;
        let count = text.text.chars().count() as u32;
        let width = (count * advance).saturating_sub(scale);
        let (cx, cy) = self.to_px(text.center);
        let left = (cx - width as f32 / 2.0).round() as i32;
        let top = (cy - (GLYPH_HEIGHT as u32 * scale) as f32 / 2.0).round() as i32;
        let embolden = match text.weight {
            FontWeight::Bold => (scale / 2).max(1) as i32,
            FontWeight::Regular => 0,
        };

        for (idx, ch) in text.text.chars().enumerate() {
            let x = left + (idx as u32 * advance) as i32;
            draw_glyph(&mut self.image, x, top, ch, PALETTE.text, scale);
            if embolden > 0 {
                draw_glyph(&mut self.image, x + embolden, top, ch, PALETTE.text, scale);
            }
        }
    }
}

fn inches_to_px(inches: f32, dpi: u32) -> u32 {
    (inches * dpi as f32).round() as u32
}

fn draw_glyph(image: &mut RgbaImage, x: i32, y: i32, ch: char, color: Rgba<u8>, scale: u32) {
    let pattern = glyph_pattern(ch);
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col as i32 * scale as i32);
                let py = y + (row as i32 * scale as i32);
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

/// 5x7 bitmap for `ch`; letters render as capitals and unknown characters as blanks.
#[rustfmt::skip]
fn glyph_pattern(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '/' => [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000, 0b00000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '#' => [0b01010, 0b11111, 0b01010, 0b01010, 0b11111, 0b01010, 0b01010],
        '@' => [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110],
        '\'' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '+' => [0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        '%' => [0b11001, 0b11010, 0b00100, 0b01000, 0b10110, 0b00110, 0b00000],
        '?' => [0b01110, 0b10001, 0b00010, 0b00100, 0b00100, 0b00000, 0b00100],
        '=' => [0b00000, 0b11111, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111, 0b00000],
        '|' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        ';' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000],
        '*' => [0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000, 0b00000],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => [0; GLYPH_HEIGHT],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CardLayout;
    use crate::items::Item;
    use crate::sampler::Card;

    #[test]
    fn canvas_matches_physical_size() {
        let config = CardConfig {
            grid_size: 2,
            physical_size_in: 2.0,
        };
        let surface = ImageSurface::new(&config, &PreviewOptions { dpi: 100 });
        let image = surface.into_image();
        assert_eq!((image.width(), image.height()), (200, 200));
    }

    #[test]
    fn oversized_pages_fit_the_pixel_cap() {
        let config = CardConfig {
            grid_size: 5,
            physical_size_in: 1.0e30,
        };
        let surface = ImageSurface::new(&config, &PreviewOptions { dpi: 600 });
        assert!(surface.glyph_scale(10) >= 1);
        let image = surface.into_image();
        assert!(image.width() <= MAX_SIDE_PX);
        assert_eq!(image.width(), image.height());

        let poster = CardConfig {
            grid_size: 5,
            physical_size_in: 48.0,
        };
        let image = ImageSurface::new(&poster, &PreviewOptions { dpi: 600 }).into_image();
        assert_eq!(image.width(), 48 * 170);
    }

    #[test]
    fn painting_darkens_grid_and_text_pixels() {
        let owned: Vec<Item> = (0..4)
            .map(|k| Item::new(format!("Pet {k}"), "Dog").unwrap())
            .collect();
        let card = Card::new(owned.iter().collect());
        let config = CardConfig {
            grid_size: 2,
            physical_size_in: 3.0,
        };
        let layout = CardLayout::new(&config, &card).unwrap();
        let mut surface = ImageSurface::new(&config, &PreviewOptions::default());
        layout.paint(&mut surface);
        let image = surface.into_image();

        let inked = image.pixels().filter(|p| p.0 == PALETTE.text.0).count();
        assert!(inked > 0);
        let border = image.pixels().filter(|p| p.0 == PALETTE.border.0).count();
        assert!(border > 0);
    }

    #[test]
    fn punctuation_used_in_facts_has_glyphs() {
        for ch in ['_', ';', '*', '=', '<', '>', '|'] {
            assert!(glyph_pattern(ch).iter().any(|&row| row != 0), "{ch} is blank");
        }
        assert_eq!(glyph_pattern(' '), [0; GLYPH_HEIGHT]);
    }

    #[test]
    fn larger_fonts_get_larger_glyphs() {
        let surface = ImageSurface::new(&CardConfig::default(), &PreviewOptions { dpi: 300 });
        assert!(surface.glyph_scale(10) > surface.glyph_scale(5));
        assert!(surface.glyph_scale(5) >= 1);
    }
}
