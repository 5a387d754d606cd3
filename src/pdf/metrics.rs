use crate::layout::FontWeight;

/// Advance used for bytes outside the printable ASCII range.
const FALLBACK_WIDTH: u16 = 556;

/// Standard Helvetica advances (1/1000 em) for bytes 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Standard Helvetica-Bold advances (1/1000 em) for bytes 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width in points of WinAnsi-encoded `bytes` set at `size` points.
pub fn text_width(bytes: &[u8], size: f32, weight: FontWeight) -> f32 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let units: u32 = bytes
        .iter()
        .map(|&b| {
            let width = match b {
                0x20..=0x7e => table[(b - 0x20) as usize],
                _ => FALLBACK_WIDTH,
            };
            u32::from(width)
        })
        .sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_scale_with_size() {
        let w10 = text_width(b"Hello", 10.0, FontWeight::Regular);
        let w5 = text_width(b"Hello", 5.0, FontWeight::Regular);
        assert!((w10 - 2.0 * w5).abs() < 1e-4);
        // H e l l o = 722 + 556 + 222 + 222 + 556
        assert!((w10 - 22.78).abs() < 1e-3);
    }

    #[test]
    fn bold_is_wider() {
        let regular = text_width(b"Favorite food", 10.0, FontWeight::Regular);
        let bold = text_width(b"Favorite food", 10.0, FontWeight::Bold);
        assert!(bold > regular);
    }
}
