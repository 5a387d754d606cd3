//! Minimal single-page PDF 1.4 writer using the standard Helvetica fonts.

use std::fmt::Write;

use crate::layout::FontWeight;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// One square page being assembled in memory. Dropped once its bytes are taken.
pub struct PdfPage {
    side: f32,
    title: String,
    content: String,
}

impl PdfPage {
    pub fn new<S: Into<String>>(side: f32, title: S) -> Self {
        Self {
            side,
            title: title.into(),
            content: String::new(),
        }
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    /// Stroke a straight segment with the given gray level and width.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), gray: f32, width: f32) {
        writeln!(
            &mut self.content,
            "q {:.3} G {:.2} w {:.2} {:.2} m {:.2} {:.2} l S Q",
            gray, width, from.0, from.1, to.0, to.1
        )
        .ok();
    }

    /// Show WinAnsi-encoded text with its baseline starting at `origin`.
    pub fn text(&mut self, encoded: &[u8], origin: (f32, f32), size: f32, weight: FontWeight) {
        let font = match weight {
            FontWeight::Regular => REGULAR_FONT,
            FontWeight::Bold => BOLD_FONT,
        };
        writeln!(
            &mut self.content,
            "BT /{} {:.1} Tf 1 0 0 1 {:.2} {:.2} Tm {} Tj ET",
            font,
            size,
            origin.0,
            origin.1,
            literal(encoded)
        )
        .ok();
    }

    /// Serialize the page into a complete PDF file.
    pub fn finish(self) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {side:.2} {side:.2}] \
                 /Resources << /Font << /{REGULAR_FONT} 4 0 R /{BOLD_FONT} 5 0 R >> >> \
                 /Contents 6 0 R >>",
                side = self.side
            ),
            font_dictionary("Helvetica"),
            font_dictionary("Helvetica-Bold"),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                self.content.len(),
                self.content
            ),
            format!(
                "<< /Title {} /Producer (bingo-cards) >>",
                literal(&encode_win_ansi(&self.title))
            ),
        ];

        let mut out: Vec<u8> = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (idx, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", idx + 1, body).as_bytes());
        }

        let xref_at = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            writeln!(&mut xref, "{:010} 00000 n ", offset).ok();
        }
        writeln!(
            &mut xref,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF",
            objects.len() + 1,
            objects.len(),
            xref_at
        )
        .ok();
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

fn font_dictionary(base: &str) -> String {
    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{base} /Encoding /WinAnsiEncoding >>")
}

/// Map text onto the WinAnsi code page used by the standard fonts.
///
/// Latin-1 passes through, common typographic punctuation is remapped and
/// anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// PDF literal string with delimiters escaped and high bytes written in octal.
fn literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => {
                write!(&mut out, "\\{:03o}", b).ok();
            }
        }
    }
    out.push(')');
    out
}
