use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::error::BingoError;
use crate::items::decode_text;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Filesystem-safe suffix naming one card, such as `_St_Louis_MO`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardLabel(String);

impl CardLabel {
    /// Normalize one line of a labels file. Lines with no word characters yield `None`.
    pub fn normalize(line: &str) -> Option<Self> {
        let mut label = String::new();
        for token in NON_WORD.split(line) {
            if token.is_empty() || token == "." {
                continue;
            }
            label.push('_');
            label.push_str(token);
        }
        if label.is_empty() {
            None
        } else {
            Some(Self(label))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize every line, dropping the ones that produce no label.
pub fn parse_labels(text: &str) -> Vec<CardLabel> {
    text.lines().filter_map(CardLabel::normalize).collect()
}

/// Read a labels file, one card per usable line.
pub fn load_labels(path: &Path) -> Result<Vec<CardLabel>> {
    if !path.is_file() {
        return Err(BingoError::LabelsNotFound(path.to_path_buf()).into());
    }
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read labels file {}", path.display()))?;
    let text = decode_text(bytes);
    let labels = parse_labels(&text);
    let skipped = text.lines().count() - labels.len();
    if skipped > 0 {
        debug!(path = %path.display(), skipped, "labels file lines produced no label");
    }
    Ok(labels)
}
