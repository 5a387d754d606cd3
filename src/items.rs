use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One square's worth of content: a category heading and a fact filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    category: String,
    value: String,
}

impl Item {
    /// Build an item from raw strings, trimming both. Returns `None` when either side is blank.
    pub fn new<C: AsRef<str>, V: AsRef<str>>(category: C, value: V) -> Option<Self> {
        let category = category.as_ref().trim();
        let value = value.as_ref().trim();
        if category.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            category: category.to_string(),
            value: value.to_string(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.value)
    }
}

/// How the input table is split into cells.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub delimiter: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Every item parsed from the input table, in row-major then column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPool {
    items: Vec<Item>,
}

impl ItemPool {
    /// Parse a delimited table whose first line holds the category headings.
    ///
    /// Blank cells are skipped, short rows contribute fewer items and cells
    /// past the last heading are ignored.
    pub fn from_table(text: &str, options: &ParseOptions) -> Self {
        let mut lines = text.lines();
        let headings: Vec<&str> = match lines.next() {
            Some(first) => first
                .trim_start_matches(BYTE_ORDER_MARK)
                .split(options.delimiter)
                .map(str::trim)
                .collect(),
            None => return Self::default(),
        };

        let mut items = Vec::new();
        for line in lines {
            for (heading, cell) in headings.iter().zip(line.split(options.delimiter)) {
                if let Some(item) = Item::new(heading, cell) {
                    items.push(item);
                }
            }
        }
        Self { items }
    }

    /// Read and parse a table from disk.
    pub fn load(path: &Path, options: &ParseOptions) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read input table {}", path.display()))?;
        Ok(Self::from_table(&decode_text(bytes), options))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct category headings that produced at least one item.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.items.iter().map(Item::category).collect()
    }
}

impl From<Vec<Item>> for ItemPool {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a ItemPool {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Decode file contents as UTF-8, falling back to Latin-1 for legacy spreadsheet exports.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!("input is not UTF-8, reading it as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}
