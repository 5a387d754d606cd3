//! Argument parsers and resolution helpers shared by the CLI.

use std::path::Path;

use anyhow::Result;
use bingo_cards::{BingoError, CardNaming, load_labels};
use tracing::warn;

/// Clap-friendly delimiter parser accepting one character or the word `tab`.
pub fn parse_delimiter(input: &str) -> Result<char, String> {
    if input.eq_ignore_ascii_case("tab") || input == "\\t" {
        return Ok('\t');
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err("delimiter must be a single character or `tab`".to_string()),
    }
}

const PAGE_SIZE_RANGE_IN: std::ops::RangeInclusive<f32> = 1.0..=48.0;

/// Clap-friendly page size parser; sizes are inches between 1 and 48.
pub fn parse_size(input: &str) -> Result<f32, String> {
    let value: f32 = input
        .parse()
        .map_err(|_| format!("'{}' is not a number of inches", input))?;
    if !PAGE_SIZE_RANGE_IN.contains(&value) {
        return Err(format!(
            "page size must be between {} and {} inches",
            PAGE_SIZE_RANGE_IN.start(),
            PAGE_SIZE_RANGE_IN.end()
        ));
    }
    Ok(value)
}

/// Interpret the second positional argument: an integer card count, or else a labels file.
pub fn resolve_cards(arg: &str) -> Result<CardNaming> {
    if let Ok(count) = arg.trim().parse::<i64>() {
        if count < 0 {
            warn!(count, "negative card count, no cards will be made");
        }
        return Ok(CardNaming::Numbered(usize::try_from(count).unwrap_or(0)));
    }
    let path = Path::new(arg);
    if path.is_file() {
        let labels = load_labels(path)?;
        return Ok(CardNaming::Labeled(labels));
    }
    Err(BingoError::SecondArgumentUnresolved(arg.to_string()).into())
}
