use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of a card generation run.
#[derive(Debug, Error)]
pub enum BingoError {
    #[error("expected exactly two arguments: an input table and a card count or labels file")]
    ArgumentCount,
    #[error("could not find your input file {}", .0.display())]
    InputNotFound(PathBuf),
    #[error(
        "could not interpret '{0}' as a number of bingo cards to make or as an existing labels file"
    )]
    SecondArgumentUnresolved(String),
    #[error("could not find labels file {}", .0.display())]
    LabelsNotFound(PathBuf),
    #[error(
        "did not have enough data in input file to grab {needed} random entries (found {available})"
    )]
    InsufficientData { needed: usize, available: usize },
    #[error("a card needs exactly {expected} entries, got {actual}")]
    CardSizeMismatch { expected: usize, actual: usize },
}

impl BingoError {
    /// Whether the failure came from bad invocation, in which case usage help is printed.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            BingoError::ArgumentCount
                | BingoError::InputNotFound(_)
                | BingoError::SecondArgumentUnresolved(_)
                | BingoError::LabelsNotFound(_)
        )
    }
}
