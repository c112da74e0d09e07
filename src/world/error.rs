//! Error types for world data loading.

use thiserror::Error;

use crate::puzzle::PuzzleBuildError;

/// Errors that can occur when loading level data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The puzzle section describes an unsolvable or inconsistent puzzle.
    #[error("Invalid puzzle in '{path}': {source}")]
    InvalidPuzzle {
        path: String,
        source: PuzzleBuildError,
    },
}
