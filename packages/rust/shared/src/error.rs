//! Error types for Signpost.
//!
//! Library crates use [`SignpostError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::{Answer, QuestionId};

/// Top-level error type for all Signpost operations.
#[derive(Debug, thiserror::Error)]
pub enum SignpostError {
    /// An answer was given for a position or question that is not currently displayed.
    #[error("answer out of sequence at position {position}: {message}")]
    OutOfSequence { position: usize, message: String },

    /// The answer index does not exist for the question.
    #[error("question `{question}` has no answer {index} (it has {available})")]
    InvalidAnswer {
        question: QuestionId,
        index: usize,
        available: usize,
    },

    /// No outcome is compatible with the recorded answers.
    #[error("no outcome matches the answers [{}]", format_trail(.trail))]
    NoMatchingOutcome { trail: Vec<Answer> },

    /// Candidate outcomes disagree on which question comes next.
    #[error("outcomes are ambiguous at position {position}: {message}")]
    AmbiguousOutcome { position: usize, message: String },

    /// An outcome path references a question the catalogue does not define.
    #[error("question `{question}` is not defined in the catalogue")]
    UnknownQuestion { question: QuestionId },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Catalogue file parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SignpostError>;

impl SignpostError {
    /// Create an out-of-sequence error for a position.
    pub fn out_of_sequence(position: usize, msg: impl Into<String>) -> Self {
        Self::OutOfSequence {
            position,
            message: msg.into(),
        }
    }

    /// Create an ambiguity error for a position.
    pub fn ambiguous(position: usize, msg: impl Into<String>) -> Self {
        Self::AmbiguousOutcome {
            position,
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the catalogue itself is malformed.
    ///
    /// Such errors cannot be fixed by answering differently and must be
    /// surfaced to whoever authored the catalogue.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Self::NoMatchingOutcome { .. }
                | Self::AmbiguousOutcome { .. }
                | Self::UnknownQuestion { .. }
        )
    }
}

fn format_trail(trail: &[Answer]) -> String {
    trail
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SignpostError::out_of_sequence(3, "the trail only has 1 answer");
        assert_eq!(
            err.to_string(),
            "answer out of sequence at position 3: the trail only has 1 answer"
        );

        let err = SignpostError::NoMatchingOutcome {
            trail: vec![Answer::new("git", 1), Answer::new("storage", 0)],
        };
        assert_eq!(
            err.to_string(),
            "no outcome matches the answers [git=1, storage=0]"
        );
    }

    #[test]
    fn defect_classification() {
        assert!(SignpostError::ambiguous(0, "ask a or b?").is_configuration_defect());
        assert!(
            SignpostError::UnknownQuestion {
                question: "ghost".into()
            }
            .is_configuration_defect()
        );
        assert!(!SignpostError::out_of_sequence(1, "nope").is_configuration_defect());
        assert!(
            !SignpostError::InvalidAnswer {
                question: "git".into(),
                index: 5,
                available: 2,
            }
            .is_configuration_defect()
        );
    }
}
