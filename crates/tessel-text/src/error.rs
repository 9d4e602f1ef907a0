#![forbid(unsafe_code)]

//! Error type shared by the break engine, paragraph splitter, and layout.

use std::collections::TryReserveError;
use std::fmt;

/// Errors produced by text segmentation and layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The codepoint sequence was empty.
    EmptyInput,
    /// A paragraph scan produced no codepoints.
    ///
    /// `consumed` bytes were still read (for example a lone line break that
    /// the white-space rule drops), so the caller can skip past them.
    EmptyParagraph {
        /// Source bytes read before giving up.
        consumed: usize,
    },
    /// Growing an output buffer failed.
    Alloc(TryReserveError),
    /// A break-opportunity vector did not have one entry per gap.
    BreakLengthMismatch {
        /// Codepoint count plus one.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::EmptyInput => write!(f, "empty input"),
            TextError::EmptyParagraph { consumed } => {
                write!(f, "empty paragraph after {consumed} bytes")
            }
            TextError::Alloc(e) => write!(f, "allocation failed: {e}"),
            TextError::BreakLengthMismatch { expected, found } => write!(
                f,
                "break vector length mismatch: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for TextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextError::Alloc(e) => Some(e),
            TextError::EmptyInput
            | TextError::EmptyParagraph { .. }
            | TextError::BreakLengthMismatch { .. } => None,
        }
    }
}

impl From<TryReserveError> for TextError {
    fn from(e: TryReserveError) -> Self {
        TextError::Alloc(e)
    }
}

/// Result type for text operations.
pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_messages() {
        assert_eq!(TextError::EmptyInput.to_string(), "empty input");
        assert_eq!(
            TextError::EmptyParagraph { consumed: 2 }.to_string(),
            "empty paragraph after 2 bytes"
        );
        assert_eq!(
            TextError::BreakLengthMismatch {
                expected: 4,
                found: 3
            }
            .to_string(),
            "break vector length mismatch: expected 4, found 3"
        );
    }

    #[test]
    fn alloc_error_has_source() {
        let err = Vec::<u64>::new()
            .try_reserve(usize::MAX)
            .expect_err("reserve must fail");
        let err = TextError::from(err);
        assert!(err.to_string().starts_with("allocation failed"));
        assert!(err.source().is_some());
        assert!(TextError::EmptyInput.source().is_none());
    }
}
