#![forbid(unsafe_code)]

//! Paragraph splitting under a CSS `white-space` rule.
//!
//! [`split_paragraph`] decodes UTF-8 up to and including the first mandatory
//! line break and returns the paragraph's codepoints along with the number
//! of source bytes read, so the caller can resume right after the break.
//!
//! ```
//! use tessel_text::{WhiteSpace, split_paragraph};
//!
//! let para = split_paragraph(b"a  b\nc", WhiteSpace::Normal).unwrap();
//! assert_eq!(para.codepoints, vec![0x61, 0x20, 0x62]);
//! assert_eq!(para.consumed, 5);
//! ```

use tracing::{debug, warn};

use crate::error::{Result, TextError};
use crate::props::{BreakClass, line_break_class};

const TAB: u32 = 0x09;
const LF: u32 = 0x0A;
const CR: u32 = 0x0D;
const SPACE: u32 = 0x20;
const ZERO_WIDTH_SPACE: u32 = 0x200B;
const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// CSS `white-space` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WhiteSpace {
    /// Collapse spaces, drop breaks, wrap.
    #[default]
    Normal,
    /// Keep spaces and breaks, no wrapping.
    Pre,
    /// Collapse spaces, drop breaks, no wrapping.
    NoWrap,
    /// Keep spaces and breaks, wrap.
    PreWrap,
    /// Like `PreWrap`, but trailing spaces take up room and wrap.
    BreakSpaces,
    /// Collapse spaces, keep breaks, wrap.
    PreLine,
}

impl WhiteSpace {
    /// Parse a CSS keyword. Case and surrounding white space are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "pre" => Some(Self::Pre),
            "nowrap" | "no-wrap" => Some(Self::NoWrap),
            "pre-wrap" => Some(Self::PreWrap),
            "break-spaces" => Some(Self::BreakSpaces),
            "pre-line" => Some(Self::PreLine),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Pre => "pre",
            Self::NoWrap => "nowrap",
            Self::PreWrap => "pre-wrap",
            Self::BreakSpaces => "break-spaces",
            Self::PreLine => "pre-line",
        }
    }

    /// Runs of spaces and tabs collapse to one space.
    #[must_use]
    pub const fn collapses_spaces(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap | Self::PreLine)
    }

    /// Mandatory breaks stay in the text.
    #[must_use]
    pub const fn preserves_breaks(self) -> bool {
        !matches!(self, Self::Normal | Self::NoWrap)
    }

    /// Lines may wrap at soft break opportunities.
    #[must_use]
    pub const fn wraps(self) -> bool {
        !matches!(self, Self::Pre | Self::NoWrap)
    }
}

/// One paragraph split off the front of a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    /// Codepoints after white-space processing.
    pub codepoints: Vec<u32>,
    /// Source bytes read, including a dropped line break.
    pub consumed: usize,
}

/// Decodes `bytes` into `(codepoint, source length)` pairs. Each invalid
/// sequence becomes one U+FFFD covering all of its bytes.
fn decode(bytes: &[u8]) -> impl Iterator<Item = (u32, usize)> + '_ {
    bytes.utf8_chunks().flat_map(|chunk| {
        let invalid = chunk.invalid();
        chunk
            .valid()
            .chars()
            .map(|c| (u32::from(c), c.len_utf8()))
            .chain((!invalid.is_empty()).then_some((REPLACEMENT_CHARACTER, invalid.len())))
    })
}

/// Split the first paragraph off `bytes`.
///
/// # Errors
///
/// [`TextError::EmptyInput`] for an empty buffer, and
/// [`TextError::EmptyParagraph`] when nothing is left after white-space
/// processing (for example a bare line break under [`WhiteSpace::Normal`]);
/// its `consumed` still tells the caller how far to skip.
pub fn split_paragraph(bytes: &[u8], white_space: WhiteSpace) -> Result<Paragraph> {
    if bytes.is_empty() {
        return Err(TextError::EmptyInput);
    }

    let collapse = white_space.collapses_spaces();
    let mut codepoints = Vec::new();
    let mut consumed = 0;
    let mut chars = decode(bytes).peekable();

    while let Some((uc, len)) = chars.next() {
        consumed += len;

        if matches!(
            line_break_class(uc),
            BreakClass::Mandatory
                | BreakClass::CarriageReturn
                | BreakClass::LineFeed
                | BreakClass::NextLine
        ) {
            let mut kept = uc;
            if uc == CR
                && let Some((LF, lf_len)) = chars.next_if(|&(next, _)| next == LF)
            {
                consumed += lf_len;
                kept = LF;
            }
            if white_space.preserves_breaks() {
                codepoints.try_reserve(1)?;
                codepoints.push(kept);
            }
            break;
        }

        let uc = if collapse && uc == TAB { SPACE } else { uc };
        if collapse && uc == SPACE && matches!(codepoints.last(), Some(&(SPACE | ZERO_WIDTH_SPACE)))
        {
            continue;
        }
        codepoints.try_reserve(1)?;
        codepoints.push(uc);
    }

    if codepoints.is_empty() {
        warn!(consumed, white_space = white_space.as_str(), "empty paragraph");
        return Err(TextError::EmptyParagraph { consumed });
    }

    debug!(
        codepoints = codepoints.len(),
        consumed,
        white_space = white_space.as_str(),
        "paragraph split"
    );
    Ok(Paragraph {
        codepoints,
        consumed,
    })
}
