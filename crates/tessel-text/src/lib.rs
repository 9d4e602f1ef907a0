#![forbid(unsafe_code)]

//! Text segmentation and line layout for terminal grids.
//!
//! This crate turns raw text into laid-out lines of cells:
//! - [`split_paragraph`] - decode UTF-8 up to the next mandatory break,
//!   applying a CSS `white-space` rule
//! - [`break_opportunities`] - grapheme, word, sentence, and line break
//!   opportunities for every gap of a codepoint run (UAX #29 and UAX #14)
//! - [`EmojiIter`] - split a run into emoji and text presentation runs
//! - [`layout_line`] - wrap, trim, hang, justify, and position one line
//! - [`TextPolicy`] - environment-driven defaults for the above
//!
//! # Example
//! ```
//! use tessel_text::{
//!     BreakOptions, LayoutParams, LineBreakOpportunity, WhiteSpace, break_opportunities,
//!     layout_line, split_paragraph,
//! };
//!
//! let para = split_paragraph("hello  world\nnext".as_bytes(), WhiteSpace::Normal).unwrap();
//! assert_eq!(para.consumed, 13);
//!
//! let bos = break_opportunities(&para.codepoints, &BreakOptions::new()).unwrap();
//! assert_eq!(bos[6].line_break(), LineBreakOpportunity::Allowed);
//! assert_eq!(bos[11].line_break(), LineBreakOpportunity::Mandatory);
//!
//! let line = layout_line(&para.codepoints, &bos, &LayoutParams::new().max_extent(8)).unwrap();
//! assert_eq!(line.consumed, 6);
//! ```

pub mod breaks;
pub mod classify;
pub mod emoji;
pub mod error;
pub mod layout;
pub mod opportunity;
pub mod paragraph;
pub mod policy;
pub mod props;
pub mod transform;

pub use breaks::{
    BreakOptions, LineBreak, WordBreak, break_opportunities, break_opportunities_into,
    break_opportunities_mut,
};
pub use emoji::{EmojiIter, EmojiRun};
pub use error::{Result, TextError};
pub use layout::{
    CellMetrics, GlyphInfo, GlyphOrientation, GlyphPos, Hanged, HangingPunctuation, LayoutParams,
    LineLayout, OverflowWrap, RenderFlags, SpaceTrim, TextAlign, TextJustify, TextOrientation,
    WritingMode, layout_line,
};
pub use opportunity::{BreakOpportunity, LineBreakOpportunity};
pub use paragraph::{Paragraph, WhiteSpace, split_paragraph};
pub use policy::{DEFAULT_TAB_SIZE, TextPolicy};
pub use transform::{CaseTransform, CharTransform};

pub use tessel_core::{Language, LineBox, Point};

#[cfg(feature = "tracing-json")]
pub use tessel_core::logging::init_subscriber;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_send_sync() {
        assert_send_sync::<BreakOptions>();
        assert_send_sync::<BreakOpportunity>();
        assert_send_sync::<EmojiIter>();
        assert_send_sync::<Paragraph>();
        assert_send_sync::<LayoutParams>();
        assert_send_sync::<LineLayout>();
        assert_send_sync::<TextPolicy>();
        assert_send_sync::<TextError>();
    }
}
