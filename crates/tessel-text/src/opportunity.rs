#![forbid(unsafe_code)]

//! The per-gap break-opportunity bitmask.
//!
//! A codepoint sequence of length `n` has `n + 1` gaps: gap 0 sits before the
//! first codepoint and gap `k + 1` after codepoint `k`. Each gap carries one
//! [`BreakOpportunity`] with four independent axes:
//!
//! | bits     | axis                                              |
//! |----------|---------------------------------------------------|
//! | `0x7000` | grapheme (char break, cursor position, backspace) |
//! | `0x0700` | word (boundary, start, end)                       |
//! | `0x0070` | sentence (boundary, start, end)                   |
//! | `0x000F` | line break (see [`LineBreakOpportunity`])         |
//!
//! plus the per-codepoint flags `WHITESPACE`, `EXPANDABLE_SPACE`, and
//! `ZERO_WIDTH`, which describe the codepoint *before* the gap.

use bitflags::bitflags;

bitflags! {
    /// Break opportunities at one gap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BreakOpportunity: u16 {
        /// Nothing decided yet.
        const UNKNOWN              = 0x0000;

        /// The preceding codepoint is white space.
        const WHITESPACE           = 0x8000;
        /// The preceding codepoint may be stretched when justifying.
        const EXPANDABLE_SPACE     = 0x0800;
        /// The preceding codepoint has no advance.
        const ZERO_WIDTH           = 0x0080;

        /// Grapheme axis mask.
        const GB_MASK              = 0x7000;
        /// Extended grapheme cluster boundary.
        const GB_CHAR_BREAK        = 0x1000;
        /// Valid cursor position.
        const GB_CURSOR_POS        = 0x2000;
        /// Backspace deletes one codepoint rather than the whole cluster.
        const GB_BACKSPACE_DEL_CH  = 0x4000;

        /// Word axis mask.
        const WB_MASK              = 0x0700;
        /// Word boundary.
        const WB_WORD_BOUNDARY     = 0x0100;
        /// A word starts after this gap.
        const WB_WORD_START        = 0x0200;
        /// A word ends before this gap.
        const WB_WORD_END          = 0x0400;

        /// Sentence axis mask.
        const SB_MASK              = 0x0070;
        /// Sentence boundary.
        const SB_SENTENCE_BOUNDARY = 0x0010;
        /// A sentence starts after this gap.
        const SB_SENTENCE_START    = 0x0020;
        /// A sentence ends before this gap.
        const SB_SENTENCE_END      = 0x0040;

        /// Line-break axis mask.
        const LB_MASK              = 0x000F;
        /// Set for both allowed and mandatory breaks.
        const LB_BREAK_FLAG        = 0x0004;
        /// Set only for mandatory breaks.
        const LB_MANDATORY_FLAG    = 0x0008;
    }
}

/// The line-break decision stored in the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreakOpportunity {
    /// No rule has decided this gap yet.
    #[default]
    Unknown,
    /// A line break here is prohibited.
    NotAllowed,
    /// A line break here is allowed.
    Allowed,
    /// A line break here is required.
    Mandatory,
}

impl LineBreakOpportunity {
    /// The nibble written into [`BreakOpportunity::LB_MASK`].
    #[inline]
    pub const fn bits(self) -> u16 {
        match self {
            LineBreakOpportunity::Unknown => 0x0,
            LineBreakOpportunity::NotAllowed => 0x3,
            LineBreakOpportunity::Allowed => 0x5,
            LineBreakOpportunity::Mandatory => 0xE,
        }
    }

    /// Decode the low nibble. Unrecognized patterns read as `Unknown`.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0xF {
            0x3 => LineBreakOpportunity::NotAllowed,
            0x5 => LineBreakOpportunity::Allowed,
            0xE => LineBreakOpportunity::Mandatory,
            _ => LineBreakOpportunity::Unknown,
        }
    }
}

impl BreakOpportunity {
    /// Boundary flags written at both ends of every non-empty text.
    pub const TEXT_EDGE: Self = Self::GB_CHAR_BREAK
        .union(Self::GB_CURSOR_POS)
        .union(Self::WB_WORD_BOUNDARY)
        .union(Self::SB_SENTENCE_BOUNDARY);

    /// A gap carrying only a line-break decision.
    #[inline]
    pub const fn from_line_break(lbo: LineBreakOpportunity) -> Self {
        Self::from_bits_retain(lbo.bits())
    }

    /// The line-break decision at this gap.
    #[inline]
    pub const fn line_break(self) -> LineBreakOpportunity {
        LineBreakOpportunity::from_bits(self.bits())
    }

    /// Replace the line-break decision, keeping every other axis.
    #[inline]
    pub fn set_line_break(&mut self, lbo: LineBreakOpportunity) {
        *self = Self::from_bits_retain((self.bits() & !Self::LB_MASK.bits()) | lbo.bits());
    }

    /// A line may end here (allowed or mandatory).
    #[inline]
    pub const fn is_line_break(self) -> bool {
        self.contains(Self::LB_BREAK_FLAG)
    }

    /// A line must end here.
    #[inline]
    pub const fn is_mandatory_break(self) -> bool {
        matches!(self.line_break(), LineBreakOpportunity::Mandatory)
    }

    /// Extended grapheme cluster boundary.
    #[inline]
    pub const fn is_grapheme_boundary(self) -> bool {
        self.contains(Self::GB_CHAR_BREAK)
    }

    /// Word boundary.
    #[inline]
    pub const fn is_word_boundary(self) -> bool {
        self.contains(Self::WB_WORD_BOUNDARY)
    }

    /// Sentence boundary.
    #[inline]
    pub const fn is_sentence_boundary(self) -> bool {
        self.contains(Self::SB_SENTENCE_BOUNDARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_break_nibble_roundtrip() {
        for lbo in [
            LineBreakOpportunity::Unknown,
            LineBreakOpportunity::NotAllowed,
            LineBreakOpportunity::Allowed,
            LineBreakOpportunity::Mandatory,
        ] {
            assert_eq!(LineBreakOpportunity::from_bits(lbo.bits()), lbo);
        }
    }

    #[test]
    fn break_flag_covers_allowed_and_mandatory() {
        let allowed = BreakOpportunity::from_line_break(LineBreakOpportunity::Allowed);
        let mandatory = BreakOpportunity::from_line_break(LineBreakOpportunity::Mandatory);
        let not = BreakOpportunity::from_line_break(LineBreakOpportunity::NotAllowed);
        assert!(allowed.is_line_break());
        assert!(mandatory.is_line_break());
        assert!(!not.is_line_break());
        assert!(mandatory.is_mandatory_break());
        assert!(!allowed.is_mandatory_break());
    }

    #[test]
    fn set_line_break_keeps_other_axes() {
        let mut bo = BreakOpportunity::TEXT_EDGE | BreakOpportunity::WHITESPACE;
        bo.set_line_break(LineBreakOpportunity::Allowed);
        bo.set_line_break(LineBreakOpportunity::NotAllowed);
        assert_eq!(bo.line_break(), LineBreakOpportunity::NotAllowed);
        assert!(bo.is_grapheme_boundary());
        assert!(bo.is_word_boundary());
        assert!(bo.is_sentence_boundary());
        assert!(bo.contains(BreakOpportunity::WHITESPACE));
    }

    #[test]
    fn masks_are_disjoint() {
        let masks = [
            BreakOpportunity::GB_MASK,
            BreakOpportunity::WB_MASK,
            BreakOpportunity::SB_MASK,
            BreakOpportunity::LB_MASK,
            BreakOpportunity::WHITESPACE,
            BreakOpportunity::EXPANDABLE_SPACE,
            BreakOpportunity::ZERO_WIDTH,
        ];
        for (i, a) in masks.iter().enumerate() {
            for b in &masks[i + 1..] {
                assert!(a.intersection(*b).is_empty(), "{a:?} overlaps {b:?}");
            }
        }
    }
}
