#![forbid(unsafe_code)]

//! Render flags consumed by [`layout_line`](super::layout_line).
//!
//! These mirror the CSS properties a box collaborator resolves for a run of
//! text: `writing-mode`, `text-orientation`, `text-align`, `text-justify`,
//! `overflow-wrap`, `white-space`, `hanging-punctuation`, and the
//! trimming of spaces at line edges.

use bitflags::bitflags;

use crate::paragraph::WhiteSpace;

/// CSS `writing-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WritingMode {
    /// Lines run left to right and stack downward.
    #[default]
    HorizontalTb,
    /// Lines run top to bottom and stack right to left.
    VerticalRl,
    /// Lines run top to bottom and stack left to right.
    VerticalLr,
}

impl WritingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal-tb" => Some(Self::HorizontalTb),
            "vertical-rl" => Some(Self::VerticalRl),
            "vertical-lr" => Some(Self::VerticalLr),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HorizontalTb => "horizontal-tb",
            Self::VerticalRl => "vertical-rl",
            Self::VerticalLr => "vertical-lr",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        !matches!(self, Self::HorizontalTb)
    }
}

/// CSS `text-orientation`, used by vertical writing modes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextOrientation {
    /// Wide glyphs upright, the rest rotated sideways.
    #[default]
    Mixed,
    /// Every glyph upright.
    Upright,
}

/// How a glyph is set in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlyphOrientation {
    #[default]
    Upright,
    /// Rotated 90 degrees clockwise.
    Sideways,
}

/// CSS `text-align`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
    /// Stretch the line to the maximum extent.
    Justify,
}

impl TextAlign {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "center" => Some(Self::Center),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }
}

/// CSS `text-justify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextJustify {
    /// Mostly word separators and CJK glyphs, the rest between characters.
    #[default]
    Auto,
    /// Word separators only.
    InterWord,
    /// Between typographic characters only.
    InterCharacter,
}

/// CSS `overflow-wrap`: where an overflowing line may be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowWrap {
    /// Line-break opportunities only.
    #[default]
    Normal,
    /// Word boundaries.
    BreakWord,
    /// Grapheme boundaries.
    Anywhere,
}

impl OverflowWrap {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "break-word" => Some(Self::BreakWord),
            "anywhere" => Some(Self::Anywhere),
            _ => None,
        }
    }
}

bitflags! {
    /// CSS `hanging-punctuation`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HangingPunctuation: u8 {
        const NONE      = 0b0000_0000;
        /// An opening bracket or quote at the line start hangs.
        const FIRST     = 0b0000_0001;
        /// A closing bracket or quote at the line end hangs.
        const LAST      = 0b0000_0010;
        /// A stop or comma at the line end hangs.
        const FORCE_END = 0b0000_0100;
        /// A stop or comma hangs if it would not otherwise fit.
        const ALLOW_END = 0b0000_1000;
    }
}

bitflags! {
    /// Treatment of spaces at line edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpaceTrim: u8 {
        const NONE         = 0b0000_0000;
        /// Suppress leading U+0020.
        const REMOVE_START = 0b0000_0001;
        /// Suppress trailing U+0020 and U+3000.
        const REMOVE_END   = 0b0000_0010;
        /// Hang trailing U+0020 and U+3000. Ignored with `REMOVE_END`.
        const HANG_END     = 0b0000_0100;
    }
}

/// Style inputs of one line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderFlags {
    pub writing_mode: WritingMode,
    pub orientation: TextOrientation,
    pub align: TextAlign,
    /// Used when `align` is [`TextAlign::Justify`].
    pub justify: TextJustify,
    pub overflow_wrap: OverflowWrap,
    pub white_space: WhiteSpace,
    pub hanging: HangingPunctuation,
    pub spaces: SpaceTrim,
    /// Mark the last visible glyph of an overflowing line as an ellipsis.
    pub ellipsize: bool,
}

impl RenderFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn writing_mode(mut self, writing_mode: WritingMode) -> Self {
        self.writing_mode = writing_mode;
        self
    }

    #[must_use]
    pub fn orientation(mut self, orientation: TextOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Justify with the given mode.
    #[must_use]
    pub fn justify(mut self, justify: TextJustify) -> Self {
        self.align = TextAlign::Justify;
        self.justify = justify;
        self
    }

    #[must_use]
    pub fn overflow_wrap(mut self, overflow_wrap: OverflowWrap) -> Self {
        self.overflow_wrap = overflow_wrap;
        self
    }

    #[must_use]
    pub fn white_space(mut self, white_space: WhiteSpace) -> Self {
        self.white_space = white_space;
        self
    }

    #[must_use]
    pub fn hanging(mut self, hanging: HangingPunctuation) -> Self {
        self.hanging = hanging;
        self
    }

    #[must_use]
    pub fn spaces(mut self, spaces: SpaceTrim) -> Self {
        self.spaces = spaces;
        self
    }

    #[must_use]
    pub fn ellipsize(mut self, ellipsize: bool) -> Self {
        self.ellipsize = ellipsize;
        self
    }
}
