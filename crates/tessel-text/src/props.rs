#![forbid(unsafe_code)]

//! Read-only Unicode property lookups.
//!
//! Every lookup takes a raw `u32` so callers can pass unvalidated
//! codepoints; values above U+10FFFF resolve to the conservative default
//! (`Unassigned`, `XX`, not-an-emoji) instead of panicking.
//!
//! General category, script, and the binary emoji/case sets come from the
//! ICU4X compiled data. Line-break classes come from `unicode-linebreak` and
//! cell widths from `unicode-width`.

use icu_properties::{maps, sets};
use unicode_width::UnicodeWidthChar;

pub use icu_properties::{GeneralCategory, Script};
pub use unicode_linebreak::BreakClass;

/// Largest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// General category of `uc`.
#[inline]
pub fn general_category(uc: u32) -> GeneralCategory {
    if uc > MAX_CODEPOINT {
        return GeneralCategory::Unassigned;
    }
    maps::general_category().get32(uc)
}

/// Script of `uc`.
#[inline]
pub fn script(uc: u32) -> Script {
    if uc > MAX_CODEPOINT {
        return Script::Unknown;
    }
    maps::script().get32(uc)
}

/// Raw UAX#14 line-break class of `uc`, before any resolution.
#[inline]
pub fn line_break_class(uc: u32) -> BreakClass {
    if uc > MAX_CODEPOINT {
        return BreakClass::Unknown;
    }
    unicode_linebreak::break_property(uc)
}

macro_rules! binary_property {
    ($($(#[$meta:meta])* $name:ident => $set:ident;)+) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(uc: u32) -> bool {
                uc <= MAX_CODEPOINT && sets::$set().contains32(uc)
            }
        )+
    };
}

binary_property! {
    /// `Emoji` property.
    is_emoji => emoji;
    /// `Emoji_Presentation` property.
    is_emoji_presentation => emoji_presentation;
    /// `Emoji_Modifier` property (skin-tone modifiers).
    is_emoji_modifier => emoji_modifier;
    /// `Emoji_Modifier_Base` property.
    is_emoji_modifier_base => emoji_modifier_base;
    /// `Extended_Pictographic` property.
    is_extended_pictographic => extended_pictographic;
    /// `Alphabetic` property.
    is_alphabetic => alphabetic;
    /// `Lowercase` property.
    is_lowercase => lowercase;
    /// `Uppercase` property.
    is_uppercase => uppercase;
}

/// Letter categories (`L*`).
#[inline]
pub fn is_letter_category(gc: GeneralCategory) -> bool {
    matches!(
        gc,
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Number categories (`N*`).
#[inline]
pub fn is_number_category(gc: GeneralCategory) -> bool {
    matches!(
        gc,
        GeneralCategory::DecimalNumber | GeneralCategory::LetterNumber | GeneralCategory::OtherNumber
    )
}

/// Mark categories (`Mn`, `Mc`, `Me`).
#[inline]
pub fn is_mark_category(gc: GeneralCategory) -> bool {
    matches!(
        gc,
        GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
    )
}

/// Whether a codepoint takes part in letter-level transforms and keep-all
/// word breaking: letters, numbers, and the alphabetic/ideographic/numeric
/// line-break classes.
#[inline]
pub fn is_letter(gc: GeneralCategory, class: BreakClass) -> bool {
    is_letter_category(gc)
        || is_number_category(gc)
        || matches!(
            class,
            BreakClass::Numeric
                | BreakClass::Alphabetic
                | BreakClass::Ideographic
                | BreakClass::Ambiguous
        )
}

/// Terminal cell width of `uc`.
///
/// Control and invalid codepoints report 0. With `cjk` set, East Asian
/// ambiguous characters count as wide.
#[inline]
pub fn cell_width(uc: u32, cjk: bool) -> usize {
    let Some(c) = char::from_u32(uc) else {
        return 0;
    };
    let width = if cjk { c.width_cjk() } else { c.width() };
    width.unwrap_or(0)
}

/// Whether `uc` occupies two cells.
#[inline]
pub fn is_wide(uc: u32, cjk: bool) -> bool {
    cell_width(uc, cjk) >= 2
}
