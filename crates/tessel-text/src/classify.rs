#![forbid(unsafe_code)]

//! Codepoint classification for the break engine and emoji scanner.
//!
//! Everything here is a pure function of the codepoint plus whatever small
//! piece of history the caller carries (previous class for regional
//! indicator parity, the Hangul jamo chain, the cached base class for
//! combining marks). Nothing allocates.

use crate::breaks::WordBreak;
use crate::props::{
    self, BreakClass, GeneralCategory as Gc, Script, is_alphabetic, is_lowercase, is_uppercase,
};

// =============================================================================
// Line-break classes (UAX#14)
// =============================================================================

/// Resolve a raw line-break class into the class the rule cascade sees.
///
/// - `AI`, `SG`, `XX` become `AL`.
/// - `SA` becomes `CM` for marks and `AL` otherwise.
/// - `CJ` becomes `NS`.
/// - `CM` and `ZWJ` take `base` when the caller has one cached.
/// - Under [`WordBreak::BreakAll`], `NU`, `AL`, and `SA` become `ID`.
pub fn resolve_line_class(
    raw: BreakClass,
    gc: Gc,
    word_break: WordBreak,
    base: Option<BreakClass>,
) -> BreakClass {
    let resolved = match raw {
        BreakClass::Ambiguous | BreakClass::Surrogate | BreakClass::Unknown => {
            BreakClass::Alphabetic
        }
        BreakClass::ComplexContext => {
            if matches!(gc, Gc::NonspacingMark | Gc::SpacingMark) {
                BreakClass::CombiningMark
            } else {
                BreakClass::Alphabetic
            }
        }
        BreakClass::ConditionalJapaneseStarter => BreakClass::NonStarter,
        BreakClass::CombiningMark | BreakClass::ZeroWidthJoiner => base.unwrap_or(raw),
        other => other,
    };

    if word_break == WordBreak::BreakAll
        && matches!(
            raw,
            BreakClass::Numeric | BreakClass::Alphabetic | BreakClass::ComplexContext
        )
    {
        return BreakClass::Ideographic;
    }
    resolved
}

// =============================================================================
// Hangul syllables
// =============================================================================

/// Conjoining jamo kind, with precomposed syllables decomposed to their
/// leading and trailing parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jamo {
    L,
    V,
    T,
    Lv,
    Lvt,
}

impl Jamo {
    fn from_class(class: BreakClass) -> Option<Self> {
        match class {
            BreakClass::HangulLJamo => Some(Jamo::L),
            BreakClass::HangulVJamo => Some(Jamo::V),
            BreakClass::HangulTJamo => Some(Jamo::T),
            BreakClass::HangulLvSyllable => Some(Jamo::Lv),
            BreakClass::HangulLvtSyllable => Some(Jamo::Lvt),
            _ => None,
        }
    }

    /// Positions of the first and last component in the L < V < T order.
    const fn span(self) -> (u8, u8) {
        match self {
            Jamo::L => (0, 0),
            Jamo::V => (1, 1),
            Jamo::T => (2, 2),
            Jamo::Lv => (0, 1),
            Jamo::Lvt => (0, 2),
        }
    }
}

/// Tracks whether consecutive codepoints compose one Hangul syllable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HangulChain {
    prev: Option<Jamo>,
}

impl HangulChain {
    /// Feed the next codepoint's raw line-break class.
    ///
    /// Returns `true` when it continues the syllable started by the previous
    /// codepoint: the previous part ends on the same component this one
    /// starts with, or on the component right before it. Anything that is
    /// not a jamo or syllable ends the chain.
    pub fn advance(&mut self, raw: BreakClass) -> bool {
        let jamo = Jamo::from_class(raw);
        let joins = match (self.prev, jamo) {
            (Some(prev), Some(this)) => {
                let prev_end = prev.span().1;
                let this_start = this.span().0;
                prev_end == this_start || prev_end + 1 == this_start
            }
            _ => false,
        };
        self.prev = jamo;
        joins
    }
}

// =============================================================================
// Grapheme cluster classes (UAX#29)
// =============================================================================

/// Grapheme cluster break property, with regional indicator parity folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphemeClass {
    #[default]
    Other,
    /// CR, LF, and other controls.
    Control,
    Extend,
    Zwj,
    Prepend,
    SpacingMark,
    /// Continues a Hangul syllable.
    HangulSyllable,
    /// First, third, ... regional indicator in a run.
    RegionalOdd,
    /// Second, fourth, ... regional indicator in a run.
    RegionalEven,
}

const fn is_regional_indicator(uc: u32) -> bool {
    matches!(uc, 0x1F1E6..=0x1F1FF)
}

fn next_parity<T: Copy + PartialEq>(prev: T, odd: T, even: T) -> T {
    if prev == odd { even } else { odd }
}

/// Grapheme class of `uc`.
///
/// `prev` is the class of the previous codepoint and `in_hangul` the result
/// of [`HangulChain::advance`] for this one.
pub fn grapheme_class(uc: u32, gc: Gc, prev: GraphemeClass, in_hangul: bool) -> GraphemeClass {
    match gc {
        Gc::Format => match uc {
            // ZWNJ and the tag characters are Grapheme_Extend.
            0x200C | 0xE0020..=0xE007F => GraphemeClass::Extend,
            0x200D => GraphemeClass::Zwj,
            0x600..=0x605 | 0x6DD | 0x70F | 0x8E2 | 0xD4E | 0x110BD | 0x111C2..=0x111C3 => {
                GraphemeClass::Prepend
            }
            _ => GraphemeClass::Control,
        },
        Gc::Control | Gc::LineSeparator | Gc::ParagraphSeparator | Gc::Surrogate => {
            GraphemeClass::Control
        }
        // Unassigned default ignorables.
        Gc::Unassigned if matches!(uc, 0xFFF0..=0xFFF8 | 0xE0000..=0xE0FFF) => {
            GraphemeClass::Control
        }
        Gc::OtherLetter if in_hangul => GraphemeClass::HangulSyllable,
        Gc::ModifierLetter if matches!(uc, 0xFF9E..=0xFF9F) => GraphemeClass::Extend,
        Gc::SpacingMark => match uc {
            0x9BE | 0x9D7 | 0xB3E | 0xB57 | 0xBBE | 0xBD7 | 0xCC2 | 0xCD5 | 0xCD6 | 0xD3E
            | 0xD57 | 0xDCF | 0xDDF | 0x1D165 | 0x1D16E..=0x1D172 => GraphemeClass::Extend,
            _ => GraphemeClass::SpacingMark,
        },
        Gc::EnclosingMark | Gc::NonspacingMark => GraphemeClass::Extend,
        Gc::OtherSymbol if is_regional_indicator(uc) => {
            next_parity(prev, GraphemeClass::RegionalOdd, GraphemeClass::RegionalEven)
        }
        Gc::ModifierSymbol if matches!(uc, 0x1F3FB..=0x1F3FF) => GraphemeClass::Extend,
        _ => GraphemeClass::Other,
    }
}

// =============================================================================
// Word classes (UAX#29)
// =============================================================================

/// Word break property, with regional indicator parity folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordClass {
    #[default]
    Other,
    /// CR, LF, vertical tab, form feed, NEL, line/paragraph separators.
    Newline,
    ExtendFormat,
    Katakana,
    HebrewLetter,
    ALetter,
    MidNumLet,
    MidLetter,
    MidNum,
    Numeric,
    ExtendNumLet,
    RegionalOdd,
    RegionalEven,
    WSegSpace,
}

impl WordClass {
    /// Letters and digits that glue into one word (WB5, WB8-WB10).
    pub const fn is_alnum(self) -> bool {
        matches!(
            self,
            WordClass::ALetter | WordClass::HebrewLetter | WordClass::Numeric
        )
    }

    /// `ALetter` or `Hebrew_Letter`.
    pub const fn is_ah_letter(self) -> bool {
        matches!(self, WordClass::ALetter | WordClass::HebrewLetter)
    }
}

/// Ideographs carrying `Lo`/`Nl` that are not `ALetter`.
const fn is_ideographic_letter(uc: u32) -> bool {
    matches!(
        uc,
        0x3006
            | 0x3007
            | 0x3021..=0x3029
            | 0x3038..=0x303A
            | 0x3400..=0x4DB5
            | 0x4E00..=0x9FC3
            | 0xF900..=0xFA2D
            | 0xFA30..=0xFA6A
            | 0xFA70..=0xFAD9
            | 0x20000..=0x2A6D6
            | 0x2F800..=0x2FA1D
    )
}

/// Word class of `uc`. `raw` is the unresolved line-break class and `prev`
/// the previous non-extend word class.
pub fn word_class(uc: u32, gc: Gc, raw: BreakClass, prev: WordClass) -> WordClass {
    let script = props::script(uc);
    if script == Script::Hebrew && gc == Gc::OtherLetter {
        return WordClass::HebrewLetter;
    }
    if script == Script::Katakana {
        return WordClass::Katakana;
    }

    match uc {
        0x3031..=0x3035 | 0x309B | 0x309C | 0x30A0 | 0x30FC | 0xFF70 => {
            return WordClass::Katakana;
        }
        0xFF9E..=0xFF9F => return WordClass::ExtendFormat,
        0x05F3 => return WordClass::ALetter,
        _ => {}
    }

    match raw {
        BreakClass::Numeric if uc != 0x066C => return WordClass::Numeric,
        BreakClass::InfixSeparator if !matches!(uc, 0x3A | 0xFE13 | 0x2E) => {
            return WordClass::MidNum;
        }
        _ => {}
    }

    let alphabetic = match gc {
        Gc::Control => {
            if matches!(uc, 0x0D | 0x0A | 0x0B | 0x0C | 0x85) {
                return WordClass::Newline;
            }
            false
        }
        Gc::LineSeparator | Gc::ParagraphSeparator => return WordClass::Newline,
        Gc::Format | Gc::SpacingMark | Gc::EnclosingMark | Gc::NonspacingMark => {
            return WordClass::ExtendFormat;
        }
        Gc::ConnectorPunctuation => return WordClass::ExtendNumLet,
        Gc::InitialPunctuation | Gc::FinalPunctuation => {
            if matches!(uc, 0x2018 | 0x2019) {
                return WordClass::MidNumLet;
            }
            false
        }
        Gc::OtherPunctuation => {
            return match uc {
                0x27 | 0x2E | 0x2024 | 0xFE52 | 0xFF07 | 0xFF0E => WordClass::MidNumLet,
                0xB7 | 0x5F4 | 0x2027 | 0x3A | 0x387 | 0xFE13 | 0xFE55 | 0xFF1A => {
                    WordClass::MidLetter
                }
                0x66C | 0xFE50 | 0xFE54 | 0xFF0C | 0xFF1B => WordClass::MidNum,
                _ => WordClass::Other,
            };
        }
        Gc::OtherSymbol => {
            if is_regional_indicator(uc) {
                return next_parity(prev, WordClass::RegionalOdd, WordClass::RegionalEven);
            }
            // Circled Latin letters are Other_Alphabetic.
            matches!(uc, 0x24B6..=0x24E9)
        }
        Gc::OtherLetter | Gc::LetterNumber => !is_ideographic_letter(uc),
        Gc::LowercaseLetter | Gc::ModifierLetter | Gc::TitlecaseLetter | Gc::UppercaseLetter => {
            true
        }
        _ => false,
    };

    if alphabetic && raw != BreakClass::ComplexContext && script != Script::Hiragana {
        return WordClass::ALetter;
    }
    if gc == Gc::SpaceSeparator && raw != BreakClass::NonBreakingGlue {
        return WordClass::WSegSpace;
    }
    WordClass::Other
}

// =============================================================================
// Sentence classes (UAX#29)
// =============================================================================

/// Sentence break property, plus the two folded `ATerm Close* Sp*` states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SentenceClass {
    #[default]
    Other,
    ExtendFormat,
    ParaSep,
    Sp,
    Lower,
    Upper,
    OLetter,
    Numeric,
    ATerm,
    SContinue,
    STerm,
    Close,
    /// `ATerm Close* Sp+`.
    ATermCloseSp,
    /// `STerm Close* Sp+`.
    STermCloseSp,
}

impl SentenceClass {
    /// `ATerm` with or without trailing spaces.
    pub const fn is_aterm(self) -> bool {
        matches!(self, SentenceClass::ATerm | SentenceClass::ATermCloseSp)
    }

    /// Any terminator state.
    pub const fn is_term(self) -> bool {
        matches!(
            self,
            SentenceClass::ATerm
                | SentenceClass::ATermCloseSp
                | SentenceClass::STerm
                | SentenceClass::STermCloseSp
        )
    }

    /// Neither a letter, a separator, nor a terminator (SB8's `[^...]*`).
    pub const fn is_other_term(self) -> bool {
        !matches!(
            self,
            SentenceClass::OLetter
                | SentenceClass::Upper
                | SentenceClass::Lower
                | SentenceClass::ParaSep
                | SentenceClass::ATerm
                | SentenceClass::STerm
                | SentenceClass::ATermCloseSp
                | SentenceClass::STermCloseSp
        )
    }
}

const fn is_sterm(uc: u32) -> bool {
    matches!(
        uc,
        0x21 | 0x3F
            | 0x589
            | 0x61F
            | 0x6D4
            | 0x700..=0x702
            | 0x7F9
            | 0x964..=0x965
            | 0x104A..=0x104B
            | 0x1362
            | 0x1367..=0x1368
            | 0x166E
            | 0x1735..=0x1736
            | 0x1803
            | 0x1809
            | 0x1944..=0x1945
            | 0x1AA8..=0x1AAB
            | 0x1B5A..=0x1B5B
            | 0x1B5E..=0x1B5F
            | 0x1C3B..=0x1C3C
            | 0x1C7E..=0x1C7F
            | 0x203C..=0x203D
            | 0x2047..=0x2049
            | 0x2E2E
            | 0x2E3C
            | 0x3002
            | 0xA4FF
            | 0xA60E..=0xA60F
            | 0xA6F3
            | 0xA6F7
            | 0xA876..=0xA877
            | 0xA8CE..=0xA8CF
            | 0xA92F
            | 0xA9C8..=0xA9C9
            | 0xAA5D..=0xAA5F
            | 0xAAF0..=0xAAF1
            | 0xABEB
            | 0xFE56..=0xFE57
            | 0xFF01
            | 0xFF1F
            | 0xFF61
            | 0x10A56..=0x10A57
            | 0x11047..=0x11048
            | 0x110BE..=0x110C1
            | 0x11141..=0x11143
            | 0x111C5..=0x111C6
            | 0x111CD
            | 0x111DE..=0x111DF
            | 0x11238..=0x11239
            | 0x1123B..=0x1123C
            | 0x112A9
            | 0x1144B..=0x1144C
            | 0x115C2..=0x115C3
            | 0x115C9..=0x115D7
            | 0x11641..=0x11642
            | 0x1173C..=0x1173E
            | 0x11C41..=0x11C42
            | 0x16A6E..=0x16A6F
            | 0x16AF5
            | 0x16B37..=0x16B38
            | 0x16B44
            | 0x1BC9F
            | 0x1DA88
    )
}

/// Sentence class of `uc`. `raw` is the unresolved line-break class.
pub fn sentence_class(uc: u32, gc: Gc, raw: BreakClass) -> SentenceClass {
    if raw == BreakClass::Numeric {
        return SentenceClass::Numeric;
    }

    let class = match gc {
        Gc::Control => match uc {
            0x0D | 0x0A | 0x85 => SentenceClass::ParaSep,
            0x09 | 0x0B | 0x0C => SentenceClass::Sp,
            _ => SentenceClass::Other,
        },
        Gc::SpaceSeparator => match uc {
            0x20 | 0xA0 | 0x1680 | 0x2000..=0x200A | 0x202F | 0x205F | 0x3000 => {
                SentenceClass::Sp
            }
            _ => SentenceClass::Other,
        },
        Gc::LineSeparator | Gc::ParagraphSeparator => SentenceClass::ParaSep,
        Gc::Format | Gc::SpacingMark | Gc::EnclosingMark | Gc::NonspacingMark => {
            SentenceClass::ExtendFormat
        }
        Gc::ModifierLetter if matches!(uc, 0xFF9E..=0xFF9F) => SentenceClass::ExtendFormat,
        Gc::TitlecaseLetter => SentenceClass::Upper,
        Gc::DashPunctuation => match uc {
            0x2D | 0x2013..=0x2014 | 0xFE31..=0xFE32 | 0xFE58 | 0xFE63 | 0xFF0D => {
                SentenceClass::SContinue
            }
            _ => SentenceClass::Other,
        },
        Gc::OtherPunctuation => {
            if is_sterm(uc) {
                SentenceClass::STerm
            } else {
                match uc {
                    0x2C | 0x3A | 0x55D | 0x60C..=0x60D | 0x7F8 | 0x1802 | 0x1808 | 0x3001
                    | 0xFE10..=0xFE11 | 0xFE13 | 0xFE50..=0xFE51 | 0xFE55 | 0xFF0C | 0xFF1A
                    | 0xFF64 => SentenceClass::SContinue,
                    0x2E | 0x2024 | 0xFE52 | 0xFF0E => SentenceClass::ATerm,
                    0x5F3 => SentenceClass::OLetter,
                    _ => SentenceClass::Other,
                }
            }
        }
        _ => SentenceClass::Other,
    };
    if class != SentenceClass::Other {
        return class;
    }

    if matches!(gc, Gc::OpenPunctuation | Gc::ClosePunctuation) || raw == BreakClass::Quotation {
        SentenceClass::Close
    } else if is_lowercase(uc) {
        SentenceClass::Lower
    } else if is_uppercase(uc) {
        SentenceClass::Upper
    } else if is_alphabetic(uc) {
        SentenceClass::OLetter
    } else {
        SentenceClass::Other
    }
}

// =============================================================================
// Emoji scanner categories
// =============================================================================

/// Scanner category of one codepoint in an emoji sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmojiCategory {
    /// Emoji with default emoji presentation.
    EmojiPresentation,
    /// Emoji with default text presentation.
    TextPresentation,
    /// Emoji without a stronger category.
    Emoji,
    /// Skin-tone modifier.
    Modifier,
    /// Base accepting a skin-tone modifier.
    ModifierBase,
    /// Regional indicator symbol.
    RegionalIndicator,
    /// Digit, `#`, or `*` that may start a keycap.
    KeycapBase,
    /// U+20E3 COMBINING ENCLOSING KEYCAP.
    Keycap,
    /// U+20E0 COMBINING ENCLOSING CIRCLE BACKSLASH.
    CircleBackslash,
    /// U+200D ZERO WIDTH JOINER.
    Zwj,
    /// U+FE0E VARIATION SELECTOR-15.
    TextVariation,
    /// U+FE0F VARIATION SELECTOR-16.
    EmojiVariation,
    /// U+1F3F4 WAVING BLACK FLAG, the base of tag sequences.
    TagBase,
    /// Tag digits and lowercase tag letters.
    TagSequence,
    /// U+E007F CANCEL TAG.
    TagTerm,
    /// Anything else.
    #[default]
    Other,
}

/// Scanner category of `uc`. The first matching category wins.
pub fn emoji_category(uc: u32) -> EmojiCategory {
    match uc {
        0x20E3 => return EmojiCategory::Keycap,
        0x20E0 => return EmojiCategory::CircleBackslash,
        0x200D => return EmojiCategory::Zwj,
        0xFE0E => return EmojiCategory::TextVariation,
        0xFE0F => return EmojiCategory::EmojiVariation,
        0x1F3F4 => return EmojiCategory::TagBase,
        0xE0030..=0xE0039 | 0xE0061..=0xE007A => return EmojiCategory::TagSequence,
        0xE007F => return EmojiCategory::TagTerm,
        _ => {}
    }
    if props::is_emoji_modifier_base(uc) {
        EmojiCategory::ModifierBase
    } else if props::is_emoji_modifier(uc) {
        EmojiCategory::Modifier
    } else if is_regional_indicator(uc) {
        EmojiCategory::RegionalIndicator
    } else if matches!(uc, 0x30..=0x39 | 0x23 | 0x2A) {
        EmojiCategory::KeycapBase
    } else if props::is_emoji_presentation(uc) {
        EmojiCategory::EmojiPresentation
    } else if props::is_emoji(uc) {
        EmojiCategory::TextPresentation
    } else {
        EmojiCategory::Other
    }
}
