#![forbid(unsafe_code)]

//! Grapheme, word, and sentence boundaries (UAX#29), layered on the
//! line-break scan.
//!
//! [`SegmentState`] is fed every codepoint in order, including the ones the
//! line rules consume ahead of the cursor. Boundary flags land on the gap
//! *before* the codepoint; whitespace flags on the gap *after* it. The
//! word/sentence start and end marks are computed afterwards by
//! [`mark_words`] and [`mark_sentences`].

use tracing::trace;

use crate::classify::{
    GraphemeClass, HangulChain, SentenceClass, WordClass, grapheme_class, sentence_class,
    word_class,
};
use crate::opportunity::BreakOpportunity;
use crate::props::{
    self, BreakClass, GeneralCategory as Gc, is_extended_pictographic, is_letter_category,
    is_mark_category, is_number_category,
};

const CR: u32 = 0x0D;
const LF: u32 = 0x0A;
const ZWJ: u32 = 0x200D;
const APOSTROPHE: u32 = 0x27;
const QUOTATION_MARK: u32 = 0x22;

/// `WHITESPACE`, `EXPANDABLE_SPACE`, and `ZERO_WIDTH` flags of one codepoint.
pub(crate) fn space_flags(uc: u32, gc: Gc) -> BreakOpportunity {
    let mut flags = BreakOpportunity::empty();
    if matches!(
        gc,
        Gc::SpaceSeparator | Gc::LineSeparator | Gc::ParagraphSeparator
    ) || matches!(uc, 0x09 | 0x0A | 0x0C | 0x0D)
    {
        flags |= BreakOpportunity::WHITESPACE;
    }
    if matches!(uc, 0x20 | 0xA0) {
        flags |= BreakOpportunity::EXPANDABLE_SPACE;
    }
    if (matches!(gc, Gc::NonspacingMark | Gc::EnclosingMark | Gc::Format) && uc != 0xAD)
        || matches!(uc, 0x1160..=0x11FF | 0x200B)
    {
        flags |= BreakOpportunity::ZERO_WIDTH;
    }
    flags
}

/// Scripts where backspace removes a whole cluster rather than its last
/// codepoint.
const fn backspace_deletes_cluster(uc: u32) -> bool {
    matches!(
        uc,
        0x0020..=0x02AF      // Latin
            | 0x1E00..=0x1EFF
            | 0x0370..=0x03FF // Greek
            | 0x1F00..=0x1FFF
            | 0x0400..=0x052F // Cyrillic
            | 0x3040..=0x30FF // Kana
            | 0xAC00..=0xD7A3 // Hangul
    )
}

/// Carried state of the grapheme/word/sentence rules.
#[derive(Debug, Clone, Default)]
pub(crate) struct SegmentState {
    hangul: HangulChain,
    prev_uc: Option<u32>,
    /// Last codepoint that was not a combining mark.
    base_uc: Option<u32>,

    prev_gb: GraphemeClass,
    met_pictographic: bool,

    prev_wb: WordClass,
    prev_prev_wb: WordClass,
    prev_wb_index: Option<usize>,

    prev_sb: SentenceClass,
    prev_prev_sb: SentenceClass,
    prev_sb_index: Option<usize>,
}

impl SegmentState {
    /// Feed codepoint `k`. `bos` must already hold gap `k + 1`.
    pub(crate) fn feed(&mut self, uc: u32, k: usize, bos: &mut [BreakOpportunity]) {
        let gc = props::general_category(uc);
        let raw = props::line_break_class(uc);
        let pictographic = is_extended_pictographic(uc);

        bos[k + 1] |= space_flags(uc, gc);

        let mut flags = BreakOpportunity::empty();
        let grapheme = self.grapheme_boundary(uc, gc, raw, pictographic);
        if grapheme {
            flags |= BreakOpportunity::GB_CHAR_BREAK | BreakOpportunity::GB_CURSOR_POS;
            if self.base_uc.is_some_and(|base| !backspace_deletes_cluster(base)) {
                flags |= BreakOpportunity::GB_BACKSPACE_DEL_CH;
            }
        }

        let word = self.word_boundary(uc, gc, raw, grapheme, pictographic, k, bos);
        if word {
            flags |= BreakOpportunity::WB_WORD_BOUNDARY;
        }

        if self.sentence_boundary(uc, gc, raw, word, k, bos) {
            flags |= BreakOpportunity::SB_SENTENCE_BOUNDARY;
        }

        bos[k] |= flags;
        self.prev_uc = Some(uc);
        if !is_mark_category(gc) {
            self.base_uc = Some(uc);
        }
    }

    // =========================================================================
    // Grapheme clusters
    // =========================================================================

    fn grapheme_boundary(&mut self, uc: u32, gc: Gc, raw: BreakClass, pictographic: bool) -> bool {
        let in_hangul = self.hangul.advance(raw);
        let gb = grapheme_class(uc, gc, self.prev_gb, in_hangul);
        let prev = self.prev_gb;

        // GB11 bookkeeping: ExtPict Extend* ZWJ must stay unbroken.
        if self.met_pictographic {
            let prev_pictographic = self.prev_uc.is_some_and(is_extended_pictographic);
            self.met_pictographic = gb == GraphemeClass::Extend
                || (prev_pictographic && gb == GraphemeClass::Zwj)
                || (prev == GraphemeClass::Extend && gb == GraphemeClass::Zwj)
                || (prev == GraphemeClass::Zwj && pictographic);
        }

        let boundary = if uc == LF && self.prev_uc == Some(CR) {
            false // GB3
        } else if prev == GraphemeClass::Control || gb == GraphemeClass::Control {
            true // GB4, GB5
        } else if gb == GraphemeClass::HangulSyllable {
            false // GB6-GB8
        } else if matches!(
            gb,
            GraphemeClass::Extend | GraphemeClass::Zwj | GraphemeClass::SpacingMark
        ) {
            false // GB9, GB9a
        } else if prev == GraphemeClass::Prepend {
            false // GB9b
        } else if pictographic {
            !(prev == GraphemeClass::Zwj && self.met_pictographic) // GB11
        } else {
            // GB12, GB13
            !(prev == GraphemeClass::RegionalOdd && gb == GraphemeClass::RegionalEven)
        };

        if pictographic {
            self.met_pictographic = true;
        }
        self.prev_gb = gb;
        boundary
    }

    // =========================================================================
    // Words
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    fn word_boundary(
        &mut self,
        uc: u32,
        gc: Gc,
        raw: BreakClass,
        grapheme: bool,
        pictographic: bool,
        k: usize,
        bos: &mut [BreakOpportunity],
    ) -> bool {
        // WB3, WB4: only grapheme boundaries (and RI pairs) are candidates.
        if !grapheme && !matches!(uc, 0x1F1E6..=0x1F1FF) {
            return false;
        }

        let wb = word_class(uc, gc, raw, self.prev_wb);
        let prev = self.prev_wb;
        let prev_prev = self.prev_prev_wb;
        let adjacent = self.prev_wb_index.is_some_and(|i| i + 1 == k);

        let boundary = if prev == WordClass::Newline && adjacent {
            true // WB3a
        } else if wb == WordClass::Newline {
            true // WB3b
        } else if self.prev_uc == Some(ZWJ) && pictographic {
            false // WB3c
        } else if prev == WordClass::WSegSpace && wb == WordClass::WSegSpace && adjacent {
            false // WB3d
        } else if wb == WordClass::ExtendFormat {
            false // WB4
        } else if prev.is_alnum() && wb.is_alnum() {
            false // WB5, WB8, WB9, WB10
        } else if prev == WordClass::Katakana && wb == WordClass::Katakana {
            false // WB13
        } else if matches!(
            prev,
            WordClass::ALetter
                | WordClass::HebrewLetter
                | WordClass::Numeric
                | WordClass::Katakana
                | WordClass::ExtendNumLet
        ) && wb == WordClass::ExtendNumLet
        {
            false // WB13a
        } else if prev == WordClass::ExtendNumLet
            && matches!(
                wb,
                WordClass::ALetter
                    | WordClass::HebrewLetter
                    | WordClass::Numeric
                    | WordClass::Katakana
            )
        {
            false // WB13b
        } else if prev_prev.is_ah_letter()
            && wb.is_ah_letter()
            && (matches!(prev, WordClass::MidLetter | WordClass::MidNumLet)
                || self.prev_uc == Some(APOSTROPHE))
        {
            self.clear_word_boundary(bos, "WB6");
            false // WB7
        } else if prev == WordClass::HebrewLetter && uc == APOSTROPHE {
            false // WB7a
        } else if prev_prev == WordClass::HebrewLetter
            && self.prev_uc == Some(QUOTATION_MARK)
            && wb == WordClass::HebrewLetter
        {
            self.clear_word_boundary(bos, "WB7b");
            false // WB7c
        } else if prev_prev == WordClass::Numeric
            && wb == WordClass::Numeric
            && (matches!(prev, WordClass::MidNum | WordClass::MidNumLet)
                || self.prev_uc == Some(APOSTROPHE))
        {
            self.clear_word_boundary(bos, "WB12");
            false // WB11
        } else {
            // WB15, WB16, WB999
            !(prev == WordClass::RegionalOdd && wb == WordClass::RegionalEven)
        };

        if wb != WordClass::ExtendFormat {
            self.prev_prev_wb = prev;
            self.prev_wb = wb;
            self.prev_wb_index = Some(k);
        }
        boundary
    }

    /// Retract the boundary before the previous word-significant codepoint.
    fn clear_word_boundary(&self, bos: &mut [BreakOpportunity], rule: &'static str) {
        if let Some(i) = self.prev_wb_index {
            bos[i].remove(BreakOpportunity::WB_WORD_BOUNDARY);
            trace!(gap = i, rule, "word boundary cleared");
        }
    }

    // =========================================================================
    // Sentences
    // =========================================================================

    fn sentence_boundary(
        &mut self,
        uc: u32,
        gc: Gc,
        raw: BreakClass,
        word: bool,
        k: usize,
        bos: &mut [BreakOpportunity],
    ) -> bool {
        // SB3, SB5: only word boundaries and CR/LF are candidates.
        if !word && uc != CR && uc != LF {
            return false;
        }

        let mut sb = sentence_class(uc, gc, raw);
        let prev = self.prev_sb;
        let prev_prev = self.prev_prev_sb;
        let adjacent = self.prev_sb_index.is_some_and(|i| i + 1 == k);

        let boundary = if uc == LF && self.prev_uc == Some(CR) {
            false // SB3
        } else if prev == SentenceClass::ParaSep && adjacent {
            true // SB4
        } else if sb == SentenceClass::ExtendFormat {
            false // SB5
        } else if prev == SentenceClass::ATerm && sb == SentenceClass::Numeric {
            false // SB6
        } else if matches!(prev_prev, SentenceClass::Upper | SentenceClass::Lower)
            && prev == SentenceClass::ATerm
            && sb == SentenceClass::Upper
        {
            false // SB7
        } else if prev == SentenceClass::ATerm && sb == SentenceClass::Close {
            sb = SentenceClass::ATerm;
            false
        } else if prev == SentenceClass::STerm && sb == SentenceClass::Close {
            sb = SentenceClass::STerm;
            false
        } else if prev.is_aterm() && sb == SentenceClass::Sp {
            sb = SentenceClass::ATermCloseSp;
            false
        } else if matches!(prev, SentenceClass::STerm | SentenceClass::STermCloseSp)
            && sb == SentenceClass::Sp
        {
            sb = SentenceClass::STermCloseSp;
            false
        } else if prev.is_aterm() && sb == SentenceClass::Lower {
            false // SB8
        } else if prev_prev.is_aterm() && prev.is_other_term() && sb == SentenceClass::Lower {
            if let Some(i) = self.prev_sb_index {
                bos[i].remove(BreakOpportunity::SB_SENTENCE_BOUNDARY);
                trace!(gap = i, rule = "SB8", "sentence boundary cleared");
            }
            false
        } else if prev.is_term()
            && matches!(
                sb,
                SentenceClass::SContinue | SentenceClass::ATerm | SentenceClass::STerm
            )
        {
            false // SB8a
        } else if matches!(prev, SentenceClass::ATerm | SentenceClass::STerm)
            && matches!(
                sb,
                SentenceClass::Close | SentenceClass::Sp | SentenceClass::ParaSep
            )
        {
            false // SB9
        } else if prev.is_term() && matches!(sb, SentenceClass::Sp | SentenceClass::ParaSep) {
            false // SB10
        } else {
            // SB11, SB998
            prev.is_term() && sb != SentenceClass::ParaSep
        };

        let pending_lower =
            prev_prev.is_aterm() && prev.is_other_term() && sb.is_other_term();
        if sb != SentenceClass::ExtendFormat && !pending_lower {
            self.prev_prev_sb = prev;
            self.prev_sb = sb;
            self.prev_sb_index = Some(k);
        }
        boundary
    }
}

// =============================================================================
// Word and sentence marks
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordKind {
    Letters,
    Numbers,
}

const fn is_japanese(uc: u32) -> bool {
    matches!(uc, 0x2F00..=0x30FF)
}
const fn is_kanji(uc: u32) -> bool {
    matches!(uc, 0x2F00..=0x2FDF)
}
const fn is_hiragana(uc: u32) -> bool {
    matches!(uc, 0x3040..=0x309F)
}
const fn is_katakana(uc: u32) -> bool {
    matches!(uc, 0x30A0..=0x30FF)
}

/// Whether moving from `last` to `uc` inside a letter run starts a new
/// Japanese word.
fn japanese_transition(last: u32, uc: u32) -> bool {
    if !is_japanese(last) && !is_japanese(uc) {
        return false;
    }
    (is_hiragana(last) && !is_hiragana(uc))
        || (is_katakana(last) && !(is_katakana(uc) || is_hiragana(uc)))
        || (is_kanji(last) && !(is_hiragana(uc) || is_kanji(uc)))
        || (is_japanese(last) != is_japanese(uc))
}

/// Set `WORD_START` on the gap before each word's first codepoint and
/// `WORD_END` on the gap after its last.
pub(crate) fn mark_words(text: &[u32], bos: &mut [BreakOpportunity]) {
    let mut current: Option<WordKind> = None;
    let mut last = 0u32;

    for (g, &uc) in text.iter().enumerate() {
        let gc = props::general_category(uc);
        let letter = is_letter_category(gc);
        let number = is_number_category(gc);

        match current {
            Some(kind) => {
                if is_mark_category(gc) || gc == Gc::Format {
                    continue;
                }
                if letter {
                    let split = match kind {
                        WordKind::Letters => japanese_transition(last, uc),
                        WordKind::Numbers => true,
                    };
                    if split {
                        bos[g] |= BreakOpportunity::WB_WORD_END | BreakOpportunity::WB_WORD_START;
                    }
                    current = Some(WordKind::Letters);
                    last = uc;
                } else if number {
                    last = uc;
                } else {
                    bos[g] |= BreakOpportunity::WB_WORD_END;
                    current = None;
                }
            }
            None => {
                if letter || number {
                    bos[g] |= BreakOpportunity::WB_WORD_START;
                    current = Some(if letter {
                        WordKind::Letters
                    } else {
                        WordKind::Numbers
                    });
                    last = uc;
                }
            }
        }
    }

    if current.is_some() {
        bos[text.len()] |= BreakOpportunity::WB_WORD_END;
    }
}

/// Set `SENTENCE_START` before each sentence's first non-white codepoint and
/// `SENTENCE_END` after its last.
pub(crate) fn mark_sentences(text: &[u32], bos: &mut [BreakOpportunity]) {
    let n = text.len();
    let mut start: Option<usize> = None;
    let mut end: Option<usize> = None;

    for g in 0..=n {
        if g > 0 && !bos[g].contains(BreakOpportunity::WHITESPACE) {
            end = Some(g);
        }
        if g == n || (g > 0 && bos[g].is_sentence_boundary()) {
            if let (Some(s), Some(e)) = (start, end)
                && e > s
            {
                bos[s] |= BreakOpportunity::SB_SENTENCE_START;
                bos[e] |= BreakOpportunity::SB_SENTENCE_END;
            }
            start = None;
            end = None;
        }
        if g < n && start.is_none() && !bos[g + 1].contains(BreakOpportunity::WHITESPACE) {
            start = Some(g);
        }
    }
}
