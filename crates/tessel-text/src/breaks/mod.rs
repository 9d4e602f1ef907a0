#![forbid(unsafe_code)]

//! Break-opportunity engine.
//!
//! [`break_opportunities`] runs one forward scan over a codepoint sequence
//! and returns a vector of `n + 1` [`BreakOpportunity`] values: line-break
//! decisions from the UAX#14 cascade in [`line`], and grapheme, word, and
//! sentence boundaries from the UAX#29 rules in [`segment`], all layered on
//! the same pass.
//!
//! # Example
//!
//! ```
//! use tessel_text::{BreakOptions, LineBreakOpportunity, break_opportunities};
//!
//! let text: Vec<u32> = "ab cd".chars().map(u32::from).collect();
//! let bos = break_opportunities(&text, &BreakOptions::default()).unwrap();
//! assert_eq!(bos.len(), 6);
//! assert_eq!(bos[3].line_break(), LineBreakOpportunity::Allowed);
//! assert!(bos[5].is_mandatory_break());
//! ```

mod line;
mod segment;

use tessel_core::Language;
use tracing::debug;

use crate::error::{Result, TextError};
use crate::opportunity::BreakOpportunity;
use crate::props::{general_category, is_letter, line_break_class};
use crate::transform::CharTransform;

/// Word-break policy (CSS `word-break`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordBreak {
    /// Break between words only.
    #[default]
    Normal,
    /// Allow breaks inside words of non-CJK text too.
    BreakAll,
    /// Never break between letters, including CJK.
    KeepAll,
}

impl WordBreak {
    /// Parse a CSS keyword. Case and surrounding white space are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "break-all" | "breakall" | "break_all" => Some(Self::BreakAll),
            "keep-all" | "keepall" | "keep_all" => Some(Self::KeepAll),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::BreakAll => "break-all",
            Self::KeepAll => "keep-all",
        }
    }
}

/// Line-break strictness (CSS `line-break`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreak {
    /// The default rule set.
    #[default]
    Normal,
    /// Fewer restrictions: skips LB23/LB24 and relaxes LB13/LB25.
    Loose,
    /// More restrictions around closing punctuation and numbers.
    Strict,
    /// Break between any two codepoints.
    Anywhere,
}

impl LineBreak {
    /// Parse a CSS keyword. Case and surrounding white space are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" | "auto" => Some(Self::Normal),
            "loose" => Some(Self::Loose),
            "strict" => Some(Self::Strict),
            "anywhere" => Some(Self::Anywhere),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Loose => "loose",
            Self::Strict => "strict",
            Self::Anywhere => "anywhere",
        }
    }
}

/// Options for one break scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakOptions {
    /// Content language. Reserved; the rule cascade is not tailored per
    /// language.
    pub language: Option<Language>,
    /// Transforms applied by [`break_opportunities_mut`].
    pub transform: CharTransform,
    /// Word-break policy.
    pub word_break: WordBreak,
    /// Line-break strictness.
    pub line_break: LineBreak,
}

impl BreakOptions {
    /// Default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            language: None,
            transform: CharTransform::NONE,
            word_break: WordBreak::Normal,
            line_break: LineBreak::Normal,
        }
    }

    /// Set the content language.
    #[must_use]
    pub const fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the character transforms.
    #[must_use]
    pub const fn transform(mut self, transform: CharTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the word-break policy.
    #[must_use]
    pub const fn word_break(mut self, word_break: WordBreak) -> Self {
        self.word_break = word_break;
        self
    }

    /// Set the line-break strictness.
    #[must_use]
    pub const fn line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }
}

/// Compute the break opportunities of `text`.
///
/// The result has `text.len() + 1` entries; entry `k` describes the gap
/// before codepoint `k`.
///
/// # Errors
///
/// [`TextError::EmptyInput`] for empty text, [`TextError::Alloc`] when the
/// output cannot be allocated.
pub fn break_opportunities(text: &[u32], options: &BreakOptions) -> Result<Vec<BreakOpportunity>> {
    let mut bos = Vec::new();
    break_opportunities_into(text, options, &mut bos)?;
    Ok(bos)
}

/// Like [`break_opportunities`], reusing `out`.
///
/// `out` is cleared first and stays empty when an error is returned.
///
/// # Errors
///
/// See [`break_opportunities`].
pub fn break_opportunities_into(
    text: &[u32],
    options: &BreakOptions,
    out: &mut Vec<BreakOpportunity>,
) -> Result<()> {
    out.clear();
    if text.is_empty() {
        return Err(TextError::EmptyInput);
    }

    let gaps = text.len() + 1;
    out.try_reserve(gaps)?;
    let mut annotations = Vec::new();
    if let Err(e) = annotations.try_reserve(gaps) {
        out.clear();
        return Err(e.into());
    }

    line::ScanState::new(text, options, out, &mut annotations).run();
    segment::mark_words(text, out);
    segment::mark_sentences(text, out);

    debug!(
        codepoints = text.len(),
        word_break = options.word_break.as_str(),
        line_break = options.line_break.as_str(),
        "break scan"
    );
    Ok(())
}

/// Compute break opportunities, then apply `options.transform` to `text` in
/// place.
///
/// Only letters and U+0020 are transformed. Capitalization keys off the
/// word-start marks of the scan, which sees the text before any change.
///
/// # Errors
///
/// See [`break_opportunities`]. `text` is untouched on error.
pub fn break_opportunities_mut(
    text: &mut [u32],
    options: &BreakOptions,
) -> Result<Vec<BreakOpportunity>> {
    let bos = break_opportunities(text, options)?;
    if options.transform.is_empty() {
        return Ok(bos);
    }
    for (k, uc) in text.iter_mut().enumerate() {
        let eligible = *uc == 0x20 || is_letter(general_category(*uc), line_break_class(*uc));
        if eligible {
            let word_start = bos[k].contains(BreakOpportunity::WB_WORD_START);
            *uc = options.transform.apply(*uc, word_start);
        }
    }
    Ok(bos)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_text() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(any::<char>().prop_map(u32::from), 1..48)
    }

    fn any_options() -> impl Strategy<Value = BreakOptions> {
        (
            prop_oneof![
                Just(WordBreak::Normal),
                Just(WordBreak::BreakAll),
                Just(WordBreak::KeepAll)
            ],
            prop_oneof![
                Just(LineBreak::Normal),
                Just(LineBreak::Loose),
                Just(LineBreak::Strict),
                Just(LineBreak::Anywhere)
            ],
        )
            .prop_map(|(wb, lb)| BreakOptions::new().word_break(wb).line_break(lb))
    }

    /// Whole grapheme clusters; concatenating them never merges two.
    const CLUSTERS: &[&str] = &[
        "a",
        "Z",
        "7",
        " ",
        "(",
        ")",
        ".",
        "-",
        "\u{4E00}",
        "\u{200B}",
        "e\u{301}",
        "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{1F4BB}",
        "\u{1F44D}\u{1F3FD}",
        "\u{2764}\u{FE0F}",
        "\u{1F1FA}\u{1F1F8}",
        "\u{1F1FA}\u{1F1F8}\u{301}",
        "\u{1100}\u{1161}\u{11A8}",
        "\u{1100}\u{1161}\u{301}",
        "\u{D55C}",
        "\u{1F3F4}\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}",
    ];

    fn clustered_text() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(prop::sample::select(CLUSTERS), 1..16)
            .prop_map(|parts| parts.concat().chars().map(u32::from).collect())
    }

    fn wrapping_options() -> impl Strategy<Value = BreakOptions> {
        any_options().prop_filter("anywhere breaks inside clusters", |opts| {
            opts.line_break != LineBreak::Anywhere
        })
    }

    proptest! {
        #[test]
        fn line_breaks_fall_on_cluster_boundaries(
            text in clustered_text(),
            opts in wrapping_options(),
        ) {
            let bos = break_opportunities(&text, &opts).unwrap();
            for (k, bo) in bos.iter().enumerate() {
                if bo.is_line_break() {
                    prop_assert!(bo.is_grapheme_boundary(), "gap {} of {:X?}", k, text);
                }
            }
        }

        #[test]
        fn length_and_edges(text in any_text(), opts in any_options()) {
            let bos = break_opportunities(&text, &opts).unwrap();
            let n = text.len();
            prop_assert_eq!(bos.len(), n + 1);
            prop_assert!(bos[0].contains(BreakOpportunity::TEXT_EDGE));
            prop_assert!(bos[n].contains(BreakOpportunity::TEXT_EDGE));
            prop_assert!(!bos[0].is_line_break());
            prop_assert!(bos[n].is_mandatory_break());
        }

        #[test]
        fn every_inner_gap_is_decided(text in any_text(), opts in any_options()) {
            let bos = break_opportunities(&text, &opts).unwrap();
            for bo in &bos[1..] {
                prop_assert_ne!(bo.line_break(), crate::opportunity::LineBreakOpportunity::Unknown);
            }
        }

        #[test]
        fn hard_breaks_are_mandatory(prefix in "[a-z ]{0,8}", suffix in "[a-z ]{1,8}") {
            let text: Vec<u32> = format!("{prefix}\n{suffix}").chars().map(u32::from).collect();
            let bos = break_opportunities(&text, &BreakOptions::default()).unwrap();
            let lf = prefix.chars().count();
            prop_assert!(bos[lf + 1].is_mandatory_break());
        }

        #[test]
        fn scan_is_deterministic(text in any_text(), opts in any_options()) {
            let a = break_opportunities(&text, &opts).unwrap();
            let mut b = Vec::new();
            break_opportunities_into(&text, &opts, &mut b).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
