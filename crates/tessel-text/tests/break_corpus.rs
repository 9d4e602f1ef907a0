//! Break opportunity corpus tests.
//!
//! Checks the break engine against independent segmenters on a fixed corpus:
//! - grapheme clusters against `unicode-segmentation`
//! - word boundaries against `unicode-segmentation` (plain ASCII prose)
//! - line breaks against `unicode-linebreak` (UAX #14 default rules)
//!
//! The corpus avoids areas where the engine deliberately tailors the default
//! rules (Indic conjuncts, Japanese word splitting, keep-all/break-all).

use tessel_text::{BreakOpportunity, BreakOptions, LineBreakOpportunity, break_opportunities};
use unicode_segmentation::UnicodeSegmentation;

// =============================================================================
// Corpus
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Case {
    input: &'static str,
    description: &'static str,
}

impl Case {
    const fn new(input: &'static str, description: &'static str) -> Self {
        Self { input, description }
    }
}

const GRAPHEME_CASES: &[Case] = &[
    Case::new("hello world", "ascii"),
    Case::new("e\u{301}x", "combining acute"),
    Case::new("a\r\nb", "crlf"),
    Case::new("a\n\nb", "double lf"),
    Case::new("\u{1F1FA}\u{1F1F8}\u{1F1E9}\u{1F1EA}", "two flags"),
    Case::new("\u{1F1FA}\u{1F1F8}\u{1F1E9}", "flag and lone indicator"),
    Case::new("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}", "family zwj"),
    Case::new("\u{1F44D}\u{1F3FD}!", "thumbs up with skin tone"),
    Case::new("\u{D55C}\u{AE00}", "precomposed hangul"),
    Case::new("\u{1100}\u{1161}\u{11A8}a", "hangul jamo"),
    Case::new("\u{0915}\u{093F}", "devanagari spacing mark"),
    Case::new("\u{4E2D}\u{6587}", "cjk"),
    Case::new("a\u{200D}b", "zwj between letters"),
    Case::new("\u{2764}\u{FE0F}x", "heart with vs16"),
    Case::new("\u{1161} \u{1161}", "jamo split by space"),
    Case::new("a\u{200B}b", "zero width space"),
    Case::new("\u{1F3F4}\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}a", "tag flag"),
];

const WORD_CASES: &[Case] = &[
    Case::new("The quick brown fox.", "sentence"),
    Case::new("can't stop", "apostrophe"),
    Case::new("pi is 3.14159, roughly", "decimal"),
    Case::new("a  b", "double space"),
    Case::new("(hello) [world]", "brackets"),
    Case::new("snake_case_name", "extend num let"),
    Case::new("e.g. this", "abbreviation"),
];

const LINE_CASES: &[Case] = &[
    Case::new("Hello, world! How are you?", "prose"),
    Case::new("foo-bar baz", "hyphen"),
    Case::new("a\nb", "lf"),
    Case::new("a\r\nb", "crlf"),
    Case::new("(abc) [def]", "brackets"),
    Case::new("\u{65E5}\u{672C}\u{8A9E}\u{306E}\u{672C}", "ideographs"),
    Case::new("x\u{200B}y", "zero width space"),
    Case::new("one\u{00A0}two three", "no-break space"),
    Case::new("Price: $12.50 now", "currency"),
    Case::new("\"quoted\" text", "quotes"),
    Case::new("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}", "family zwj"),
    Case::new("\u{1F469}\u{1F3FB}\u{200D}\u{1F4BB}", "modifier then zwj"),
    Case::new("\u{1F1FA}\u{1F1F8}\u{301}", "flag with mark"),
    Case::new("\u{1100}\u{1161}\u{301}", "jamo with mark"),
];

// =============================================================================
// Helpers
// =============================================================================

fn codepoints(s: &str) -> Vec<u32> {
    s.chars().map(u32::from).collect()
}

/// Translate byte offsets into codepoint gap indices.
fn to_gaps(s: &str, byte_offsets: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let offsets: Vec<usize> = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .collect();
    byte_offsets
        .into_iter()
        .filter_map(|b| offsets.iter().position(|&o| o == b))
        .collect()
}

fn flagged(bos: &[BreakOpportunity], pred: impl Fn(BreakOpportunity) -> bool) -> Vec<usize> {
    bos.iter()
        .enumerate()
        .filter(|(_, b)| pred(**b))
        .map(|(i, _)| i)
        .collect()
}

fn scan(input: &str) -> Vec<BreakOpportunity> {
    break_opportunities(&codepoints(input), &BreakOptions::new())
        .unwrap_or_else(|e| panic!("scan of {input:?} failed: {e}"))
}

// =============================================================================
// Graphemes
// =============================================================================

#[test]
fn grapheme_boundaries_match_reference() {
    for case in GRAPHEME_CASES {
        let bos = scan(case.input);
        let mut expected = to_gaps(
            case.input,
            case.input.grapheme_indices(true).map(|(i, _)| i),
        );
        expected.push(case.input.chars().count());
        let got = flagged(&bos, BreakOpportunity::is_grapheme_boundary);
        assert_eq!(
            got, expected,
            "grapheme case '{}' ({:?})",
            case.description, case.input
        );
    }
}

#[test]
fn cursor_positions_follow_clusters() {
    for case in GRAPHEME_CASES {
        let bos = scan(case.input);
        for (k, b) in bos.iter().enumerate() {
            assert_eq!(
                b.contains(BreakOpportunity::GB_CURSOR_POS),
                b.is_grapheme_boundary(),
                "cursor flag at gap {k} of '{}'",
                case.description
            );
        }
    }
}

// =============================================================================
// Words
// =============================================================================

#[test]
fn word_boundaries_match_reference() {
    for case in WORD_CASES {
        let bos = scan(case.input);
        let mut expected = to_gaps(
            case.input,
            case.input.split_word_bound_indices().map(|(i, _)| i),
        );
        expected.push(case.input.chars().count());
        let got = flagged(&bos, BreakOpportunity::is_word_boundary);
        assert_eq!(
            got, expected,
            "word case '{}' ({:?})",
            case.description, case.input
        );
    }
}

#[test]
fn word_starts_and_ends_bracket_words() {
    for case in WORD_CASES {
        let bos = scan(case.input);
        let starts = flagged(&bos, |b| b.contains(BreakOpportunity::WB_WORD_START)).len();
        let ends = flagged(&bos, |b| b.contains(BreakOpportunity::WB_WORD_END)).len();
        assert_eq!(starts, ends, "word case '{}'", case.description);
    }
}

// =============================================================================
// Lines
// =============================================================================

#[test]
fn line_breaks_match_reference() {
    for case in LINE_CASES {
        let bos = scan(case.input);
        let mut allowed = Vec::new();
        let mut mandatory = Vec::new();
        for (offset, op) in unicode_linebreak::linebreaks(case.input) {
            let gap = to_gaps(case.input, [offset]);
            match op {
                unicode_linebreak::BreakOpportunity::Allowed => allowed.extend(gap),
                unicode_linebreak::BreakOpportunity::Mandatory => mandatory.extend(gap),
            }
        }

        let got_allowed = flagged(&bos, |b| b.line_break() == LineBreakOpportunity::Allowed);
        let got_mandatory = flagged(&bos, |b| b.line_break() == LineBreakOpportunity::Mandatory);
        assert_eq!(
            got_allowed, allowed,
            "allowed breaks of '{}' ({:?})",
            case.description, case.input
        );
        assert_eq!(
            got_mandatory, mandatory,
            "mandatory breaks of '{}' ({:?})",
            case.description, case.input
        );
    }
}

#[test]
fn every_interior_gap_is_decided() {
    for case in LINE_CASES.iter().chain(WORD_CASES).chain(GRAPHEME_CASES) {
        let bos = scan(case.input);
        for (k, b) in bos.iter().enumerate().skip(1) {
            assert_ne!(
                b.line_break(),
                LineBreakOpportunity::Unknown,
                "gap {k} of '{}' left undecided",
                case.description
            );
        }
    }
}

#[test]
fn text_ends_carry_edge_flags() {
    for case in LINE_CASES.iter().chain(WORD_CASES).chain(GRAPHEME_CASES) {
        let bos = scan(case.input);
        let first = bos[0];
        let last = bos[bos.len() - 1];
        assert!(first.contains(BreakOpportunity::TEXT_EDGE), "{}", case.description);
        assert!(last.contains(BreakOpportunity::TEXT_EDGE), "{}", case.description);
        assert!(last.is_mandatory_break(), "{}", case.description);
    }
}
