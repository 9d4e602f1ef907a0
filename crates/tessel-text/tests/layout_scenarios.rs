//! End-to-end layout scenarios.
//!
//! Drives the whole pipeline the way a terminal host does: split a byte
//! buffer into paragraphs, compute break opportunities, then lay out lines
//! until each paragraph is consumed.

use tessel_text::{
    BreakOptions, EmojiIter, HangingPunctuation, LayoutParams, LineLayout, RenderFlags,
    SpaceTrim, TextAlign, TextError, TextJustify, TextPolicy, WhiteSpace, WritingMode,
    break_opportunities, layout_line, split_paragraph,
};

// =============================================================================
// Helpers
// =============================================================================

/// Every paragraph of `bytes`, skipping empty ones.
fn paragraphs(bytes: &[u8], white_space: WhiteSpace) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        match split_paragraph(rest, white_space) {
            Ok(para) => {
                rest = &rest[para.consumed..];
                out.push(para.codepoints);
            }
            Err(TextError::EmptyParagraph { consumed }) => rest = &rest[consumed..],
            Err(e) => panic!("split failed: {e}"),
        }
    }
    out
}

/// Lay out `text` line by line.
fn lines(text: &[u32], params: &LayoutParams) -> Vec<LineLayout> {
    let bos = break_opportunities(text, &BreakOptions::new()).expect("break scan");
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let line = layout_line(&text[pos..], &bos[pos..], params).expect("layout");
        pos += line.consumed;
        out.push(line);
    }
    out
}

fn visible(line: &LineLayout) -> String {
    line.glyphs
        .iter()
        .filter(|g| !g.suppressed)
        .filter_map(|g| char::from_u32(g.uc))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn wrap(text: &str, params: &LayoutParams) -> Vec<String> {
    let cps: Vec<u32> = text.chars().map(u32::from).collect();
    lines(&cps, params).iter().map(visible).collect()
}

// =============================================================================
// Paragraphs
// =============================================================================

#[test]
fn buffer_splits_into_paragraphs() {
    let paras = paragraphs(b"first  para\n\nsecond\r\nthird", WhiteSpace::Normal);
    let text: Vec<String> = paras
        .iter()
        .map(|p| p.iter().filter_map(|&c| char::from_u32(c)).collect())
        .collect();
    assert_eq!(text, vec!["first para", "second", "third"]);
}

#[test]
fn preformatted_paragraph_keeps_its_break() {
    let paras = paragraphs(b"a  b\nc", WhiteSpace::Pre);
    assert_eq!(paras[0], vec![0x61, 0x20, 0x20, 0x62, 0x0A]);
    assert_eq!(paras[1], vec![0x63]);

    // The kept break is laid out as an invisible glyph.
    let laid = lines(&paras[0], &LayoutParams::new());
    assert_eq!(laid.len(), 1);
    assert!(laid[0].glyphs[4].suppressed);
    assert_eq!(laid[0].extent, 4);
}

// =============================================================================
// Wrapping
// =============================================================================

#[test]
fn prose_wraps_at_spaces() {
    let params = LayoutParams::new().max_extent(10);
    assert_eq!(
        wrap("the quick brown fox jumps over the lazy dog", &params),
        vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
    );
}

#[test]
fn every_codepoint_lands_in_exactly_one_line() {
    let text: Vec<u32> = "wrap me into some narrow lines, please"
        .chars()
        .map(u32::from)
        .collect();
    for max in [1, 3, 7, 12, 100] {
        let laid = lines(&text, &LayoutParams::new().max_extent(max));
        let total: usize = laid.iter().map(|l| l.consumed).sum();
        assert_eq!(total, text.len(), "max extent {max}");
        assert!(laid.iter().all(|l| l.consumed > 0));
    }
}

#[test]
fn ideographs_wrap_between_characters() {
    let params = LayoutParams::new().max_extent(4);
    assert_eq!(
        wrap("\u{65E5}\u{672C}\u{8A9E}\u{306E}\u{672C}", &params),
        vec!["\u{65E5}\u{672C}", "\u{8A9E}\u{306E}", "\u{672C}"]
    );
}

#[test]
fn trimmed_lines_start_flush() {
    let params = LayoutParams::new().max_extent(5).flags(
        RenderFlags::new().spaces(SpaceTrim::REMOVE_START | SpaceTrim::REMOVE_END),
    );
    let cps: Vec<u32> = "ab cd ef".chars().map(u32::from).collect();
    for line in lines(&cps, &params) {
        let first = line
            .glyphs
            .iter()
            .position(|g| !g.suppressed)
            .expect("visible glyph");
        assert_eq!(line.positions[first].x, 0);
        assert!(line.extent <= 5);
    }
}

// =============================================================================
// Alignment and justification
// =============================================================================

#[test]
fn right_aligned_lines_end_at_the_edge() {
    let params = LayoutParams::new()
        .max_extent(8)
        .flags(RenderFlags::new().align(TextAlign::Right).spaces(SpaceTrim::REMOVE_END));
    let cps: Vec<u32> = "one two three".chars().map(u32::from).collect();
    for line in lines(&cps, &params) {
        let last = line
            .glyphs
            .iter()
            .rposition(|g| !g.suppressed)
            .expect("visible glyph");
        let end = line.positions[last].x + line.glyphs[last].adv_x;
        assert_eq!(end, 8);
    }
}

#[test]
fn justified_lines_fill_the_measure() {
    let params = LayoutParams::new()
        .max_extent(12)
        .flags(RenderFlags::new().justify(TextJustify::InterWord));
    let cps: Vec<u32> = "aa bb cc dd ee ff gg".chars().map(u32::from).collect();
    let laid = lines(&cps, &params);
    assert_eq!(laid.len(), 2);
    for line in &laid {
        let extra: i32 = line.glyphs.iter().map(|g| g.extra_x).sum();
        assert_eq!(line.extent + extra, 12);
    }
    // "ee ff gg": the gap of 4 goes to the two spaces.
    assert_eq!(laid[1].glyphs[2].extra_x, 2);
    assert_eq!(laid[1].glyphs[5].extra_x, 2);
}

// =============================================================================
// Hanging punctuation and vertical text
// =============================================================================

#[test]
fn quotes_hang_on_both_sides() {
    let params = LayoutParams::new().flags(
        RenderFlags::new().hanging(HangingPunctuation::FIRST | HangingPunctuation::LAST),
    );
    let cps: Vec<u32> = "\u{201C}hi\u{201D}".chars().map(u32::from).collect();
    let laid = lines(&cps, &params);
    assert_eq!(laid.len(), 1);
    assert_eq!(laid[0].extent, 2);
    assert_eq!(laid[0].positions[0].x, -1);
    assert_eq!(laid[0].positions[3].x, 2);
}

#[test]
fn vertical_lines_advance_downwards() {
    let params = LayoutParams::new()
        .max_extent(3)
        .flags(RenderFlags::new().writing_mode(WritingMode::VerticalRl));
    let cps: Vec<u32> = "\u{4E00}\u{4E8C}\u{4E09}\u{56DB}".chars().map(u32::from).collect();
    let laid = lines(&cps, &params);
    // One cell of height per ideograph.
    assert_eq!(laid.iter().map(|l| l.consumed).collect::<Vec<_>>(), vec![3, 1]);
    let ys: Vec<i32> = laid[0].positions.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![0, 1, 2]);
    assert!(laid[0].positions.iter().all(|p| p.x == 0));
}

// =============================================================================
// Emoji and policy
// =============================================================================

#[test]
fn emoji_runs_cover_a_paragraph() {
    let paras = paragraphs("hi \u{1F44B}\u{1F3FD} there\n".as_bytes(), WhiteSpace::Normal);
    let runs: Vec<_> = EmojiIter::new(&paras[0]).collect();
    assert_eq!(runs.len(), 3);
    assert_eq!((runs[1].start, runs[1].end, runs[1].is_emoji), (3, 5, true));
    assert_eq!(runs.last().map(|r| r.end), Some(paras[0].len()));
}

#[test]
fn policy_drives_the_pipeline() {
    let policy = TextPolicy::from_env_with(|key| match key {
        "TESSEL_TAB_SIZE" => Some("4".to_string()),
        "TESSEL_LINE_BREAK" => Some("anywhere".to_string()),
        _ => None,
    });
    let cps: Vec<u32> = "ab\tcdefgh".chars().map(u32::from).collect();
    let bos = break_opportunities(&cps, &policy.break_options()).expect("break scan");
    let line = layout_line(&cps, &bos, &policy.layout_params().max_extent(6)).expect("layout");
    // Tab snaps to 4, then "cd" fills the line.
    assert_eq!(line.glyphs[2].adv_x, 2);
    assert_eq!(line.consumed, 5);
}
