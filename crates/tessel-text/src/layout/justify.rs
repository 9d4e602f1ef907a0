#![forbid(unsafe_code)]

//! Distribution of the free space of a justified line.
//!
//! The gap `max_extent - extent` is split over eligible glyphs as whole cell
//! units. Each eligible glyph gets `gap / count`; the remainder goes one
//! unit at a time to the first eligible glyphs, so the sum handed out is
//! exactly the gap whenever an eligible glyph exists.

use super::flags::TextJustify;
use super::{GlyphInfo, Hanged};
use crate::opportunity::BreakOpportunity;
use crate::props::is_wide;

/// Codepoints that separate words for spacing and justification.
pub(crate) const fn is_word_separator(uc: u32) -> bool {
    matches!(
        uc,
        0x0020 | 0x00A0 | 0x1361 | 0x10100 | 0x10101 | 0x1039F | 0x1091F
    )
}

/// The glyph starts a grapheme cluster.
pub(crate) fn is_typographic(breaks: &[BreakOpportunity], i: usize) -> bool {
    breaks[i].is_grapheme_boundary()
}

fn is_stretchable(glyph: &GlyphInfo) -> bool {
    !glyph.suppressed && glyph.hanged == Hanged::None
}

/// Give `amount` to `picks`, remainder first.
fn distribute(glyphs: &mut [GlyphInfo], picks: &[usize], amount: i32, vertical: bool) -> i32 {
    let Ok(count) = i32::try_from(picks.len()) else {
        return 0;
    };
    if count == 0 || amount <= 0 {
        return 0;
    }
    let per = amount / count;
    let mut left = amount % count;
    for &i in picks {
        let mut share = per;
        if left > 0 {
            share += 1;
            left -= 1;
        }
        glyphs[i].add_extra(share, vertical);
    }
    amount
}

/// Spread `gap` over `glyphs` and return the amount handed out.
pub(crate) fn justify(
    mode: TextJustify,
    glyphs: &mut [GlyphInfo],
    breaks: &[BreakOpportunity],
    gap: i32,
    vertical: bool,
) -> i32 {
    match mode {
        TextJustify::InterWord => {
            let words: Vec<usize> = (0..glyphs.len())
                .filter(|&i| is_stretchable(&glyphs[i]) && is_word_separator(glyphs[i].uc))
                .collect();
            distribute(glyphs, &words, gap, vertical)
        }
        TextJustify::InterCharacter => {
            let mut chars: Vec<usize> = (0..glyphs.len())
                .filter(|&i| {
                    is_stretchable(&glyphs[i])
                        && !is_word_separator(glyphs[i].uc)
                        && is_typographic(breaks, i)
                })
                .collect();
            // Space goes between characters, not after the last one.
            chars.pop();
            distribute(glyphs, &chars, gap, vertical)
        }
        TextJustify::Auto => {
            let mut words = Vec::new();
            let mut chars = Vec::new();
            for (i, glyph) in glyphs.iter().enumerate() {
                if !is_stretchable(glyph) {
                    continue;
                }
                if (is_word_separator(glyph.uc) && i != 0) || is_wide(glyph.uc, true) {
                    words.push(i);
                } else if is_typographic(breaks, i) {
                    chars.push(i);
                }
            }
            chars.pop();

            if chars.is_empty() {
                return distribute(glyphs, &words, gap, vertical);
            }
            let mut given = 0;
            if let Ok(count) = i32::try_from(words.len())
                && count > 0
            {
                let per = (gap * 2 / 3) / count;
                if per > 0 {
                    for &i in &words {
                        glyphs[i].add_extra(per, vertical);
                    }
                    given = per * count;
                }
            }
            given + distribute(glyphs, &chars, gap - given, vertical)
        }
    }
}
