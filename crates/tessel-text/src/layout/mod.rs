#![forbid(unsafe_code)]

//! Glyph line layout on a fixed cell grid.
//!
//! [`layout_line`] takes a codepoint run with its break opportunities and
//! fills one line: it measures glyphs in cell units, wraps at the last
//! permitted break before the maximum extent, trims or hangs edge spaces and
//! punctuation, justifies, and positions every glyph for the writing mode.
//!
//! A glyph value is its codepoint; there is no shaping. Wide codepoints take
//! two cells, everything else one.
//!
//! ```
//! use tessel_text::{BreakOptions, LayoutParams, break_opportunities, layout_line};
//!
//! let text: Vec<u32> = "ab cd".chars().map(u32::from).collect();
//! let bos = break_opportunities(&text, &BreakOptions::default()).unwrap();
//! let line = layout_line(&text, &bos, &LayoutParams::new().max_extent(2)).unwrap();
//! assert_eq!(line.consumed, 3);
//! ```

mod flags;
mod justify;

use std::ops::Range;

use tessel_core::{Language, LineBox, Point};
use tracing::{debug, trace};

use crate::error::{Result, TextError};
use crate::opportunity::BreakOpportunity;
use crate::props::{GeneralCategory, general_category, is_wide};

pub use flags::{
    GlyphOrientation, HangingPunctuation, OverflowWrap, RenderFlags, SpaceTrim, TextAlign,
    TextJustify, TextOrientation, WritingMode,
};

const TAB: u32 = 0x09;
const SPACE: u32 = 0x20;
const IDEOGRAPHIC_SPACE: u32 = 0x3000;

/// Size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellMetrics {
    /// Cell width.
    pub width: i32,
    /// Cell height.
    pub height: i32,
    /// Treat East Asian ambiguous-width codepoints as wide.
    pub ambiguous_wide: bool,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            ambiguous_wide: false,
        }
    }
}

/// Inputs of one [`layout_line`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub flags: RenderFlags,
    pub metrics: CellMetrics,
    /// Position of the line start.
    pub origin: Point,
    /// Extra advance after each typographic character.
    pub letter_spacing: i32,
    /// Extra advance after each word separator.
    pub word_spacing: i32,
    /// Tab stop interval; `<= 0` suppresses tabs.
    pub tab_size: i32,
    /// Maximum line extent; `<= 0` means unconstrained.
    pub max_extent: i32,
    /// Content language, for its quotation marks.
    pub language: Option<Language>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutParams {
    /// Horizontal, unconstrained, 1x1 cells, tab stops every 8 cells.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: RenderFlags::default(),
            metrics: CellMetrics::default(),
            origin: Point::ZERO,
            letter_spacing: 0,
            word_spacing: 0,
            tab_size: 8,
            max_extent: 0,
            language: None,
        }
    }

    #[must_use]
    pub fn flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn letter_spacing(mut self, letter_spacing: i32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    #[must_use]
    pub fn word_spacing(mut self, word_spacing: i32) -> Self {
        self.word_spacing = word_spacing;
        self
    }

    #[must_use]
    pub fn tab_size(mut self, tab_size: i32) -> Self {
        self.tab_size = tab_size;
        self
    }

    #[must_use]
    pub fn max_extent(mut self, max_extent: i32) -> Self {
        self.max_extent = max_extent;
        self
    }

    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// Which line edge a glyph hangs past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hanged {
    #[default]
    None,
    Start,
    End,
}

/// Extents of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphInfo {
    pub uc: u32,
    /// Ink box relative to the glyph origin.
    pub bbox: LineBox,
    pub adv_x: i32,
    pub adv_y: i32,
    /// Advance along the line, spacing included.
    pub line_adv: i32,
    /// Letter, word, and justification spacing.
    pub extra_x: i32,
    pub extra_y: i32,
    /// Takes no room and is not drawn.
    pub suppressed: bool,
    pub whitespace: bool,
    pub hanged: Hanged,
    pub orientation: GlyphOrientation,
    /// Draw an ellipsis in place of this glyph.
    pub ellipsis: bool,
}

impl GlyphInfo {
    pub(crate) const fn new(uc: u32) -> Self {
        Self {
            uc,
            bbox: LineBox::new(0, 0, 0, 0),
            adv_x: 0,
            adv_y: 0,
            line_adv: 0,
            extra_x: 0,
            extra_y: 0,
            suppressed: false,
            whitespace: false,
            hanged: Hanged::None,
            orientation: GlyphOrientation::Upright,
            ellipsis: false,
        }
    }

    fn set_advance(&mut self, advance: i32, vertical: bool) {
        self.line_adv = advance;
        if vertical {
            self.adv_y = advance;
        } else {
            self.adv_x = advance;
        }
    }

    pub(crate) fn add_extra(&mut self, extra: i32, vertical: bool) {
        self.line_adv += extra;
        if vertical {
            self.extra_y += extra;
        } else {
            self.extra_x += extra;
        }
    }

    /// Drop every extent, keeping the codepoint.
    fn suppress(&mut self) {
        *self = Self {
            suppressed: true,
            whitespace: self.whitespace,
            ..Self::new(self.uc)
        };
    }

    const fn step(&self) -> (i32, i32) {
        (self.adv_x + self.extra_x, self.adv_y + self.extra_y)
    }
}

/// Absolute position of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphPos {
    pub x: i32,
    pub y: i32,
    /// Advance along the line.
    pub advance: i32,
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineLayout {
    /// Codepoints taken into this line.
    pub consumed: usize,
    /// One entry per consumed codepoint.
    pub glyphs: Vec<GlyphInfo>,
    /// One entry per consumed codepoint.
    pub positions: Vec<GlyphPos>,
    /// Bounding box of every positioned glyph.
    pub line: LineBox,
    /// Extent of the unhanged glyphs before justification.
    pub extent: i32,
}

// =============================================================================
// Glyph classes
// =============================================================================

const fn is_hard_break(uc: u32) -> bool {
    matches!(uc, 0x0A..=0x0D | 0x85 | 0x2028 | 0x2029)
}

/// Stops and commas that may hang at the line end.
const fn is_stop_or_comma(uc: u32) -> bool {
    matches!(
        uc,
        0x002C // COMMA
            | 0x002E // FULL STOP
            | 0x060C // ARABIC COMMA
            | 0x06D4 // ARABIC FULL STOP
            | 0x3001 // IDEOGRAPHIC COMMA
            | 0x3002 // IDEOGRAPHIC FULL STOP
            | 0xFF0C // FULLWIDTH COMMA
            | 0xFF0E // FULLWIDTH FULL STOP
            | 0xFE50 // SMALL COMMA
            | 0xFE51 // SMALL IDEOGRAPHIC COMMA
            | 0xFE52 // SMALL FULL STOP
            | 0xFF61 // HALFWIDTH IDEOGRAPHIC FULL STOP
            | 0xFF64 // HALFWIDTH IDEOGRAPHIC COMMA
    )
}

const fn is_ascii_quote(uc: u32) -> bool {
    matches!(uc, 0x22 | 0x27)
}

const fn is_directional_quote(gc: GeneralCategory) -> bool {
    matches!(
        gc,
        GeneralCategory::InitialPunctuation | GeneralCategory::FinalPunctuation
    )
}

// =============================================================================
// Layout
// =============================================================================

/// Lay out the line starting at `text[0]`.
///
/// `breaks` must come from the break engine for the same `text`: entry `i`
/// is the gap before glyph `i`, entry `i + 1` the gap after it.
///
/// # Errors
///
/// [`TextError::EmptyInput`] for empty text,
/// [`TextError::BreakLengthMismatch`] when `breaks` is not one longer than
/// `text`, and [`TextError::Alloc`] when the glyph buffers cannot grow.
pub fn layout_line(
    text: &[u32],
    breaks: &[BreakOpportunity],
    params: &LayoutParams,
) -> Result<LineLayout> {
    if text.is_empty() {
        return Err(TextError::EmptyInput);
    }
    if breaks.len() != text.len() + 1 {
        return Err(TextError::BreakLengthMismatch {
            expected: text.len() + 1,
            found: breaks.len(),
        });
    }

    let mut line = Line::new(text, breaks, params);
    line.glyphs.try_reserve(text.len())?;
    line.fill();
    line.trim_spaces();
    line.hang_punctuation();
    Ok(line.finish())
}

/// Working state of one layout call.
struct Line<'a> {
    text: &'a [u32],
    breaks: &'a [BreakOpportunity],
    params: &'a LayoutParams,
    vertical: bool,
    glyphs: Vec<GlyphInfo>,
    /// Running extent of the taken glyphs.
    extent: i32,
    /// Cross-axis size of the line.
    line_width: i32,
    overflowed: bool,
    /// Last glyph hanging at the start.
    hanged_start: Option<usize>,
    /// First glyph hanging at the end.
    hanged_end: usize,
}

impl<'a> Line<'a> {
    fn new(text: &'a [u32], breaks: &'a [BreakOpportunity], params: &'a LayoutParams) -> Self {
        let vertical = params.flags.writing_mode.is_vertical();
        Self {
            text,
            breaks,
            params,
            vertical,
            glyphs: Vec::new(),
            extent: 0,
            line_width: if vertical {
                params.metrics.width
            } else {
                params.metrics.height
            },
            overflowed: false,
            hanged_start: None,
            hanged_end: 0,
        }
    }

    /// Cell size along the line.
    const fn unit(&self) -> i32 {
        if self.vertical {
            self.params.metrics.height
        } else {
            self.params.metrics.width
        }
    }

    fn measure(&mut self, i: usize) -> GlyphInfo {
        let uc = self.text[i];
        let after = self.breaks[i + 1];
        let metrics = self.params.metrics;
        let mut glyph = GlyphInfo::new(uc);

        if uc == TAB {
            let tab = self.params.tab_size;
            if tab > 0 {
                let mut stops = self.extent / tab + 1;
                let mut advance = stops * tab - self.extent;
                if advance < self.unit() {
                    stops += 1;
                    advance = stops * tab - self.extent;
                }
                glyph.set_advance(advance, self.vertical);
                glyph.whitespace = true;
            } else {
                glyph.suppressed = true;
            }
        } else if is_hard_break(uc) {
            glyph.suppressed = true;
            glyph.whitespace = true;
        } else if after.contains(BreakOpportunity::WHITESPACE) {
            glyph.whitespace = true;
            glyph.bbox = LineBox::new(0, 0, metrics.width, metrics.height);
            glyph.set_advance(self.unit(), self.vertical);
        } else if after.contains(BreakOpportunity::ZERO_WIDTH) {
            glyph.suppressed = true;
        } else {
            let wide = is_wide(uc, metrics.ambiguous_wide);
            let width = if wide { metrics.width * 2 } else { metrics.width };
            glyph.bbox = LineBox::new(0, 0, width, metrics.height);
            if self.vertical {
                self.line_width = self.line_width.max(width);
                glyph.set_advance(metrics.height, true);
                if !wide && self.params.flags.orientation == TextOrientation::Mixed {
                    glyph.orientation = GlyphOrientation::Sideways;
                }
            } else {
                glyph.set_advance(width, false);
            }
        }

        if !glyph.suppressed {
            let extra = if justify::is_word_separator(uc) {
                self.params.word_spacing
            } else if justify::is_typographic(self.breaks, i) {
                self.params.letter_spacing
            } else {
                0
            };
            if extra != 0 {
                glyph.add_extra(extra, self.vertical);
            }
        }
        glyph
    }

    /// Last gap in `1..=upto` where the overflow-wrap policy allows a break.
    fn find_break(&self, upto: usize) -> Option<usize> {
        (1..=upto).rev().find(|&g| {
            let bo = self.breaks[g];
            match self.params.flags.overflow_wrap {
                OverflowWrap::Normal => bo.is_line_break(),
                OverflowWrap::BreakWord => bo.is_word_boundary(),
                OverflowWrap::Anywhere => bo.is_grapheme_boundary(),
            }
        })
    }

    fn push(&mut self, glyph: GlyphInfo) {
        self.extent += glyph.line_adv;
        self.glyphs.push(glyph);
    }

    /// Take glyphs until a mandatory break, or until the maximum extent is
    /// reached and a break position is found.
    fn fill(&mut self) {
        let max = self.params.max_extent;
        let mut test_overflow = max > 0 && self.params.flags.white_space.wraps();
        let mut forced = false;

        while self.glyphs.len() < self.text.len() {
            let i = self.glyphs.len();
            let glyph = self.measure(i);
            if test_overflow && self.extent + glyph.line_adv > max {
                if let Some(g) = self.find_break(i) {
                    trace!(gap = g, "wrap at break");
                    self.glyphs.truncate(g);
                    self.extent = self.glyphs.iter().map(|g| g.line_adv).sum();
                    break;
                }
                trace!(glyph = i, "no break before overflow");
                self.overflowed = true;
                test_overflow = false;
                forced = true;
            }

            self.push(glyph);
            let gap = self.breaks[i + 1];
            if gap.is_mandatory_break() {
                break;
            }
            // One overflowing glyph, kept with the rest of its cluster.
            if forced && gap.is_grapheme_boundary() {
                break;
            }
        }

        if max > 0 && self.extent > max {
            self.overflowed = true;
        }
        self.hanged_end = self.glyphs.len();
    }

    fn trim_spaces(&mut self) {
        let spaces = self.params.flags.spaces;
        let n = self.glyphs.len();

        if spaces.contains(SpaceTrim::REMOVE_START) {
            for glyph in self.glyphs.iter_mut().take_while(|g| g.uc == SPACE) {
                self.extent -= glyph.line_adv;
                glyph.suppress();
            }
        }

        let trailing = (1..n)
            .rev()
            .take_while(|&i| matches!(self.glyphs[i].uc, SPACE | IDEOGRAPHIC_SPACE));
        if spaces.contains(SpaceTrim::REMOVE_END) {
            for i in trailing.collect::<Vec<_>>() {
                self.extent -= self.glyphs[i].line_adv;
                self.glyphs[i].suppress();
            }
        } else if spaces.contains(SpaceTrim::HANG_END) {
            for i in trailing.collect::<Vec<_>>() {
                self.glyphs[i].hanged = Hanged::End;
                self.hanged_end = self.hanged_end.min(i);
            }
        }
    }

    /// Visible, unhanged glyph that starts a cluster.
    fn is_normal(&self, i: usize) -> bool {
        let glyph = &self.glyphs[i];
        !glyph.suppressed && glyph.hanged == Hanged::None && self.breaks[i].is_grapheme_boundary()
    }

    /// Opening brackets and quotes. `«` and `»` open or close depending on
    /// the language, so with a language set only its own opening mark counts.
    fn is_opening(&self, uc: u32) -> bool {
        let gc = general_category(uc);
        gc == GeneralCategory::OpenPunctuation
            || is_ascii_quote(uc)
            || match self.params.language {
                Some(lang) => u32::from(lang.quotation_marks().0) == uc,
                None => is_directional_quote(gc),
            }
    }

    fn is_closing(&self, uc: u32) -> bool {
        let gc = general_category(uc);
        gc == GeneralCategory::ClosePunctuation
            || is_ascii_quote(uc)
            || match self.params.language {
                Some(lang) => u32::from(lang.quotation_marks().1) == uc,
                None => is_directional_quote(gc),
            }
    }

    fn hang_end(&mut self, i: usize) {
        self.glyphs[i].hanged = Hanged::End;
        self.hanged_end = self.hanged_end.min(i);
    }

    fn hang_punctuation(&mut self) {
        let hanging = self.params.flags.hanging;
        let n = self.glyphs.len();

        if hanging.contains(HangingPunctuation::FIRST)
            && let Some(first) = (0..n).find(|&i| self.is_normal(i))
            && self.is_opening(self.glyphs[first].uc)
        {
            self.glyphs[first].hanged = Hanged::Start;
            self.hanged_start = Some(first);
        }

        let last = (1..n).rev().find(|&i| self.is_normal(i));
        if n > 1
            && hanging.contains(HangingPunctuation::LAST)
            && let Some(last) = last
            && self.is_closing(self.glyphs[last].uc)
        {
            self.hang_end(last);
        }

        if hanging.contains(HangingPunctuation::FORCE_END) {
            if let Some(last) = (1..n).rev().find(|&i| self.is_normal(i))
                && is_stop_or_comma(self.glyphs[last].uc)
            {
                self.hang_end(last);
            }
        } else if hanging.contains(HangingPunctuation::ALLOW_END)
            && n < self.text.len()
            && !self.breaks[n].is_mandatory_break()
            && is_stop_or_comma(self.text[n])
        {
            let mut glyph = self.measure(n);
            glyph.hanged = Hanged::End;
            self.push(glyph);
            self.hanged_end = self.hanged_end.min(n);
        }

        let hanged: i32 = self
            .hanged_start
            .map_or(0..0, |s| 0..s + 1)
            .chain(self.hanged_end..self.glyphs.len())
            .map(|i| self.glyphs[i].line_adv)
            .sum();
        self.extent -= hanged;
    }

    /// Position `range` consecutively, the first glyph at `offset` along the
    /// line.
    fn place(&self, positions: &mut [GlyphPos], range: Range<usize>, offset: i32) {
        let mut x = if self.vertical { 0 } else { offset };
        let mut y = if self.vertical { offset } else { 0 };
        for i in range {
            let glyph = &self.glyphs[i];
            positions[i] = GlyphPos {
                x,
                y,
                advance: glyph.line_adv,
            };
            let (dx, dy) = glyph.step();
            x += dx;
            y += dy;
        }
    }

    /// Origin and cross-axis centering.
    fn anchor(&self, glyph: &GlyphInfo, pos: &mut GlyphPos) {
        let origin = self.params.origin;
        pos.x += origin.x;
        pos.y += origin.y;
        if glyph.orientation == GlyphOrientation::Upright {
            let inset = (self.line_width - glyph.bbox.width) / 2;
            match self.params.flags.writing_mode {
                WritingMode::VerticalRl => pos.x -= inset,
                WritingMode::VerticalLr => pos.x += inset,
                WritingMode::HorizontalTb => {}
            }
        }
    }

    fn finish(mut self) -> LineLayout {
        let n = self.glyphs.len();
        let flags = self.params.flags;
        let max = self.params.max_extent;
        let mut positions = vec![GlyphPos::default(); n];

        let first = self.hanged_start.map_or(0, |s| s + 1);
        let stop = self.hanged_end.max(first);

        if let Some(s) = self.hanged_start {
            let width: i32 = self.glyphs[..=s].iter().map(|g| g.line_adv).sum();
            self.place(&mut positions, 0..s + 1, -width);
        }
        if stop < n {
            let at = if max > 0 { max.max(self.extent) } else { self.extent };
            self.place(&mut positions, stop..n, at);
        }

        let gap = max - self.extent;
        let mut justified = 0;
        if flags.align == TextAlign::Justify && max > 0 && gap > 0 {
            justified = justify::justify(
                flags.justify,
                &mut self.glyphs[first..stop],
                &self.breaks[first..=stop],
                gap,
                self.vertical,
            );
        }
        self.place(&mut positions, first..stop, 0);

        let shift = match flags.align {
            _ if max <= 0 || gap <= 0 => 0,
            TextAlign::End | TextAlign::Right => gap,
            TextAlign::Center => gap / 2,
            TextAlign::Start | TextAlign::Left | TextAlign::Justify => 0,
        };
        for pos in &mut positions[first..stop] {
            if self.vertical {
                pos.y += shift;
            } else {
                pos.x += shift;
            }
        }

        if flags.ellipsize
            && self.overflowed
            && let Some(last) = (first..stop).rev().find(|&i| !self.glyphs[i].suppressed)
        {
            self.glyphs[last].ellipsis = true;
        }

        for (glyph, pos) in self.glyphs.iter().zip(positions.iter_mut()) {
            self.anchor(glyph, pos);
        }

        let line = self.bounding_box(&positions);
        debug!(
            consumed = n,
            extent = self.extent,
            gap,
            justified,
            overflowed = self.overflowed,
            "line layout"
        );
        LineLayout {
            consumed: n,
            glyphs: self.glyphs,
            positions,
            line,
            extent: self.extent,
        }
    }

    fn bounding_box(&self, positions: &[GlyphPos]) -> LineBox {
        let origin = self.params.origin;
        let along = |pos: &GlyphPos| if self.vertical { pos.y } else { pos.x };
        let start = positions.iter().map(along).min().unwrap_or(0);
        let end = positions
            .iter()
            .zip(&self.glyphs)
            .map(|(pos, glyph)| {
                let (dx, dy) = glyph.step();
                along(pos) + if self.vertical { dy } else { dx }
            })
            .max()
            .unwrap_or(start);
        if self.vertical {
            LineBox::new(origin.x, start, self.line_width, end - start)
        } else {
            LineBox::new(start, origin.y, end - start, self.line_width)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::breaks::{BreakOptions, break_opportunities};
    use proptest::prelude::*;

    fn words() -> impl Strategy<Value = String> {
        "[a-z\u{4E00}-\u{4E20}]{1,6}( [a-z\u{4E00}-\u{4E20}]{1,6}){0,6}"
    }

    proptest! {
        #[test]
        fn consumes_at_least_one(text in words(), max in 0i32..12) {
            let cps: Vec<u32> = text.chars().map(u32::from).collect();
            let bos = break_opportunities(&cps, &BreakOptions::default()).unwrap();
            let line = layout_line(&cps, &bos, &LayoutParams::new().max_extent(max)).unwrap();
            prop_assert!(line.consumed >= 1);
            prop_assert!(line.consumed <= cps.len());
            prop_assert_eq!(line.glyphs.len(), line.consumed);
            prop_assert_eq!(line.positions.len(), line.consumed);
        }

        #[test]
        fn fits_unless_forced(text in words(), max in 2i32..12) {
            let cps: Vec<u32> = text.chars().map(u32::from).collect();
            let bos = break_opportunities(&cps, &BreakOptions::default()).unwrap();
            let line = layout_line(&cps, &bos, &LayoutParams::new().max_extent(max)).unwrap();
            let trailing_space = line.glyphs.last().is_some_and(|g| g.uc == 0x20);
            let slack = if trailing_space { 1 } else { 0 };
            // A line over the limit is a single unbreakable run plus one glyph.
            if line.extent > max + slack {
                prop_assert!(bos[1..line.consumed].iter().all(|b| !b.is_line_break()));
            }
        }

        #[test]
        fn justification_is_conserved(text in words(), max in 1i32..40) {
            let cps: Vec<u32> = text.chars().map(u32::from).collect();
            let bos = break_opportunities(&cps, &BreakOptions::default()).unwrap();
            let params = LayoutParams::new()
                .max_extent(max)
                .flags(RenderFlags::new().justify(TextJustify::Auto));
            let line = layout_line(&cps, &bos, &params).unwrap();
            let extra: i32 = line.glyphs.iter().map(|g| g.extra_x).sum();
            let gap = max - line.extent;
            let eligible = line.glyphs.len() > 2
                || line.glyphs.iter().any(|g| g.uc == 0x20 || is_wide(g.uc, true));
            if gap > 0 && eligible {
                prop_assert_eq!(extra, gap);
            }
        }
    }
}
