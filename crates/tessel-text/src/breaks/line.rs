#![forbid(unsafe_code)]

//! The UAX#14 line-break rule cascade.
//!
//! One forward pass over the codepoints. For each codepoint the scanner
//! pushes a gap record, then walks LB3..LB30b, each rule fixing the decision
//! at the gap after the current cluster (`change_last`) or before it
//! (`change_before_last`). A few rules consume a bounded run of following
//! codepoints (CR LF, combining marks, spaces after `OP`, Hangul syllables,
//! regional indicator pairs) and push them directly.
//!
//! Every gap carries the ordinal of the rule that decided it. A later rule
//! may only overwrite a decision made by a rule with the same or a higher
//! ordinal, and a mandatory break is final.

use std::ops::ControlFlow;

use tracing::trace;

use super::segment::SegmentState;
use super::{BreakOptions, LineBreak, WordBreak};
use crate::classify::resolve_line_class;
use crate::opportunity::{BreakOpportunity, LineBreakOpportunity};
use crate::props::{BreakClass, GeneralCategory, general_category, is_letter, line_break_class};

use crate::props::BreakClass::{
    After as BA, Alphabetic as AL, Before as BB, BeforeAndAfter as B2, CarriageReturn as CR,
    CloseParenthesis as CP, ClosePunctuation as CL, CombiningMark as CM, Contingent as CB,
    EmojiBase as EB, EmojiModifier as EM, Exclamation as EX, HangulLJamo as JL,
    HangulLvSyllable as H2, HangulLvtSyllable as H3, HangulTJamo as JT, HangulVJamo as JV,
    HebrewLetter as HL, Hyphen as HY, Ideographic as ID, InfixSeparator as IS,
    Inseparable as IN, LineFeed as LF, Mandatory as BK, NextLine as NL, NonBreakingGlue as GL,
    NonStarter as NS, Numeric as NU, OpenPunctuation as OP, Postfix as PO, Prefix as PR,
    Quotation as QU, RegionalIndicator as RI, Space as SP, Symbol as SY, WordJoiner as WJ,
    ZeroWidthJoiner as ZWJ, ZeroWidthSpace as ZW,
};

use LineBreakOpportunity::{Allowed, Mandatory, NotAllowed, Unknown};

/// Line-break rules in precedence order. Lower ordinals win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum LineRule {
    Lb1,
    Lb2,
    Lb3,
    Lb4,
    Lb5,
    Lb6,
    Lb7,
    Lb8,
    Lb8a,
    Lb9,
    Lb10,
    Lb11,
    Lb12,
    Lb12a,
    Lb13,
    Lb14,
    Lb15,
    Lb16,
    Lb17,
    Lb18,
    Lb19,
    Lb20,
    Lb21,
    Lb21a,
    Lb21b,
    Lb22,
    Lb23,
    Lb23a,
    Lb24,
    Lb25,
    Lb26,
    Lb27,
    Lb28,
    Lb29,
    Lb30,
    Lb30a,
    Lb30b,
    Lb31,
    /// Undecided.
    Last,
}

/// Line-break record of one gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Annotation {
    /// Resolved class of the codepoint before the gap; `None` at gap 0.
    pub class: Option<BreakClass>,
    pub opportunity: LineBreakOpportunity,
    /// Rule that decided `opportunity`.
    pub rule: LineRule,
}

const fn is_jamo(class: BreakClass) -> bool {
    matches!(class, JL | JV | JT | H2 | H3)
}

/// LB26: whether `next` continues the Korean syllable ending in `prev`.
const fn jamo_continues(prev: BreakClass, next: BreakClass) -> bool {
    match prev {
        JL => matches!(next, JL | JV | H2 | H3),
        JV | H2 => matches!(next, JV | JT),
        JT | H3 => matches!(next, JT),
        _ => false,
    }
}

/// Pairs kept together by LB25 under strict line breaking.
const STRICT_NUMERIC_PAIRS: &[(BreakClass, BreakClass)] = &[
    (CL, PO),
    (CL, PR),
    (CP, PO),
    (CP, PR),
    (NU, PO),
    (NU, PR),
    (PO, OP),
    (PO, NU),
    (PR, OP),
    (PR, NU),
    (HY, NU),
    (IS, NU),
    (NU, NU),
    (SY, NU),
];

/// Context of one break scan.
pub(crate) struct ScanState<'a> {
    text: &'a [u32],
    options: &'a BreakOptions,
    bos: &'a mut Vec<BreakOpportunity>,
    annotations: &'a mut Vec<Annotation>,
    segments: SegmentState,
    /// Next codepoint to read.
    pos: usize,
    /// Rule currently firing.
    rule: LineRule,
    /// Gap before the current cluster.
    cluster_gap: usize,
}

impl<'a> ScanState<'a> {
    /// Both buffers must be empty with room for `text.len() + 1` entries.
    pub(crate) fn new(
        text: &'a [u32],
        options: &'a BreakOptions,
        bos: &'a mut Vec<BreakOpportunity>,
        annotations: &'a mut Vec<Annotation>,
    ) -> Self {
        // LB2: never break at the start of text.
        annotations.push(Annotation {
            class: None,
            opportunity: NotAllowed,
            rule: LineRule::Lb2,
        });
        bos.push(BreakOpportunity::empty());
        Self {
            text,
            options,
            bos,
            annotations,
            segments: SegmentState::default(),
            pos: 0,
            rule: LineRule::Lb1,
            cluster_gap: 0,
        }
    }

    pub(crate) fn run(mut self) {
        while self.pos < self.text.len() {
            let _ = self.step();
        }
        self.finish();
    }

    // =========================================================================
    // Gap bookkeeping
    // =========================================================================

    fn push(&mut self, uc: u32, class: BreakClass, opportunity: LineBreakOpportunity) {
        let rule = if opportunity == Unknown {
            LineRule::Last
        } else {
            self.rule
        };
        self.annotations.push(Annotation {
            class: Some(class),
            opportunity,
            rule,
        });
        self.bos.push(BreakOpportunity::empty());
        let k = self.bos.len() - 2;
        self.segments.feed(uc, k, &mut self.bos[..]);
    }

    fn set(&mut self, gap: usize, opportunity: LineBreakOpportunity) {
        let rule = self.rule;
        let ann = &mut self.annotations[gap];
        let applies = match ann.opportunity {
            Unknown => true,
            Mandatory => false,
            _ => rule <= ann.rule,
        };
        if applies {
            ann.opportunity = opportunity;
            ann.rule = rule;
            trace!(gap, ?rule, ?opportunity, "line rule");
        }
    }

    fn change_last(&mut self, opportunity: LineBreakOpportunity) {
        self.set(self.annotations.len() - 1, opportunity);
    }

    /// Gap 0 belongs to LB2, which outranks every rule that reaches here.
    fn change_before_last(&mut self, opportunity: LineBreakOpportunity) {
        self.set(self.cluster_gap, opportunity);
    }

    fn fire(&mut self, rule: LineRule) -> &mut Self {
        self.rule = rule;
        self
    }

    // =========================================================================
    // Lookahead and lookbehind
    // =========================================================================

    fn resolve(&self, uc: u32) -> BreakClass {
        resolve_line_class(
            line_break_class(uc),
            general_category(uc),
            self.options.word_break,
            None,
        )
    }

    fn peek(&self) -> Option<(u32, BreakClass)> {
        self.text.get(self.pos).map(|&uc| (uc, self.resolve(uc)))
    }

    fn next_class(&self) -> Option<BreakClass> {
        self.peek().map(|(_, class)| class)
    }

    fn next_is(&self, pred: impl Fn(BreakClass) -> bool) -> bool {
        self.next_class().is_some_and(pred)
    }

    /// `SP* end` follows the cursor.
    fn spaces_then(&self, end: BreakClass) -> bool {
        self.text[self.pos..]
            .iter()
            .map(|&uc| self.resolve(uc))
            .find(|&class| class != SP)
            == Some(end)
    }

    /// `(OP | HY)? NU` follows the cursor.
    fn numeric_ahead(&self) -> bool {
        match self.next_class() {
            Some(NU) => true,
            Some(OP | HY) => self
                .text
                .get(self.pos + 1)
                .is_some_and(|&uc| self.resolve(uc) == NU),
            _ => false,
        }
    }

    /// Push the spaces after the cursor with breaks after them prohibited.
    fn consume_spaces(&mut self) -> bool {
        let start = self.pos;
        while let Some((uc, SP)) = self.peek() {
            self.push(uc, SP, NotAllowed);
            self.pos += 1;
        }
        self.pos > start
    }

    fn prev_class(&self) -> Option<BreakClass> {
        self.annotations[self.cluster_gap].class
    }

    /// The codepoints before `gap` end in `NU (NU | SY | IS)*`.
    fn preceded_by_number(&self, mut gap: usize) -> bool {
        while gap > 0 {
            match self.annotations[gap].class {
                Some(NU) => return true,
                Some(SY | IS) => gap -= 1,
                _ => return false,
            }
        }
        false
    }

    // =========================================================================
    // Rule cascade
    // =========================================================================

    fn step(&mut self) -> ControlFlow<()> {
        let uc = self.text[self.pos];
        self.pos += 1;

        // LB1
        self.rule = LineRule::Lb1;
        let gc = general_category(uc);
        let class = self.resolve(uc);

        self.rule = LineRule::Last;
        self.cluster_gap = self.annotations.len() - 1;
        self.push(uc, class, Unknown);

        if self.pos == self.text.len() {
            self.fire(LineRule::Lb3).change_last(Mandatory);
        }

        self.hard_breaks(class);
        if self.options.line_break == LineBreak::Anywhere {
            return ControlFlow::Break(());
        }
        self.zero_width(class)?;

        let class = self.combining_marks(class);
        self.glue(gc, class)?;
        self.closing(class);
        self.opening(class)?;
        self.spaces_and_quotes(class)?;
        if self.options.line_break != LineBreak::Loose {
            self.letters_and_affixes(class);
        }
        self.numbers(class);
        self.syllables_and_words(class)
    }

    /// LB4-LB6.
    fn hard_breaks(&mut self, class: BreakClass) {
        match class {
            BK => {
                self.fire(LineRule::Lb4).change_last(Mandatory);
                self.fire(LineRule::Lb6).change_before_last(NotAllowed);
            }
            CR if self.next_class() == Some(LF) => {
                self.fire(LineRule::Lb5).change_last(NotAllowed);
                self.fire(LineRule::Lb6).change_before_last(NotAllowed);
                self.rule = LineRule::Lb5;
                let lf = self.text[self.pos];
                self.push(lf, LF, Mandatory);
                self.pos += 1;
            }
            CR | LF | NL => {
                self.fire(LineRule::Lb5).change_last(Mandatory);
                self.fire(LineRule::Lb6).change_before_last(NotAllowed);
            }
            _ => {}
        }
    }

    /// LB7-LB8. Hard breaks stop here too.
    fn zero_width(&mut self, class: BreakClass) -> ControlFlow<()> {
        match class {
            BK | CR | LF | NL => return ControlFlow::Break(()),
            SP | ZW => self.fire(LineRule::Lb7).change_before_last(NotAllowed),
            _ => {}
        }

        if class == ZW {
            // LB8: break after ZW, even across spaces.
            self.rule = LineRule::Lb8;
            while let Some((uc, SP)) = self.peek() {
                self.change_last(NotAllowed);
                self.push(uc, SP, NotAllowed);
                self.pos += 1;
            }
            self.change_last(Allowed);
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    /// LB8a-LB10. Returns the class the remaining rules see.
    fn combining_marks(&mut self, class: BreakClass) -> BreakClass {
        if class == ZWJ {
            self.fire(LineRule::Lb8a).change_last(NotAllowed);
            return class;
        }

        let base = if class == CM { AL } else { class };
        if class != SP && self.absorb_marks(base) {
            return base;
        }

        if class == CM {
            self.rule = LineRule::Lb10;
            return AL;
        }
        class
    }

    /// LB9: keep the CM/ZWJ run after the cursor with `base`, whose class the
    /// marks take. Returns whether any mark followed.
    fn absorb_marks(&mut self, base: BreakClass) -> bool {
        let mark_follows = self
            .text
            .get(self.pos)
            .is_some_and(|&uc| matches!(line_break_class(uc), CM | ZWJ));
        if !mark_follows {
            return false;
        }

        self.fire(LineRule::Lb9).change_last(NotAllowed);
        let mut last = base;
        while let Some(&uc) = self.text.get(self.pos) {
            let raw = line_break_class(uc);
            if !matches!(raw, CM | ZWJ) {
                break;
            }
            let inherited =
                resolve_line_class(raw, general_category(uc), self.options.word_break, Some(base));
            self.push(uc, inherited, NotAllowed);
            self.pos += 1;
            last = raw;
        }
        if last == ZWJ {
            self.fire(LineRule::Lb8a).change_last(NotAllowed);
        } else {
            self.change_last(Unknown);
        }
        true
    }

    /// LB11, LB12, keep-all, LB12a.
    fn glue(&mut self, gc: GeneralCategory, class: BreakClass) -> ControlFlow<()> {
        match class {
            WJ => {
                self.fire(LineRule::Lb11).change_last(NotAllowed);
                self.change_before_last(NotAllowed);
            }
            GL => self.fire(LineRule::Lb12).change_last(NotAllowed),
            _ => {}
        }

        if self.options.word_break == WordBreak::KeepAll
            && is_letter(gc, class)
            && self
                .peek()
                .is_some_and(|(uc, next)| is_letter(general_category(uc), next))
        {
            self.fire(LineRule::Lb12a).change_last(NotAllowed);
            return ControlFlow::Break(());
        }

        if !matches!(class, SP | BA | HY) && self.next_class() == Some(GL) {
            self.fire(LineRule::Lb12a).change_last(NotAllowed);
        }
        ControlFlow::Continue(())
    }

    /// LB13 per strictness.
    fn closing(&mut self, class: BreakClass) {
        match self.options.line_break {
            LineBreak::Loose => {
                if class == EX {
                    self.fire(LineRule::Lb13).change_before_last(NotAllowed);
                }
            }
            LineBreak::Normal => {
                if class != NU && self.next_is(|next| matches!(next, CL | CP | IS | SY)) {
                    self.fire(LineRule::Lb13).change_last(NotAllowed);
                }
                if class == EX {
                    self.fire(LineRule::Lb13).change_before_last(NotAllowed);
                }
            }
            LineBreak::Strict | LineBreak::Anywhere => {
                if matches!(class, CL | CP | EX | IS | SY) {
                    self.fire(LineRule::Lb13).change_before_last(NotAllowed);
                }
            }
        }
    }

    /// LB14, LB15.
    fn opening(&mut self, class: BreakClass) -> ControlFlow<()> {
        if class == OP {
            self.fire(LineRule::Lb14).change_last(NotAllowed);
            if self.consume_spaces() {
                return ControlFlow::Break(());
            }
        } else if class == QU && self.spaces_then(OP) {
            self.fire(LineRule::Lb15).change_last(NotAllowed);
            self.fire(LineRule::Lb19).change_before_last(NotAllowed);
            self.rule = LineRule::Lb15;
            if self.consume_spaces() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// LB16-LB22.
    fn spaces_and_quotes(&mut self, class: BreakClass) -> ControlFlow<()> {
        if matches!(class, CL | CP) && self.spaces_then(NS) {
            self.fire(LineRule::Lb16).change_last(NotAllowed);
            if self.consume_spaces() {
                return ControlFlow::Break(());
            }
        } else if class == B2 && self.spaces_then(B2) {
            self.fire(LineRule::Lb17).change_last(NotAllowed);
            if self.consume_spaces() {
                return ControlFlow::Break(());
            }
        } else if class == SP {
            self.fire(LineRule::Lb18).change_last(Allowed);
        } else if class == QU {
            self.fire(LineRule::Lb19).change_last(NotAllowed);
            self.change_before_last(NotAllowed);
        } else if class == CB {
            self.fire(LineRule::Lb20).change_last(Allowed);
            self.change_before_last(Allowed);
        } else if matches!(class, BA | HY | NS) {
            self.fire(LineRule::Lb21).change_before_last(NotAllowed);
            if class != NS && self.prev_class() == Some(HL) {
                self.fire(LineRule::Lb21a).change_last(NotAllowed);
            }
        } else if class == BB {
            self.fire(LineRule::Lb21).change_last(NotAllowed);
        } else if class == SY && self.next_class() == Some(HL) {
            self.fire(LineRule::Lb21b).change_last(NotAllowed);
        } else if matches!(class, HL | AL | EX | ID | EB | EM | IN | NU)
            && self.next_class() == Some(IN)
        {
            self.fire(LineRule::Lb22).change_last(NotAllowed);
        }
        ControlFlow::Continue(())
    }

    /// LB23-LB24. Not applied under loose line breaking.
    fn letters_and_affixes(&mut self, class: BreakClass) {
        let Some(next) = self.next_class() else {
            return;
        };
        let rule = match (class, next) {
            (HL | AL, NU) | (NU, AL | HL) => LineRule::Lb23,
            (PR, ID | EB | EM) | (ID | EB | EM, PO) => LineRule::Lb23a,
            (PR | PO, AL | HL) | (AL | HL, PR | PO) => LineRule::Lb24,
            _ => return,
        };
        self.fire(rule).change_last(NotAllowed);
    }

    /// LB25 per strictness.
    fn numbers(&mut self, class: BreakClass) {
        let next = self.next_class();
        match self.options.line_break {
            LineBreak::Loose => {
                let keep = matches!(
                    (class, next),
                    (NU, Some(PO | PR | NU)) | (PO | PR | HY, Some(NU))
                );
                if keep {
                    self.fire(LineRule::Lb25).change_last(NotAllowed);
                }
            }
            LineBreak::Normal => {
                let keep = (matches!(class, PR | PO) && self.numeric_ahead())
                    || (matches!(class, OP | HY) && next == Some(NU))
                    || (class == NU && matches!(next, Some(NU | SY | IS)));
                if keep {
                    self.fire(LineRule::Lb25).change_last(NotAllowed);
                }

                if matches!(class, NU | SY | IS | CL | CP) && self.preceded_by_number(self.cluster_gap)
                {
                    self.fire(LineRule::Lb25).change_before_last(NotAllowed);
                }
                if matches!(class, PO | PR) {
                    let mut gap = self.cluster_gap;
                    if gap > 0 && matches!(self.annotations[gap].class, Some(CL | CP)) {
                        gap -= 1;
                    }
                    if self.preceded_by_number(gap) {
                        self.fire(LineRule::Lb25).change_before_last(NotAllowed);
                    }
                }
            }
            LineBreak::Strict | LineBreak::Anywhere => {
                if next.is_some_and(|next| STRICT_NUMERIC_PAIRS.contains(&(class, next))) {
                    self.fire(LineRule::Lb25).change_last(NotAllowed);
                }
            }
        }
    }

    /// LB26-LB30b.
    fn syllables_and_words(&mut self, class: BreakClass) -> ControlFlow<()> {
        if is_jamo(class) {
            let mut last = class;
            while let Some((uc, next)) = self.peek()
                && jamo_continues(last, next)
            {
                self.fire(LineRule::Lb26).change_last(NotAllowed);
                self.push(uc, next, Unknown);
                self.pos += 1;
                last = next;
            }
            self.absorb_marks(last);
            if self.next_is(|next| matches!(next, IN | PO)) {
                self.fire(LineRule::Lb27).change_last(NotAllowed);
            }
            return ControlFlow::Break(());
        }

        let Some((next_uc, next)) = self.peek() else {
            return ControlFlow::Break(());
        };
        match (class, next) {
            (PR, _) if is_jamo(next) => self.fire(LineRule::Lb27).change_last(NotAllowed),
            (AL | HL, AL | HL) => self.fire(LineRule::Lb28).change_last(NotAllowed),
            (IS, AL | HL) => self.fire(LineRule::Lb29).change_last(NotAllowed),
            (AL | HL | NU, OP) | (CP, AL | HL | NU) => {
                self.fire(LineRule::Lb30).change_last(NotAllowed);
            }
            (RI, RI) => {
                self.fire(LineRule::Lb30a).change_last(NotAllowed);
                self.push(next_uc, RI, Unknown);
                self.pos += 1;
                self.absorb_marks(RI);
            }
            (EB, EM) => {
                self.fire(LineRule::Lb30b).change_last(NotAllowed);
                self.push(next_uc, EM, Unknown);
                self.pos += 1;
                self.absorb_marks(EM);
            }
            _ => {}
        }
        ControlFlow::Break(())
    }

    // =========================================================================
    // End of text
    // =========================================================================

    fn finish(self) {
        let n = self.text.len();

        // LB31: break everywhere else.
        for ann in &mut self.annotations[1..] {
            if ann.opportunity == Unknown {
                ann.opportunity = Allowed;
                ann.rule = LineRule::Lb31;
            }
        }
        // LB3 also covers text ending inside a consumed run.
        let last = &mut self.annotations[n];
        if last.opportunity != Mandatory {
            last.opportunity = Mandatory;
            last.rule = LineRule::Lb3;
        }

        for (bo, ann) in self.bos.iter_mut().zip(self.annotations.iter()) {
            bo.set_line_break(ann.opportunity);
        }
        // GB1/GB2, WB1/WB2, SB1/SB2.
        self.bos[0] |= BreakOpportunity::TEXT_EDGE;
        self.bos[n] |= BreakOpportunity::TEXT_EDGE;
    }
}
