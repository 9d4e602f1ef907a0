#![forbid(unsafe_code)]

//! Emoji presentation scanner.
//!
//! Splits a codepoint sequence into maximal runs that render with emoji
//! presentation or with text presentation. Each codepoint is first mapped to
//! an [`EmojiCategory`]; a small recursive-descent matcher then recognizes
//! these sequences over the categories:
//!
//! | sequence              | shape                                   | presentation |
//! |-----------------------|-----------------------------------------|--------------|
//! | text variation        | `emoji VS15`                            | text         |
//! | presentation variation| `emoji VS16`                            | emoji        |
//! | modifier              | `modifier-base modifier`                | emoji        |
//! | flag                  | `RI RI`                                 | emoji        |
//! | keycap                | `keycap-base VS16? U+20E3`              | emoji        |
//! | tag                   | `U+1F3F4 tag+ U+E007F`                  | emoji        |
//! | ZWJ                   | `element (ZWJ element)+`                | emoji        |
//! | circle backslash      | `element U+20E0`                        | emoji        |
//!
//! Anything else is one codepoint long; it is emoji when its default
//! presentation is emoji. Adjacent tokens with the same presentation merge.

use std::iter::FusedIterator;

use tracing::trace;

use crate::classify::{EmojiCategory, emoji_category};

/// A maximal run of one presentation, `start..end` in codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmojiRun {
    pub start: usize,
    pub end: usize,
    /// Rendered with emoji presentation.
    pub is_emoji: bool,
}

impl EmojiRun {
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Iterator over the [`EmojiRun`]s of a codepoint sequence.
///
/// Runs are disjoint, in increasing order, and together cover the whole
/// input. Once exhausted it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct EmojiIter {
    categories: Vec<EmojiCategory>,
    pos: usize,
}

impl EmojiIter {
    /// Categorize `text` for scanning.
    pub fn new(text: &[u32]) -> Self {
        Self {
            categories: text.iter().map(|&uc| emoji_category(uc)).collect(),
            pos: 0,
        }
    }

    /// The scanner category of every codepoint.
    #[must_use]
    pub fn categories(&self) -> &[EmojiCategory] {
        &self.categories
    }
}

impl Iterator for EmojiIter {
    type Item = EmojiRun;

    fn next(&mut self) -> Option<EmojiRun> {
        let matcher = Matcher {
            cats: &self.categories,
        };
        let start = self.pos;
        let (mut end, is_emoji) = matcher.token(start)?;
        while let Some((next_end, next_emoji)) = matcher.token(end)
            && next_emoji == is_emoji
        {
            end = next_end;
        }
        self.pos = end;
        trace!(start, end, is_emoji, "emoji run");
        Some(EmojiRun {
            start,
            end,
            is_emoji,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.categories.len() - self.pos;
        (usize::from(left > 0), Some(left))
    }
}

impl FusedIterator for EmojiIter {}

// =============================================================================
// Matcher
// =============================================================================

use EmojiCategory as C;

/// Categories that can carry a variation selector or join a ZWJ sequence.
const fn is_any_emoji(cat: EmojiCategory) -> bool {
    matches!(
        cat,
        C::EmojiPresentation
            | C::TextPresentation
            | C::Emoji
            | C::Modifier
            | C::ModifierBase
            | C::RegionalIndicator
            | C::KeycapBase
            | C::TagBase
    )
}

/// Categories presented as emoji when they stand alone.
const fn is_default_emoji(cat: EmojiCategory) -> bool {
    matches!(
        cat,
        C::EmojiPresentation
            | C::Modifier
            | C::ModifierBase
            | C::RegionalIndicator
            | C::TagBase
    )
}

/// Each rule takes a start index and returns the end of its match.
struct Matcher<'a> {
    cats: &'a [EmojiCategory],
}

impl Matcher<'_> {
    fn at(&self, i: usize) -> Option<EmojiCategory> {
        self.cats.get(i).copied()
    }

    fn is(&self, i: usize, cat: EmojiCategory) -> bool {
        self.at(i) == Some(cat)
    }

    /// The longest token at `i` and its presentation.
    fn token(&self, i: usize) -> Option<(usize, bool)> {
        let first = self.at(i)?;
        if let Some(end) = self
            .tag_sequence(i)
            .or_else(|| self.keycap(i))
            .or_else(|| self.zwj_sequence(i))
        {
            return Some((end, true));
        }
        if let Some(end) = self.text_variation(i) {
            return Some((end, false));
        }
        if let Some(end) = self.flag(i).or_else(|| self.modifier_sequence(i)) {
            return Some((self.circle_backslash(end), true));
        }
        if let Some(end) = self.presentation_variation(i) {
            return Some((self.circle_backslash(end), true));
        }
        if is_default_emoji(first) {
            return Some((self.circle_backslash(i + 1), true));
        }
        Some((i + 1, false))
    }

    /// `U+1F3F4 tag+ U+E007F`
    fn tag_sequence(&self, i: usize) -> Option<usize> {
        if !self.is(i, C::TagBase) {
            return None;
        }
        let mut j = i + 1;
        while self.is(j, C::TagSequence) {
            j += 1;
        }
        (j > i + 1 && self.is(j, C::TagTerm)).then_some(j + 1)
    }

    /// `keycap-base VS16? U+20E3`
    fn keycap(&self, i: usize) -> Option<usize> {
        if !self.is(i, C::KeycapBase) {
            return None;
        }
        let j = if self.is(i + 1, C::EmojiVariation) {
            i + 2
        } else {
            i + 1
        };
        self.is(j, C::Keycap).then_some(j + 1)
    }

    /// `RI RI`
    fn flag(&self, i: usize) -> Option<usize> {
        (self.is(i, C::RegionalIndicator) && self.is(i + 1, C::RegionalIndicator))
            .then_some(i + 2)
    }

    /// `modifier-base modifier`
    fn modifier_sequence(&self, i: usize) -> Option<usize> {
        (self.is(i, C::ModifierBase) && self.is(i + 1, C::Modifier)).then_some(i + 2)
    }

    /// `emoji VS15`
    fn text_variation(&self, i: usize) -> Option<usize> {
        (self.at(i).is_some_and(is_any_emoji) && self.is(i + 1, C::TextVariation))
            .then_some(i + 2)
    }

    /// `emoji VS16`
    fn presentation_variation(&self, i: usize) -> Option<usize> {
        (self.at(i).is_some_and(is_any_emoji) && self.is(i + 1, C::EmojiVariation))
            .then_some(i + 2)
    }

    /// Extends `end` over a trailing U+20E0.
    fn circle_backslash(&self, end: usize) -> usize {
        if self.is(end, C::CircleBackslash) {
            end + 1
        } else {
            end
        }
    }

    /// One member of a ZWJ sequence.
    fn zwj_element(&self, i: usize) -> Option<usize> {
        let end = self
            .flag(i)
            .or_else(|| self.modifier_sequence(i))
            .or_else(|| self.presentation_variation(i))
            .or_else(|| {
                self.at(i)
                    .is_some_and(|cat| is_any_emoji(cat) && cat != C::KeycapBase)
                    .then_some(i + 1)
            })?;
        Some(self.circle_backslash(end))
    }

    /// `element (ZWJ element)+`
    fn zwj_sequence(&self, i: usize) -> Option<usize> {
        let mut end = self.zwj_element(i)?;
        let mut joined = false;
        while self.is(end, C::Zwj)
            && let Some(next) = self.zwj_element(end + 1)
        {
            end = next;
            joined = true;
        }
        joined.then_some(end)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn emojiish() -> impl Strategy<Value = u32> {
        prop_oneof![
            Just(0x61u32),
            Just(0x31),
            Just(0x200D),
            Just(0xFE0E),
            Just(0xFE0F),
            Just(0x20E3),
            Just(0x20E0),
            Just(0x2764),
            Just(0x1F600),
            Just(0x1F44D),
            Just(0x1F3FD),
            Just(0x1F1FA),
            Just(0x1F3F4),
            Just(0xE0067),
            Just(0xE007F),
            any::<char>().prop_map(u32::from),
        ]
    }

    proptest! {
        #[test]
        fn runs_partition_the_input(text in prop::collection::vec(emojiish(), 0..40)) {
            let runs: Vec<EmojiRun> = EmojiIter::new(&text).collect();
            let mut expected_start = 0;
            for run in &runs {
                prop_assert_eq!(run.start, expected_start);
                prop_assert!(!run.is_empty());
                expected_start = run.end;
            }
            prop_assert_eq!(expected_start, text.len());
            for pair in runs.windows(2) {
                prop_assert_ne!(pair[0].is_emoji, pair[1].is_emoji);
            }
        }
    }
}
