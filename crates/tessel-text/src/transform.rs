#![forbid(unsafe_code)]

//! CSS `text-transform` style character transforms.
//!
//! The break engine applies these in place when asked to (see
//! [`crate::breaks::break_opportunities_mut`]). Only letters and U+0020 are
//! touched, and every transform maps one codepoint to one codepoint so the
//! break vector stays aligned.

use bitflags::bitflags;

bitflags! {
    /// Requested character transforms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CharTransform: u8 {
        /// No transform.
        const NONE           = 0x00;
        /// Uppercase the first letter of each word.
        const CAPITALIZE     = 0x01;
        /// Uppercase every letter.
        const UPPERCASE      = 0x02;
        /// Lowercase every letter.
        const LOWERCASE      = 0x04;
        /// Case transform mask.
        const CASE_MASK      = 0x07;
        /// Map printable ASCII and U+0020 to their full-width forms.
        const FULL_WIDTH     = 0x10;
        /// Map small kana to full-size kana.
        const FULL_SIZE_KANA = 0x20;
    }
}

/// The single case transform in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    Capitalize,
    Uppercase,
    Lowercase,
}

impl CharTransform {
    /// Case transform in effect. When several case bits are set, uppercase
    /// wins over lowercase, which wins over capitalize.
    pub fn case(self) -> Option<CaseTransform> {
        if self.contains(Self::UPPERCASE) {
            Some(CaseTransform::Uppercase)
        } else if self.contains(Self::LOWERCASE) {
            Some(CaseTransform::Lowercase)
        } else if self.contains(Self::CAPITALIZE) {
            Some(CaseTransform::Capitalize)
        } else {
            None
        }
    }

    /// Transform one codepoint. `word_start` is whether a word starts at it.
    #[must_use]
    pub fn apply(self, uc: u32, word_start: bool) -> u32 {
        let mut out = match self.case() {
            Some(CaseTransform::Uppercase) => to_upper(uc),
            Some(CaseTransform::Lowercase) => to_lower(uc),
            Some(CaseTransform::Capitalize) if word_start => to_upper(uc),
            _ => uc,
        };
        if self.contains(Self::FULL_WIDTH) {
            out = to_full_width(out);
        }
        if self.contains(Self::FULL_SIZE_KANA) {
            out = to_full_size_kana(out);
        }
        out
    }
}

// Multi-codepoint mappings (e.g. U+00DF) leave the codepoint unchanged.
fn single<I: Iterator<Item = char>>(mut mapped: I, uc: u32) -> u32 {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c as u32,
        _ => uc,
    }
}

fn to_upper(uc: u32) -> u32 {
    char::from_u32(uc).map_or(uc, |c| single(c.to_uppercase(), uc))
}

fn to_lower(uc: u32) -> u32 {
    char::from_u32(uc).map_or(uc, |c| single(c.to_lowercase(), uc))
}

/// Full-width form of printable ASCII; U+0020 becomes U+3000.
pub const fn to_full_width(uc: u32) -> u32 {
    match uc {
        0x20 => 0x3000,
        0x21..=0x7E => uc + (0xFF01 - 0x21),
        _ => uc,
    }
}

/// Small kana and their full-size counterparts, sorted by the small form.
const SMALL_KANA: &[(u32, u32)] = &[
    (0x3041, 0x3042),
    (0x3043, 0x3044),
    (0x3045, 0x3046),
    (0x3047, 0x3048),
    (0x3049, 0x304A),
    (0x3063, 0x3064),
    (0x3083, 0x3084),
    (0x3085, 0x3086),
    (0x3087, 0x3088),
    (0x308E, 0x308F),
    (0x3095, 0x304B),
    (0x3096, 0x3051),
    (0x30A1, 0x30A2),
    (0x30A3, 0x30A4),
    (0x30A5, 0x30A6),
    (0x30A7, 0x30A8),
    (0x30A9, 0x30AA),
    (0x30C3, 0x30C4),
    (0x30E3, 0x30E4),
    (0x30E5, 0x30E6),
    (0x30E7, 0x30E8),
    (0x30EE, 0x30EF),
    (0x30F5, 0x30AB),
    (0x30F6, 0x30B1),
    (0x31F0, 0x30AF),
    (0x31F1, 0x30B7),
    (0x31F2, 0x30B9),
    (0x31F3, 0x30C8),
    (0x31F4, 0x30CC),
    (0x31F5, 0x30CF),
    (0x31F6, 0x30D2),
    (0x31F7, 0x30D5),
    (0x31F8, 0x30D8),
    (0x31F9, 0x30DB),
    (0x31FA, 0x30E0),
    (0x31FB, 0x30E9),
    (0x31FC, 0x30EA),
    (0x31FD, 0x30EB),
    (0x31FE, 0x30EC),
    (0x31FF, 0x30ED),
    (0xFF67, 0xFF71),
    (0xFF68, 0xFF72),
    (0xFF69, 0xFF73),
    (0xFF6A, 0xFF74),
    (0xFF6B, 0xFF75),
    (0xFF6C, 0xFF94),
    (0xFF6D, 0xFF95),
    (0xFF6E, 0xFF96),
    (0xFF6F, 0xFF82),
];

/// Full-size form of a small kana; anything else is returned unchanged.
pub fn to_full_size_kana(uc: u32) -> u32 {
    SMALL_KANA
        .binary_search_by_key(&uc, |&(small, _)| small)
        .map_or(uc, |i| SMALL_KANA[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kana_table_is_sorted() {
        assert!(SMALL_KANA.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(SMALL_KANA.len(), 49);
    }

    #[test]
    fn full_size_kana() {
        assert_eq!(to_full_size_kana(0x3041), 0x3042);
        assert_eq!(to_full_size_kana(0x30C3), 0x30C4);
        assert_eq!(to_full_size_kana(0xFF6F), 0xFF82);
        assert_eq!(to_full_size_kana(0x3042), 0x3042);
        assert_eq!(to_full_size_kana('a' as u32), 'a' as u32);
    }

    #[test]
    fn full_width() {
        assert_eq!(to_full_width(' ' as u32), 0x3000);
        assert_eq!(to_full_width('!' as u32), 0xFF01);
        assert_eq!(to_full_width('A' as u32), 0xFF21);
        assert_eq!(to_full_width('~' as u32), 0xFF5E);
        assert_eq!(to_full_width(0x7F), 0x7F);
        assert_eq!(to_full_width(0x3042), 0x3042);
    }

    #[test]
    fn case_precedence() {
        assert_eq!(CharTransform::NONE.case(), None);
        assert_eq!(
            CharTransform::CAPITALIZE.case(),
            Some(CaseTransform::Capitalize)
        );
        assert_eq!(
            (CharTransform::LOWERCASE | CharTransform::CAPITALIZE).case(),
            Some(CaseTransform::Lowercase)
        );
        assert_eq!(CharTransform::CASE_MASK.case(), Some(CaseTransform::Uppercase));
    }

    #[test]
    fn apply_case() {
        assert_eq!(CharTransform::UPPERCASE.apply('a' as u32, false), 'A' as u32);
        assert_eq!(CharTransform::LOWERCASE.apply('Q' as u32, true), 'q' as u32);
        assert_eq!(CharTransform::CAPITALIZE.apply('w' as u32, true), 'W' as u32);
        assert_eq!(CharTransform::CAPITALIZE.apply('w' as u32, false), 'w' as u32);
        // Sharp s has no single-codepoint uppercase.
        assert_eq!(CharTransform::UPPERCASE.apply(0xDF, false), 0xDF);
    }

    #[test]
    fn apply_chains_case_then_width() {
        let t = CharTransform::UPPERCASE | CharTransform::FULL_WIDTH;
        assert_eq!(t.apply('a' as u32, false), 0xFF21);
        let kana = CharTransform::FULL_SIZE_KANA;
        assert_eq!(kana.apply(0x30A1, false), 0x30A2);
    }
}
