#![forbid(unsafe_code)]

//! ISO 639-1 language codes.
//!
//! [`Language`] enumerates the two-letter codes in alphabetical order, so the
//! code table doubles as a binary-search index.
//!
//! # Example
//! ```
//! use tessel_core::language::Language;
//!
//! let zh = Language::from_code("zh").unwrap();
//! assert_eq!(zh, Language::Chinese);
//! assert_eq!(zh.code(), "zh");
//! assert_eq!("ZH".parse::<Language>(), Ok(Language::Chinese));
//! ```

use std::fmt;
use std::str::FromStr;

macro_rules! languages {
    ($($name:ident => $code:literal,)+) => {
        /// A language identified by its ISO 639-1 code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[non_exhaustive]
        pub enum Language {
            $(
                #[doc = concat!("`", $code, "`")]
                $name,
            )+
        }

        /// Every language with its code, sorted by code.
        const CODES: &[(&str, Language)] = &[
            $(($code, Language::$name),)+
        ];
    };
}

languages! {
    Afar => "aa",
    Abkhazian => "ab",
    Afrikaans => "af",
    Amharic => "am",
    Arabic => "ar",
    Assamese => "as",
    Aymara => "ay",
    Azerbaijani => "az",
    Bashkir => "ba",
    Belarusian => "be",
    Bulgarian => "bg",
    Bihari => "bh",
    Bislama => "bi",
    Bengali => "bn",
    Tibetan => "bo",
    Breton => "br",
    Catalan => "ca",
    Corsican => "co",
    Czech => "cs",
    Welsh => "cy",
    Danish => "da",
    German => "de",
    Divehi => "dv",
    Dzongkha => "dz",
    Greek => "el",
    English => "en",
    Esperanto => "eo",
    Spanish => "es",
    Estonian => "et",
    Basque => "eu",
    Persian => "fa",
    Finnish => "fi",
    Fijian => "fj",
    Faroese => "fo",
    French => "fr",
    Frisian => "fy",
    Irish => "ga",
    ScottishGaelic => "gd",
    Galician => "gl",
    Guarani => "gn",
    Gujarati => "gu",
    Hausa => "ha",
    Hebrew => "he",
    Hindi => "hi",
    Croatian => "hr",
    Hungarian => "hu",
    Armenian => "hy",
    Interlingua => "ia",
    Indonesian => "id",
    Interlingue => "ie",
    Inupiak => "ik",
    FormerIndonesian => "in",
    Icelandic => "is",
    Italian => "it",
    Inuktitut => "iu",
    FormerHebrew => "iw",
    Japanese => "ja",
    FormerYiddish => "ji",
    Javanese => "jw",
    Georgian => "ka",
    Kazakh => "kk",
    Greenlandic => "kl",
    Khmer => "km",
    Kannada => "kn",
    Korean => "ko",
    Kashmiri => "ks",
    Kurdish => "ku",
    Kirghiz => "ky",
    Latin => "la",
    Lingala => "ln",
    Lao => "lo",
    Lithuanian => "lt",
    Latvian => "lv",
    Malagasy => "mg",
    Maori => "mi",
    Macedonian => "mk",
    Malayalam => "ml",
    Mongolian => "mn",
    Moldavian => "mo",
    Marathi => "mr",
    Malay => "ms",
    Maltese => "mt",
    Burmese => "my",
    Nauru => "na",
    Nepali => "ne",
    Dutch => "nl",
    Norwegian => "no",
    Occitan => "oc",
    Oromo => "om",
    Oriya => "or",
    Punjabi => "pa",
    Polish => "pl",
    Pashto => "ps",
    Portuguese => "pt",
    Quechua => "qu",
    Romansh => "rm",
    Kirundi => "rn",
    Romanian => "ro",
    Russian => "ru",
    Kinyarwanda => "rw",
    Sanskrit => "sa",
    Sindhi => "sd",
    Sango => "sg",
    SerboCroatian => "sh",
    Sinhalese => "si",
    Slovak => "sk",
    Slovenian => "sl",
    Samoan => "sm",
    Shona => "sn",
    Somali => "so",
    Albanian => "sq",
    Serbian => "sr",
    Siswati => "ss",
    Sesotho => "st",
    Sundanese => "su",
    Swedish => "sv",
    Swahili => "sw",
    Tamil => "ta",
    Telugu => "te",
    Tajik => "tg",
    Thai => "th",
    Tigrinya => "ti",
    Turkmen => "tk",
    Tagalog => "tl",
    Setswana => "tn",
    Tonga => "to",
    Turkish => "tr",
    Tsonga => "ts",
    Tatar => "tt",
    Twi => "tw",
    Uyghur => "ug",
    Ukrainian => "uk",
    Urdu => "ur",
    Uzbek => "uz",
    Vietnamese => "vi",
    Volapuk => "vo",
    Wolof => "wo",
    Xhosa => "xh",
    Yiddish => "yi",
    Yoruba => "yo",
    Zhuang => "za",
    Chinese => "zh",
    Zulu => "zu",
}

impl Language {
    /// Look up a lowercase two-letter code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        CODES
            .binary_search_by(|(c, _)| (*c).cmp(code))
            .ok()
            .map(|idx| CODES[idx].1)
    }

    /// The two-letter code.
    #[must_use]
    pub fn code(self) -> &'static str {
        // Discriminants follow table order.
        CODES[self as usize].0
    }

    /// Iterate over every known language in code order.
    pub fn all() -> impl Iterator<Item = Language> {
        CODES.iter().map(|(_, lang)| *lang)
    }

    /// Primary opening and closing quotation marks.
    ///
    /// Languages without a specific convention use English curly quotes.
    #[must_use]
    pub const fn quotation_marks(self) -> (char, char) {
        use Language::*;
        match self {
            German | Czech | Slovak | Bulgarian | Estonian | Lithuanian | Icelandic
            | Georgian => ('\u{201E}', '\u{201C}'),
            Polish | Hungarian | Romanian | Croatian | Dutch => ('\u{201E}', '\u{201D}'),
            French | Russian | Ukrainian | Belarusian | Spanish | Italian | Portuguese
            | Greek | Catalan | Norwegian | Arabic | Persian | Armenian | Basque => {
                ('\u{AB}', '\u{BB}')
            }
            Danish => ('\u{BB}', '\u{AB}'),
            Swedish | Finnish => ('\u{201D}', '\u{201D}'),
            Japanese => ('\u{300C}', '\u{300D}'),
            _ => ('\u{201C}', '\u{201D}'),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::from_code(&lower).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn from_code_agrees_with_linear_scan(code in "[a-z]{2}") {
            let linear = CODES.iter().find(|(c, _)| *c == code).map(|(_, l)| *l);
            prop_assert_eq!(Language::from_code(&code), linear);
        }
    }
}
