// src/core/types.rs
use crate::error::LipiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The Unicode code point that suppresses a consonant's inherent vowel.
pub const HALANT: char = '\u{094d}';

/// The script a text span is dominated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Devanagari,
    Latin,
}

impl Script {
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Latin => "latin",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way a transliteration runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToDevanagari,
    ToLatin,
}

impl Direction {
    /// The direction that converts *out of* the given script.
    pub fn out_of(script: Script) -> Self {
        match script {
            Script::Devanagari => Direction::ToLatin,
            Script::Latin => Direction::ToDevanagari,
        }
    }

    /// Parses an optional direction name. `None` and `"auto"` both mean
    /// "let the detector decide".
    pub fn parse_optional(name: Option<&str>) -> Result<Option<Self>, LipiError> {
        match name.map(str::trim) {
            None | Some("auto") => Ok(None),
            Some(name) => name.parse().map(Some),
        }
    }
}

impl FromStr for Direction {
    type Err = LipiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "roman_to_devanagari" | "to-devanagari" | "to_devanagari" | "devanagari" => {
                Ok(Direction::ToDevanagari)
            }
            "devanagari_to_roman" | "to-latin" | "to_latin" | "latin" | "roman" => {
                Ok(Direction::ToLatin)
            }
            other => Err(LipiError::InvalidDirection(other.to_string())),
        }
    }
}

/// The class of a mapping-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Vowel,
    Consonant,
    Conjunct,
    Punctuation,
    /// Anusvara and visarga. Only present on the Devanagari side.
    Diacritic,
    Matra,
}

/// A classified unit produced while scanning one input.
///
/// The payload is the *output-side* rendering of the unit: Devanagari glyphs
/// when encoding, Latin spellings when decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'t> {
    Vowel(&'t str),
    Consonant(&'t str),
    Conjunct(&'t str),
    /// May be empty: the inherent "a" has no visible mark.
    Matra(&'t str),
    Diacritic(&'t str),
    Punctuation(&'t str),
    Halant,
    Literal(char),
}

/// Composition state carried across a Devanagari -> Latin scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    #[default]
    Neutral,
    /// The last unit was a consonant whose vowel has not materialized yet.
    AwaitingVowelContext,
}

impl DecodeState {
    /// State after `token` has been emitted.
    pub fn after(self, token: &Token<'_>) -> Self {
        match token {
            Token::Consonant(_) | Token::Conjunct(_) => DecodeState::AwaitingVowelContext,
            Token::Diacritic(_) | Token::Halant => self,
            Token::Matra(_) | Token::Vowel(_) | Token::Punctuation(_) | Token::Literal(_) => {
                DecodeState::Neutral
            }
        }
    }

    pub fn awaiting_vowel(self) -> bool {
        self == DecodeState::AwaitingVowelContext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_names_parse() {
        assert_eq!("roman_to_devanagari".parse::<Direction>().unwrap(), Direction::ToDevanagari);
        assert_eq!("devanagari_to_roman".parse::<Direction>().unwrap(), Direction::ToLatin);
        assert_eq!(" to-latin ".parse::<Direction>().unwrap(), Direction::ToLatin);
    }

    #[test]
    fn unknown_direction_is_an_error_value() {
        match "sideways".parse::<Direction>() {
            Err(LipiError::InvalidDirection(name)) => assert_eq!(name, "sideways"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn auto_and_none_defer_to_detection() {
        assert_eq!(Direction::parse_optional(None).unwrap(), None);
        assert_eq!(Direction::parse_optional(Some("auto")).unwrap(), None);
        assert!(Direction::parse_optional(Some("")).is_err());
    }

    #[test]
    fn consonants_open_vowel_context() {
        let state = DecodeState::Neutral.after(&Token::Consonant("k"));
        assert!(state.awaiting_vowel());
        assert!(DecodeState::Neutral.after(&Token::Conjunct("ksh")).awaiting_vowel());
    }

    #[test]
    fn vowels_matras_and_literals_reset_state() {
        let awaiting = DecodeState::AwaitingVowelContext;
        assert_eq!(awaiting.after(&Token::Matra("aa")), DecodeState::Neutral);
        assert_eq!(awaiting.after(&Token::Vowel("i")), DecodeState::Neutral);
        assert_eq!(awaiting.after(&Token::Literal(' ')), DecodeState::Neutral);
        assert_eq!(awaiting.after(&Token::Punctuation(".")), DecodeState::Neutral);
    }

    #[test]
    fn diacritics_and_halant_keep_state() {
        let awaiting = DecodeState::AwaitingVowelContext;
        assert_eq!(awaiting.after(&Token::Diacritic("n")), awaiting);
        assert_eq!(awaiting.after(&Token::Halant), awaiting);
        assert_eq!(DecodeState::Neutral.after(&Token::Diacritic("h")), DecodeState::Neutral);
    }
}
