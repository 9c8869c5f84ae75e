// src/core/converter.rs
use crate::core::tables::{SymbolTable, LITERAL_PUNCTUATION};
use crate::core::types::{SymbolKind, Token, HALANT};

/// Whitespace and the listed punctuation marks pass through the encoder
/// untouched and end a consonant cluster.
fn is_literal(c: char) -> bool {
    c.is_whitespace() || LITERAL_PUNCTUATION.contains(c)
}

/// A Romanization to Devanagari converter over a symbol table.
#[derive(Debug, Clone, Copy)]
pub struct RomanizationEngine<'t> {
    table: &'t SymbolTable,
}

impl Default for RomanizationEngine<'static> {
    fn default() -> Self {
        Self::new(SymbolTable::builtin())
    }
}

impl<'t> RomanizationEngine<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    /// Transliterates a full roman string.
    pub fn transliterate(&self, roman: &str) -> String {
        compose(&self.tokenize(roman))
    }

    /// Splits lowercased roman text into Devanagari-side tokens.
    pub fn tokenize(&self, roman: &str) -> Vec<Token<'t>> {
        let chars: Vec<char> = roman.to_lowercase().chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if is_literal(c) {
                tokens.push(Token::Literal(c));
                i += 1;
                continue;
            }

            let Some((len, glyph, kind)) = self.longest_token(&chars, i) else {
                tokens.push(Token::Literal(c));
                i += 1;
                continue;
            };

            match kind {
                SymbolKind::Consonant | SymbolKind::Conjunct => {
                    tokens.push(if kind == SymbolKind::Conjunct {
                        Token::Conjunct(glyph)
                    } else {
                        Token::Consonant(glyph)
                    });
                    let next = i + len;
                    match self.vowel_after(&chars, next) {
                        Some((vowel_len, matra)) => {
                            tokens.push(Token::Matra(matra));
                            i = next + vowel_len;
                        }
                        None => {
                            // Another letter follows: suppress the inherent vowel.
                            if chars.get(next).is_some_and(|&n| !is_literal(n)) {
                                tokens.push(Token::Halant);
                            }
                            i = next;
                        }
                    }
                }
                // Marks have no Latin spelling, so only vowels land here.
                SymbolKind::Vowel | SymbolKind::Diacritic | SymbolKind::Matra => {
                    tokens.push(Token::Vowel(glyph));
                    i += len;
                }
                SymbolKind::Punctuation => {
                    tokens.push(Token::Punctuation(glyph));
                    i += len;
                }
            }
        }

        tokens
    }

    /// Greedy longest match of a Latin token starting at `at`.
    fn longest_token(&self, chars: &[char], at: usize) -> Option<(usize, &'t str, SymbolKind)> {
        let table = self.table;
        table
            .latin_windows()
            .iter()
            .copied()
            .filter(|&width| at + width <= chars.len())
            .find_map(|width| {
                let key: String = chars[at..at + width].iter().collect();
                let glyph = table.lookup_latin_to_dev(&key)?;
                let kind = table.classify_latin(&key)?;
                Some((width, glyph, kind))
            })
    }

    /// Longest vowel directly after a consonant, as `(length, matra)`.
    fn vowel_after(&self, chars: &[char], at: usize) -> Option<(usize, &'t str)> {
        let table = self.table;
        table
            .matra_windows()
            .iter()
            .copied()
            .filter(|&width| at + width <= chars.len())
            .find_map(|width| {
                let key: String = chars[at..at + width].iter().collect();
                table.lookup_vowel_matra(&key).map(|matra| (width, matra))
            })
    }
}

/// Concatenates Devanagari-side tokens.
pub fn compose(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Vowel(g)
            | Token::Consonant(g)
            | Token::Conjunct(g)
            | Token::Matra(g)
            | Token::Diacritic(g)
            | Token::Punctuation(g) => out.push_str(g),
            Token::Halant => out.push(HALANT),
            Token::Literal(c) => out.push(*c),
        }
    }
    out
}

/// Latin to Devanagari with the built-in tables.
pub fn encode(text: &str) -> String {
    RomanizationEngine::default().transliterate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_prefers_three_letter_token() {
        assert_eq!(encode("chhaa"), "छा");
        let engine = RomanizationEngine::default();
        assert_eq!(engine.tokenize("chhaa"), vec![Token::Consonant("छ"), Token::Matra("ा")]);
    }

    #[test]
    fn consonant_cluster_gets_halant() {
        assert_eq!(encode("kt"), "क\u{094d}त");
        let engine = RomanizationEngine::default();
        assert_eq!(
            engine.tokenize("kt"),
            vec![Token::Consonant("क"), Token::Halant, Token::Consonant("त")]
        );
    }

    #[test]
    fn standalone_vowels_tokenize_as_vowels() {
        let engine = RomanizationEngine::default();
        assert_eq!(engine.tokenize("aa"), vec![Token::Vowel("आ")]);
        assert_eq!(engine.tokenize("i au"), vec![Token::Vowel("इ"), Token::Literal(' '), Token::Vowel("औ")]);
    }

    #[test]
    fn terminal_consonant_stays_bare() {
        assert_eq!(encode("ram"), "रम");
        assert!(!encode("ram").ends_with(HALANT));
    }

    #[test]
    fn consonant_before_punctuation_or_space_stays_bare() {
        assert_eq!(encode("ram, sita."), "रम, सित.");
        assert_eq!(encode("ram sita"), "रम सित");
    }

    #[test]
    fn vowel_matras_attach_to_consonants() {
        assert_eq!(encode("kaalii"), "काली");
        assert_eq!(encode("kai kau"), "कै कौ");
        assert_eq!(encode("kri"), "कृ");
        assert_eq!(encode("namaste"), "नमस्ते");
    }

    #[test]
    fn alternate_spellings_share_a_glyph() {
        assert_eq!(encode("kee"), encode("kii"));
        assert_eq!(encode("koo"), encode("kuu"));
        assert_eq!(encode("wa"), encode("va"));
    }

    #[test]
    fn independent_vowels_never_take_a_matra() {
        assert_eq!(encode("aai"), "आइ");
        assert_eq!(encode("eek"), "ईक");
        let engine = RomanizationEngine::default();
        assert_eq!(engine.tokenize("ai"), vec![Token::Vowel("ऐ")]);
    }

    #[test]
    fn conjunct_tokens_encode_as_clusters() {
        assert_eq!(encode("ksha"), "क्ष");
        assert_eq!(encode("mitro"), "मित्रो");
        assert_eq!(encode("gnaa"), "ज्ञा");
    }

    #[test]
    fn input_is_lowercased_first() {
        assert_eq!(encode("Kaa"), "का");
        assert_eq!(encode("Th"), encode("th"));
        assert_eq!(encode("Th"), "थ");
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(encode("c"), "c");
        assert_eq!(encode("xyz?"), "xय्z?");
        assert_eq!(encode("123 @#"), "123 @#");
    }

    #[test]
    fn unmapped_follower_still_forces_halant() {
        assert_eq!(encode("kx"), "क\u{094d}x");
    }

    #[test]
    fn period_is_a_literal_not_a_danda() {
        assert_eq!(encode("."), ".");
        assert_eq!(encode(".."), "..");
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(""), "");
    }
}
