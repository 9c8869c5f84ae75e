// src/core/decoder.rs
use crate::core::tables::SymbolTable;
use crate::core::types::{DecodeState, SymbolKind, Token, HALANT};

/// A Devanagari to Romanization converter over a symbol table.
///
/// Bare consonants decode to their letters only: the inherent "a" is not
/// written back out. `राम` decodes to `raam` but `नमस्ते` to `nmste`.
#[derive(Debug, Clone, Copy)]
pub struct DevanagariDecoder<'t> {
    table: &'t SymbolTable,
}

impl Default for DevanagariDecoder<'static> {
    fn default() -> Self {
        Self::new(SymbolTable::builtin())
    }
}

impl<'t> DevanagariDecoder<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    pub fn transliterate(&self, devanagari: &str) -> String {
        compose(&self.tokenize(devanagari))
    }

    pub fn tokenize(&self, devanagari: &str) -> Vec<Token<'t>> {
        self.trace(devanagari).into_iter().map(|(token, _)| token).collect()
    }

    /// Every token together with the composition state after it.
    pub fn trace(&self, devanagari: &str) -> Vec<(Token<'t>, DecodeState)> {
        let chars: Vec<char> = devanagari.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        let mut state = DecodeState::Neutral;
        let mut emit = |token: Token<'t>, state: &mut DecodeState| {
            *state = state.after(&token);
            out.push((token, *state));
        };

        let mut buf = [0u8; 4];
        let mut i = 0;
        while i < chars.len() {
            if let Some((len, latin)) = self.conjunct_at(&chars, i) {
                emit(Token::Conjunct(latin), &mut state);
                i += len;
                continue;
            }

            let c = chars[i];
            let glyph: &str = c.encode_utf8(&mut buf);
            let kind = self.table.classify_devanagari(glyph);
            let latin = self.table.lookup_dev_to_latin(glyph);

            if kind == Some(SymbolKind::Consonant) && chars.get(i + 1) == Some(&HALANT) {
                if let Some(latin) = latin {
                    emit(Token::Consonant(latin), &mut state);
                    emit(Token::Halant, &mut state);
                    i += 2;
                    continue;
                }
            }

            let token = match (kind, latin) {
                (Some(SymbolKind::Matra), Some(latin)) => Token::Matra(latin),
                (Some(SymbolKind::Diacritic), Some(latin)) => Token::Diacritic(latin),
                (Some(SymbolKind::Consonant), Some(latin)) => Token::Consonant(latin),
                (Some(SymbolKind::Conjunct), Some(latin)) => Token::Conjunct(latin),
                (Some(SymbolKind::Vowel), Some(latin)) => Token::Vowel(latin),
                (Some(SymbolKind::Punctuation), Some(latin)) => Token::Punctuation(latin),
                // a halant with no consonant before it
                _ if c == HALANT => Token::Halant,
                _ => Token::Literal(c),
            };
            emit(token, &mut state);
            i += 1;
        }

        out
    }

    /// Longest declared conjunct cluster starting at `at`.
    fn conjunct_at(&self, chars: &[char], at: usize) -> Option<(usize, &'t str)> {
        let table = self.table;
        table
            .conjunct_clusters()
            .find(|(cluster, _)| chars[at..].starts_with(cluster))
            .map(|(cluster, latin)| (cluster.len(), latin))
    }
}

/// Concatenates Latin-side tokens. The halant carries no sound of its own.
pub fn compose(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Vowel(l)
            | Token::Consonant(l)
            | Token::Conjunct(l)
            | Token::Matra(l)
            | Token::Diacritic(l)
            | Token::Punctuation(l) => out.push_str(l),
            Token::Halant => {}
            Token::Literal(c) => out.push(*c),
        }
    }
    out
}

/// Devanagari to Latin with the built-in tables.
pub fn decode(text: &str) -> String {
    DevanagariDecoder::default().transliterate(text)
}
