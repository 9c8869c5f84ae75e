// src/core/tables.rs
use crate::core::types::{SymbolKind, HALANT};
use crate::error::{LipiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Characters copied verbatim by the encoder before any table lookup.
pub const LITERAL_PUNCTUATION: &str = ",.?!-;:\"'()[]{}";

/// Longest Latin token a table may declare.
pub const MAX_TOKEN_CHARS: usize = 3;

const VOWELS: &[(&str, &str)] = &[
    ("a", "अ"), ("aa", "आ"), ("i", "इ"), ("ii", "ई"), ("ee", "ई"),
    ("u", "उ"), ("uu", "ऊ"), ("oo", "ऊ"), ("ri", "ऋ"), ("e", "ए"),
    ("ai", "ऐ"), ("o", "ओ"), ("au", "औ"),
];

const CONSONANTS: &[(&str, &str)] = &[
    ("k", "क"), ("kh", "ख"), ("g", "ग"), ("gh", "घ"), ("ng", "ङ"),
    ("ch", "च"), ("chh", "छ"), ("j", "ज"), ("jh", "झ"), ("ny", "ञ"),
    ("t", "त"), ("th", "थ"), ("d", "द"), ("dh", "ध"), ("n", "न"),
    ("p", "प"), ("ph", "फ"), ("b", "ब"), ("bh", "भ"), ("m", "म"),
    ("y", "य"), ("r", "र"), ("l", "ल"), ("v", "व"), ("w", "व"),
    ("sh", "श"), ("s", "स"), ("h", "ह"),
    // retroflex
    ("T", "ट"), ("Th", "ठ"), ("D", "ड"), ("Dh", "ढ"), ("N", "ण"),
    ("Sh", "ष"), ("L", "ळ"),
];

const CONJUNCTS: &[(&str, &str)] = &[("ksh", "क्ष"), ("tr", "त्र"), ("gn", "ज्ञ")];

const PUNCTUATION: &[(&str, &str)] = &[(".", "।"), ("..", "॥")];

/// Anusvara and visarga. Their spellings collide with consonants, so they are
/// never produced by the encoder.
const DIACRITICS: &[(&str, &str)] = &[("n", "ं"), ("h", "ः")];

const MATRAS: &[(&str, &str)] = &[
    ("a", ""), ("aa", "ा"), ("i", "ि"), ("ii", "ी"), ("ee", "ी"),
    ("u", "ु"), ("uu", "ू"), ("oo", "ू"), ("ri", "ृ"), ("e", "े"),
    ("ai", "ै"), ("o", "ो"), ("au", "ौ"),
];

/// Canonical Latin spelling for every Devanagari glyph.
const INVERSE: &[(&str, &str)] = &[
    ("अ", "a"), ("आ", "aa"), ("इ", "i"), ("ई", "ii"), ("उ", "u"), ("ऊ", "uu"),
    ("ए", "e"), ("ऐ", "ai"), ("ओ", "o"), ("औ", "au"), ("ऋ", "ri"),
    ("क", "k"), ("ख", "kh"), ("ग", "g"), ("घ", "gh"), ("ङ", "ng"),
    ("च", "ch"), ("छ", "chh"), ("ज", "j"), ("झ", "jh"), ("ञ", "ny"),
    ("ट", "T"), ("ठ", "Th"), ("ड", "D"), ("ढ", "Dh"), ("ण", "N"),
    ("त", "t"), ("थ", "th"), ("द", "d"), ("ध", "dh"), ("न", "n"),
    ("प", "p"), ("फ", "ph"), ("ब", "b"), ("भ", "bh"), ("म", "m"),
    ("य", "y"), ("र", "r"), ("ल", "l"), ("व", "v"), ("श", "sh"),
    ("ष", "Sh"), ("स", "s"), ("ह", "h"), ("ळ", "L"),
    ("क्ष", "ksh"), ("त्र", "tr"), ("ज्ञ", "gn"),
    ("।", "."), ("॥", ".."),
    ("ं", "n"), ("ः", "h"),
    ("ा", "aa"), ("ि", "i"), ("ी", "ii"), ("ु", "u"), ("ू", "uu"),
    ("े", "e"), ("ै", "ai"), ("ो", "o"), ("ौ", "au"), ("ृ", "ri"),
];

/// Serializable description of a symbol table, as found in a JSON resource.
///
/// Every list holds `(latin, devanagari)` pairs except `inverse`, which holds
/// `(devanagari, latin)` pairs. An empty `inverse` is derived from the other
/// lists, with the first spelling listed for a glyph becoming canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSpec {
    pub vowels: Vec<(String, String)>,
    pub consonants: Vec<(String, String)>,
    pub conjuncts: Vec<(String, String)>,
    pub punctuation: Vec<(String, String)>,
    pub diacritics: Vec<(String, String)>,
    pub matras: Vec<(String, String)>,
    pub inverse: Vec<(String, String)>,
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|&(a, b)| (a.to_string(), b.to_string())).collect()
}

impl TableSpec {
    /// The compiled-in Latin/Devanagari tables.
    pub fn builtin() -> Self {
        Self {
            vowels: owned(VOWELS),
            consonants: owned(CONSONANTS),
            conjuncts: owned(CONJUNCTS),
            punctuation: owned(PUNCTUATION),
            diacritics: owned(DIACRITICS),
            matras: owned(MATRAS),
            inverse: owned(INVERSE),
        }
    }

    /// Latin-side classes in the order they are registered.
    fn latin_classes(&self) -> [(&[(String, String)], SymbolKind); 4] {
        [
            (self.vowels.as_slice(), SymbolKind::Vowel),
            (self.consonants.as_slice(), SymbolKind::Consonant),
            (self.conjuncts.as_slice(), SymbolKind::Conjunct),
            (self.punctuation.as_slice(), SymbolKind::Punctuation),
        ]
    }

    /// Checks that the lists form a usable table.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(LipiError::InvalidTable(msg));

        for (list, kind) in self.latin_classes() {
            for (latin, glyph) in list {
                let len = latin.chars().count();
                if len == 0 || len > MAX_TOKEN_CHARS {
                    return invalid(format!("{:?} token '{}' must be 1-{} characters", kind, latin, MAX_TOKEN_CHARS));
                }
                if glyph.is_empty() {
                    return invalid(format!("{:?} token '{}' has no glyph", kind, latin));
                }
                if glyph.chars().any(|c| c == HALANT) && kind != SymbolKind::Conjunct {
                    return invalid(format!("only conjuncts may contain the halant ('{}')", latin));
                }
                // The decoder reads one code point at a time outside conjuncts.
                if kind != SymbolKind::Conjunct && glyph.chars().count() > 1 {
                    return invalid(format!(
                        "{:?} glyph for '{}' must be a single code point; declare clusters as conjuncts",
                        kind, latin
                    ));
                }
            }
        }

        for (latin, glyph) in self.diacritics.iter().chain(self.matras.iter()) {
            if glyph.chars().count() > 1 {
                return invalid(format!("mark for '{}' must be a single code point", latin));
            }
        }

        for (_, glyph) in &self.conjuncts {
            if glyph.chars().count() < 2 {
                return invalid(format!("conjunct '{}' is not a cluster", glyph));
            }
        }

        for (vowel, _) in &self.matras {
            if !self.vowels.iter().any(|(v, _)| v == vowel) {
                return invalid(format!("matra '{}' has no independent vowel", vowel));
            }
        }
        for (vowel, _) in &self.vowels {
            if !self.matras.iter().any(|(v, _)| v == vowel) {
                return invalid(format!("vowel '{}' has no matra", vowel));
            }
        }

        for (latin, glyph) in &self.diacritics {
            if latin.is_empty() || glyph.is_empty() {
                return invalid("diacritic entries must not be empty".to_string());
            }
        }

        if !self.inverse.is_empty() {
            for (_, glyph) in self.conjuncts.iter() {
                if !self.inverse.iter().any(|(g, _)| g == glyph) {
                    return invalid(format!("conjunct '{}' has no inverse spelling", glyph));
                }
            }
            for (glyph, _) in &self.inverse {
                let declared = self
                    .latin_classes()
                    .iter()
                    .flat_map(|(list, _)| list.iter())
                    .chain(self.diacritics.iter())
                    .chain(self.matras.iter())
                    .any(|(_, g)| g == glyph);
                if !declared {
                    return invalid(format!("inverse entry for undeclared glyph '{}'", glyph));
                }
            }
        }

        Ok(())
    }
}

/// Immutable lookup tables shared by both transliterators.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    latin: HashMap<String, (String, SymbolKind)>,
    matras: HashMap<String, String>,
    inverse: HashMap<String, String>,
    glyph_kinds: HashMap<String, SymbolKind>,
    /// Devanagari clusters, longest first.
    conjuncts: Vec<(Vec<char>, String)>,
    latin_windows: Vec<usize>,
    matra_windows: Vec<usize>,
}

/// Window lengths to try, longest first.
fn windows_for<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<usize> {
    let longest = keys.map(|k| k.chars().count()).max().unwrap_or(0);
    (1..=longest).rev().collect()
}

impl SymbolTable {
    /// Builds a table from a spec after validating it.
    pub fn from_spec(spec: &TableSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self::build(spec))
    }

    /// Parses and validates a JSON table resource.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: TableSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    /// The process-wide built-in table.
    pub fn builtin() -> &'static SymbolTable {
        Self::shared_builtin().as_ref()
    }

    /// The built-in table behind a shareable handle.
    pub fn shared_builtin() -> &'static Arc<SymbolTable> {
        static INSTANCE: OnceLock<Arc<SymbolTable>> = OnceLock::new();
        INSTANCE.get_or_init(|| Arc::new(Self::build(&TableSpec::builtin())))
    }

    fn build(spec: &TableSpec) -> Self {
        let mut latin = HashMap::new();
        let mut glyph_kinds = HashMap::new();
        let mut derived_inverse: HashMap<String, String> = HashMap::new();

        for (list, kind) in spec.latin_classes() {
            for (token, glyph) in list {
                latin.insert(token.clone(), (glyph.clone(), kind));
                glyph_kinds.insert(glyph.clone(), kind);
                derived_inverse.entry(glyph.clone()).or_insert_with(|| token.clone());
            }
        }
        for (token, glyph) in &spec.diacritics {
            glyph_kinds.insert(glyph.clone(), SymbolKind::Diacritic);
            derived_inverse.entry(glyph.clone()).or_insert_with(|| token.clone());
        }

        let mut matras = HashMap::new();
        for (vowel, glyph) in &spec.matras {
            matras.insert(vowel.clone(), glyph.clone());
            if !glyph.is_empty() {
                glyph_kinds.insert(glyph.clone(), SymbolKind::Matra);
                derived_inverse.entry(glyph.clone()).or_insert_with(|| vowel.clone());
            }
        }

        let inverse = if spec.inverse.is_empty() {
            derived_inverse
        } else {
            spec.inverse.iter().cloned().collect()
        };

        let mut conjuncts: Vec<(Vec<char>, String)> = spec
            .conjuncts
            .iter()
            .filter_map(|(_, glyph)| {
                inverse
                    .get(glyph)
                    .map(|latin| (glyph.chars().collect(), latin.clone()))
            })
            .collect();
        conjuncts.sort_by_key(|(cluster, _)| std::cmp::Reverse(cluster.len()));

        let latin_windows = windows_for(latin.keys());
        let matra_windows = windows_for(matras.keys());

        Self { latin, matras, inverse, glyph_kinds, conjuncts, latin_windows, matra_windows }
    }

    pub fn lookup_latin_to_dev(&self, token: &str) -> Option<&str> {
        self.latin.get(token).map(|(glyph, _)| glyph.as_str())
    }

    pub fn lookup_dev_to_latin(&self, glyph: &str) -> Option<&str> {
        self.inverse.get(glyph).map(String::as_str)
    }

    /// The combining mark for a vowel; `Some("")` for the inherent "a".
    pub fn lookup_vowel_matra(&self, vowel: &str) -> Option<&str> {
        self.matras.get(vowel).map(String::as_str)
    }

    /// True for a Devanagari conjunct cluster or its Latin token.
    pub fn is_conjunct(&self, candidate: &str) -> bool {
        self.classify_devanagari(candidate) == Some(SymbolKind::Conjunct)
            || self.classify_latin(candidate) == Some(SymbolKind::Conjunct)
    }

    pub fn classify_latin(&self, token: &str) -> Option<SymbolKind> {
        self.latin.get(token).map(|&(_, kind)| kind)
    }

    pub fn classify_devanagari(&self, glyph: &str) -> Option<SymbolKind> {
        self.glyph_kinds.get(glyph).copied()
    }

    /// Latin token lengths to try at each position, longest first.
    pub fn latin_windows(&self) -> &[usize] {
        &self.latin_windows
    }

    /// Vowel lengths to try after a consonant, longest first.
    pub fn matra_windows(&self) -> &[usize] {
        &self.matra_windows
    }

    /// Conjunct clusters with their canonical spelling, longest first.
    pub fn conjunct_clusters(&self) -> impl Iterator<Item = (&[char], &str)> {
        self.conjuncts.iter().map(|(c, l)| (c.as_slice(), l.as_str()))
    }
}
