use crate::config::Settings;
use crate::core::converter::RomanizationEngine;
use crate::core::decoder::DevanagariDecoder;
use crate::core::detector;
use crate::core::tables::SymbolTable;
use crate::core::types::{Direction, Script};
use crate::error::Result;
use crate::persistence::load_table;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for collaborators: picks a transliterator for each call.
///
/// Holds only a shared, immutable table, so one engine can serve any number
/// of threads.
#[derive(Debug, Clone)]
pub struct TransliterationEngine {
    table: Arc<SymbolTable>,
}

impl Default for TransliterationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransliterationEngine {
    /// An engine over the built-in tables.
    pub fn new() -> Self {
        Self { table: Arc::clone(SymbolTable::shared_builtin()) }
    }

    pub fn with_table(table: Arc<SymbolTable>) -> Self {
        Self { table }
    }

    /// Uses the table resource named in the settings, if any.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match &settings.table_path {
            Some(path) => {
                let table = load_table(path)?;
                info!(path = %path.display(), "using custom symbol table");
                Ok(Self::with_table(Arc::new(table)))
            }
            None => Ok(Self::new()),
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn encoder(&self) -> RomanizationEngine<'_> {
        RomanizationEngine::new(&self.table)
    }

    pub fn decoder(&self) -> DevanagariDecoder<'_> {
        DevanagariDecoder::new(&self.table)
    }

    pub fn detect(&self, text: &str) -> Script {
        detector::detect(text)
    }

    /// Transliterates `text` in the named direction, or by script majority
    /// when `direction` is `None` or `"auto"`.
    pub fn transliterate(&self, text: &str, direction: Option<&str>) -> Result<String> {
        let direction = Direction::parse_optional(direction)?;
        Ok(self.transliterate_as(text, direction))
    }

    pub fn transliterate_as(&self, text: &str, direction: Option<Direction>) -> String {
        let direction = direction.unwrap_or_else(|| {
            let script = self.detect(text);
            let chosen = Direction::out_of(script);
            debug!(%script, ?chosen, "direction auto-detected");
            chosen
        });
        match direction {
            Direction::ToDevanagari => self.encoder().transliterate(text),
            Direction::ToLatin => self.decoder().transliterate(text),
        }
    }

    /// Detects the script of every word on its own. Whitespace is kept as is.
    pub fn transliterate_mixed(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word_start: Option<usize> = None;

        for (idx, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(start) = word_start.take() {
                    out.push_str(&self.transliterate_as(&text[start..idx], None));
                }
                out.push(c);
            } else if word_start.is_none() {
                word_start = Some(idx);
            }
        }
        if let Some(start) = word_start {
            out.push_str(&self.transliterate_as(&text[start..], None));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LipiError;

    #[test]
    fn explicit_directions() {
        let engine = TransliterationEngine::new();
        assert_eq!(engine.transliterate("ram", Some("roman_to_devanagari")).unwrap(), "रम");
        assert_eq!(engine.transliterate("राम", Some("devanagari_to_roman")).unwrap(), "raam");
    }

    #[test]
    fn auto_direction_follows_detected_script() {
        let engine = TransliterationEngine::new();
        let text = "नमस्ते दुनिया";
        assert_eq!(
            engine.transliterate(text, None).unwrap(),
            engine.transliterate(text, Some("devanagari_to_roman")).unwrap()
        );
        assert_eq!(engine.transliterate("kaa", None).unwrap(), "का");
        assert_eq!(engine.transliterate("kaa", Some("auto")).unwrap(), "का");
    }

    #[test]
    fn invalid_direction_is_returned_not_thrown() {
        let engine = TransliterationEngine::new();
        let err = engine.transliterate("ram", Some("klingon")).unwrap_err();
        assert!(matches!(err, LipiError::InvalidDirection(ref d) if d == "klingon"));
    }

    #[test]
    fn mixed_text_is_handled_per_word() {
        let engine = TransliterationEngine::new();
        assert_eq!(engine.transliterate_mixed("राम  kaa\tकाली"), "raam  का\tkaalii");
        assert_eq!(engine.transliterate_mixed(""), "");
        assert_eq!(engine.transliterate_mixed("  "), "  ");
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = TransliterationEngine::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.transliterate_as("kaalii", None))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "काली");
        }
    }
}
