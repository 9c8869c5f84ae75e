// File: src/codemix.rs
use crate::error::{LipiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Language assigned to a single word of code-mixed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Maithili,
    Unknown,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Maithili => "Maithili",
            Language::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Character bigram frequencies of a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigramModel {
    /// Maps a two-character window -> frequency
    bigrams: HashMap<String, u64>,
}

impl BigramModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the bigrams inside every whitespace-separated word. Bigrams
    /// never span two words.
    pub fn from_corpus(text: &str) -> Self {
        let mut model = Self::new();
        for word in text.split_whitespace() {
            model.add_word(word);
        }
        model
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let model = Self::from_corpus(&text);
        if model.is_empty() {
            return Err(LipiError::CorpusUnavailable { path: path.to_path_buf() });
        }
        info!(path = %path.display(), bigrams = model.len(), "bigram model built");
        Ok(model)
    }

    /// O(k) in the word length.
    pub fn add_word(&mut self, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        for pair in chars.windows(2) {
            *self.bigrams.entry(pair.iter().collect()).or_insert(0) += 1;
        }
    }

    pub fn frequency(&self, bigram: &str) -> u64 {
        self.bigrams.get(bigram).copied().unwrap_or(0)
    }

    /// Sum of the corpus frequencies of every bigram in `word`.
    pub fn score(&self, word: &str) -> u64 {
        let chars: Vec<char> = word.chars().collect();
        chars
            .windows(2)
            .map(|pair| self.frequency(&pair.iter().collect::<String>()))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.bigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bigrams.is_empty()
    }
}

/// A word with the language it was classified as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLabel {
    pub word: String,
    pub language: Language,
}

impl fmt::Display for WordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.language)
    }
}

/// Labels the words of code-mixed text as English or Maithili by comparing
/// bigram scores under two corpus models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMixClassifier {
    english: BigramModel,
    maithili: BigramModel,
}

impl CodeMixClassifier {
    pub fn new(english: BigramModel, maithili: BigramModel) -> Self {
        Self { english, maithili }
    }

    /// Builds both models from corpus files. Either corpus being unreadable
    /// or empty is an error.
    pub fn from_corpus_files(english: &Path, maithili: &Path) -> Result<Self> {
        let read = |path: &Path| {
            BigramModel::from_file(path).map_err(|e| match e {
                LipiError::Io(_) => LipiError::CorpusUnavailable { path: path.to_path_buf() },
                other => other,
            })
        };
        Ok(Self::new(read(english)?, read(maithili)?))
    }

    /// The higher score wins; equal scores (including no known bigrams) give
    /// `Unknown`.
    pub fn identify_language(&self, word: &str) -> Language {
        let english = self.english.score(word);
        let maithili = self.maithili.score(word);
        match english.cmp(&maithili) {
            std::cmp::Ordering::Greater => Language::English,
            std::cmp::Ordering::Less => Language::Maithili,
            std::cmp::Ordering::Equal => Language::Unknown,
        }
    }

    pub fn classify(&self, text: &str) -> Vec<WordLabel> {
        text.split_whitespace()
            .map(|word| WordLabel {
                word: word.to_string(),
                language: self.identify_language(word),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CodeMixClassifier {
        CodeMixClassifier::new(
            BigramModel::from_corpus("the weather is nice the thing there"),
            BigramModel::from_corpus("हम घर जाइत छी अहाँ केना छी"),
        )
    }

    #[test]
    fn bigrams_stay_inside_words() {
        let model = BigramModel::from_corpus("ab ba");
        assert_eq!(model.frequency("ab"), 1);
        assert_eq!(model.frequency("ba"), 1);
        assert_eq!(model.frequency("b "), 0);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn score_sums_frequencies() {
        let model = BigramModel::from_corpus("the the then");
        assert_eq!(model.score("the"), 3 + 3);
        assert_eq!(model.score("x"), 0);
    }

    #[test]
    fn identifies_each_language() {
        let classifier = classifier();
        assert_eq!(classifier.identify_language("there"), Language::English);
        assert_eq!(classifier.identify_language("छी"), Language::Maithili);
        assert_eq!(classifier.identify_language("zzz"), Language::Unknown);
    }

    #[test]
    fn classify_labels_every_word() {
        let labels = classifier().classify("the छी qq");
        let rendered: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["the: English", "छी: Maithili", "qq: Unknown"]);
    }

    #[test]
    fn missing_corpus_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let english = dir.path().join("eng.txt");
        std::fs::write(&english, "hello world").unwrap();
        let missing = dir.path().join("missing.txt");
        let err = CodeMixClassifier::from_corpus_files(&english, &missing).unwrap_err();
        assert!(matches!(err, LipiError::CorpusUnavailable { path } if path == missing));
    }

    #[test]
    fn empty_corpus_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let english = dir.path().join("eng.txt");
        let maithili = dir.path().join("mai.txt");
        std::fs::write(&english, "hello").unwrap();
        std::fs::write(&maithili, "  \n").unwrap();
        assert!(matches!(
            CodeMixClassifier::from_corpus_files(&english, &maithili),
            Err(LipiError::CorpusUnavailable { .. })
        ));
    }
}
