// File: src/core/detector.rs
use crate::core::types::Script;

/// The Devanagari Unicode block.
const DEVANAGARI_BLOCK: std::ops::RangeInclusive<u32> = 0x0900..=0x097F;

/// Per-script code point counts for a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptCounts {
    pub devanagari: usize,
    /// ASCII letters only, both cases.
    pub latin: usize,
}

impl ScriptCounts {
    pub fn of(text: &str) -> Self {
        text.chars().fold(Self::default(), |mut counts, c| {
            if DEVANAGARI_BLOCK.contains(&(c as u32)) {
                counts.devanagari += 1;
            } else if c.is_ascii_alphabetic() {
                counts.latin += 1;
            }
            counts
        })
    }

    /// Devanagari wins only with a strict majority; ties go to Latin.
    pub fn dominant(&self) -> Script {
        if self.devanagari > self.latin {
            Script::Devanagari
        } else {
            Script::Latin
        }
    }
}

/// Classifies `text` by script majority.
pub fn detect(text: &str) -> Script {
    ScriptCounts::of(text).dominant()
}
