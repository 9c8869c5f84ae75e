use lipi_core::core::tables::{SymbolTable, TableSpec};
use lipi_core::{decode, detect, encode, Direction, LipiError, Script, TransliterationEngine};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn unambiguous_text_survives_encode_then_decode() {
    for text in ["kaalii", "mitro", "kt", "chhaa", "kii kuu", "gnaa", "kuutoo"] {
        let expected = text.replace("oo", "uu");
        assert_eq!(decode(&encode(text)), expected, "round trip of {text}");
    }
}

#[test]
fn text_without_mapped_tokens_is_unchanged() {
    for text in ["123 + 456 = 579", "?!;:", "fqxz", "", "   "] {
        assert_eq!(encode(text), text);
        assert_eq!(decode(text), text);
    }
}

#[test]
fn longest_match_uses_three_letter_token() {
    assert_eq!(encode("chhaa"), "\u{091b}\u{093e}");
}

#[test]
fn halant_between_clustered_consonants() {
    assert_eq!(encode("kt"), "\u{0915}\u{094d}\u{0924}");
}

#[test]
fn terminal_consonant_has_no_mark() {
    assert_eq!(encode("ram"), "\u{0930}\u{092e}");
}

#[test]
fn conjunct_cluster_decodes_as_a_unit() {
    assert_eq!(decode("\u{0915}\u{094d}\u{0937}"), "ksh");
    assert_eq!(decode("क्षमा"), "kshmaa");
}

#[test]
fn detection_tie_goes_to_latin() {
    assert_eq!(detect("ab कख"), Script::Latin);
    assert_eq!(detect("a क ख"), Script::Devanagari);
}

#[test]
fn auto_direction_matches_explicit_to_latin() {
    let engine = TransliterationEngine::new();
    let text = "मैथिली भाषा";
    assert_eq!(
        engine.transliterate(text, None).unwrap(),
        engine.transliterate_as(text, Some(Direction::ToLatin))
    );
}

#[test]
fn invalid_direction_can_be_matched_on() {
    let engine = TransliterationEngine::new();
    match engine.transliterate("ram", Some("upside_down")) {
        Err(LipiError::InvalidDirection(name)) => assert_eq!(name, "upside_down"),
        other => panic!("expected InvalidDirection, got {:?}", other),
    }
}

#[test]
fn custom_table_changes_both_directions() {
    let mut spec = TableSpec::builtin();
    spec.consonants.push(("z".to_string(), "\u{095b}".to_string()));
    spec.inverse.push(("\u{095b}".to_string(), "z".to_string()));
    let engine = TransliterationEngine::with_table(Arc::new(SymbolTable::from_spec(&spec).unwrap()));

    assert_eq!(engine.transliterate("zaa", Some("to-devanagari")).unwrap(), "\u{095b}\u{093e}");
    assert_eq!(engine.transliterate("\u{095b}\u{093e}", Some("to-latin")).unwrap(), "zaa");
}
