// File: src/persistence.rs
use crate::codemix::CodeMixClassifier;
use crate::config::Settings;
use crate::core::tables::{SymbolTable, TableSpec};
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Writes through a temp file in the target directory and renames it into
/// place, so readers never see a half-written file.
fn write_atomically(path: &Path, write: impl FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Loads and validates a JSON table resource.
pub fn load_table(path: &Path) -> Result<SymbolTable> {
    let raw = fs::read_to_string(path)?;
    SymbolTable::from_json(&raw)
}

/// Writes a table spec as pretty JSON, e.g. to seed a custom table from the
/// built-in one.
pub fn save_table_spec(spec: &TableSpec, path: &Path) -> Result<()> {
    write_atomically(path, |writer| Ok(serde_json::to_writer_pretty(writer, spec)?))
}

/// Snapshots both bigram models with bincode.
pub fn save_models(classifier: &CodeMixClassifier, path: &Path) -> Result<()> {
    write_atomically(path, |writer| Ok(bincode::serialize_into(writer, classifier)?))?;
    info!(path = %path.display(), "bigram models saved");
    Ok(())
}

pub fn load_models(path: &Path) -> Result<CodeMixClassifier> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}

/// Prefers the snapshot named in the settings, falling back to the corpora
/// (and refreshing the snapshot) when it is missing or unreadable. A failed
/// snapshot write is logged; the freshly built classifier is still returned.
pub fn load_classifier(settings: &Settings) -> Result<CodeMixClassifier> {
    if let Some(cache) = &settings.model_cache {
        match load_models(cache) {
            Ok(classifier) => return Ok(classifier),
            Err(e) => warn!(path = %cache.display(), error = %e, "model snapshot unusable, rebuilding"),
        }
    }

    let classifier =
        CodeMixClassifier::from_corpus_files(&settings.english_corpus, &settings.maithili_corpus)?;
    if let Some(cache) = &settings.model_cache {
        if let Err(e) = save_models(&classifier, cache) {
            warn!(path = %cache.display(), error = %e, "could not refresh model snapshot");
        }
    }
    Ok(classifier)
}
