//! Corpus loading from a `<base>/<category>/<file>` directory layout.

use std::{fs, path::Path};

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    vectorizer::{
        corpus::{Corpus, CATEGORY_SEPARATOR},
        tokenizer::Tokenizer,
    },
};

/// Raw document texts
/// `"<category>/<file name>"` -> text, sorted by identifier
pub type RawCorpus = IndexMap<String, String>;

/// Read every file found one level below each category directory.
///
/// - Files directly under `base_dir` and deeper nesting are ignored.
/// - Invalid UTF-8 is replaced rather than rejected.
/// - A file that cannot be read is skipped with a warning.
///
/// # Errors
/// Fails when `base_dir` is missing, is not a directory, or cannot be listed.
pub fn load_corpus(base_dir: &Path) -> Result<RawCorpus> {
    if !base_dir.exists() {
        return Err(Error::CorpusNotFound { path: base_dir.to_path_buf() });
    }
    if !base_dir.is_dir() {
        return Err(Error::CorpusNotDirectory { path: base_dir.to_path_buf() });
    }

    let mut docs = RawCorpus::new();
    let mut skipped = 0usize;
    let walker = WalkDir::new(base_dir)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(Error::WalkCorpus { path: base_dir.to_path_buf(), source });
            }
            Err(err) => {
                warn!(error = %err, "skipping unreadable corpus entry");
                skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(category) = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };
        let doc_id = format!(
            "{}{}{}",
            category,
            CATEGORY_SEPARATOR,
            entry.file_name().to_string_lossy()
        );

        let bytes = match fs::read(entry.path()) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(doc = %doc_id, error = %err, "skipping unreadable file");
                skipped += 1;
                continue;
            }
        };
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                warn!(doc = %doc_id, "invalid utf-8, decoding lossily");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        debug!(doc = %doc_id, bytes = text.len(), "read document");
        docs.insert(doc_id, text);
    }

    docs.sort_keys();
    info!(
        path = %base_dir.display(),
        documents = docs.len(),
        skipped,
        "loaded corpus"
    );
    Ok(docs)
}

/// Load and tokenize a corpus directory
/// Raw texts are dropped as soon as they are tokenized.
pub fn load_tokenized(base_dir: &Path, tokenizer: &Tokenizer) -> Result<Corpus> {
    let raw = load_corpus(base_dir)?;
    Ok(Corpus::from_texts(raw, tokenizer))
}
