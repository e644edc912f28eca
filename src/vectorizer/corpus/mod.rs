pub mod parser;

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    analyzer::Tokenizer,
    config::{DEFAULT_BODY_MARKER, DEFAULT_RECORD_MARKER},
    error::{Error, Result},
};

pub use parser::parse_corpus;

/// 1-based id, assigned in order of appearance
pub type ItemId = u32;

/// Line prefixes that split a corpus file into records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMarkers {
    /// starts a new record and ends any open body
    pub record: String,
    /// starts the body text of the current record
    pub body: String,
}

impl Default for RecordMarkers {
    fn default() -> Self {
        Self {
            record: DEFAULT_RECORD_MARKER.to_string(),
            body: DEFAULT_BODY_MARKER.to_string(),
        }
    }
}

/// Tokenized items of one corpus (queries or documents) plus its vocabulary.
///
/// Items are keyed by `ItemId` and iterate in ascending id order.
/// The vocabulary keeps first-appearance order so every table derived from it
/// has a stable column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    items: BTreeMap<ItemId, Vec<String>>,
    vocabulary: IndexSet<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its id
    pub fn push_item(&mut self, tokens: Vec<String>) -> ItemId {
        let id = self.items.len() as ItemId + 1;
        for token in &tokens {
            if !self.vocabulary.contains(token.as_str()) {
                self.vocabulary.insert(token.clone());
            }
        }
        self.items.insert(id, tokens);
        id
    }

    /// Build a corpus from raw texts, one item per text
    pub fn from_texts<I, S>(texts: I, tokenizer: &Tokenizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut corpus = Self::new();
        for text in texts {
            corpus.push_item(tokenizer.tokenize(text.as_ref()));
        }
        corpus
    }

    /// Parse a marked-up corpus file
    pub fn load(path: impl AsRef<Path>, markers: &RecordMarkers, tokenizer: &Tokenizer) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let corpus = parse_corpus(BufReader::new(file), markers, tokenizer).map_err(|e| Error::io(path, e))?;
        tracing::info!(
            path = %path.display(),
            items = corpus.len(),
            vocabulary = corpus.vocabulary.len(),
            "corpus loaded"
        );
        if corpus.is_empty() {
            tracing::warn!(path = %path.display(), "corpus has no body sections");
        }
        Ok(corpus)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Tokens of one item
    pub fn tokens(&self, id: ItemId) -> Option<&[String]> {
        self.items.get(&id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// (id, tokens) in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &[String])> + '_ {
        self.items.iter().map(|(id, tokens)| (*id, tokens.as_slice()))
    }

    pub fn items(&self) -> &BTreeMap<ItemId, Vec<String>> {
        &self.items
    }

    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }
}
