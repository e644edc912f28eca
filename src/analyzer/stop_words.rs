use std::{collections::HashSet, fs::File, io::{BufRead, BufReader, Read}, path::Path};

use crate::error::{Error, Result};

/// Closed-class English words
/// articles, prepositions, conjunctions, modals and auxiliaries, determiners,
/// wh-words, indefinite and personal pronouns
pub const CLOSED_CLASS_STOP_WORDS: &[&str] = &[
    // articles / conjunctions
    "a", "the", "an", "and", "or", "but", "and/or",
    // prepositions
    "about", "above", "after", "along", "amid", "among", "as", "at", "by", "for",
    "from", "in", "into", "like", "minus", "near", "of", "off", "on", "onto",
    "out", "over", "past", "per", "plus", "since", "till", "to", "under", "until",
    "up", "via", "vs", "with",
    // modals / auxiliaries
    "that", "can", "cannot", "could", "may", "might", "must", "need", "ought",
    "shall", "should", "will", "would", "have", "had", "has", "having", "be",
    "is", "am", "are", "was", "were", "being", "been", "get", "gets", "got",
    "gotten", "getting", "seem", "seeming", "seems", "seemed",
    // determiners / quantifiers
    "enough", "both", "all", "your", "those", "this", "these", "their", "some",
    "our", "no", "neither", "my", "its", "his", "her", "every", "either", "each",
    "any", "another", "just", "mere", "such", "merely", "right", "not", "only",
    "sheer", "even", "especially", "namely", "more", "most", "less", "least",
    "so", "too", "pretty", "quite", "rather", "somewhat", "sufficiently", "same",
    "different",
    // wh-words
    "when", "why", "where", "how", "what", "who", "whom", "which", "whether",
    "whose", "if",
    // indefinite pronouns
    "anybody", "anyone", "anyplace", "anything", "anytime", "anywhere",
    "everybody", "everyday", "everyone", "everyplace", "everything",
    "everywhere", "whatever", "whenever", "whereever", "whichever", "whoever",
    "whomever",
    // personal pronouns
    "he", "him", "she", "it", "they", "them", "theirs", "you", "yours", "me",
    "mine", "I", "we", "us", "much",
];

/// Set of words dropped by the tokenizer.
///
/// Matching is exact (case-sensitive), the same as the word list it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    /// The built-in closed-class list
    pub fn closed_class() -> Self {
        CLOSED_CLASS_STOP_WORDS.iter().copied().collect()
    }

    /// No filtering at all
    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    /// Read one word per line. Blank lines are skipped, whitespace trimmed.
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut words = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.into());
            }
        }
        Ok(Self { words })
    }

    /// Load a stop word file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::StopWords {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|source| Error::StopWords {
            path: path.to_path_buf(),
            source,
        })
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::closed_class()
    }
}

impl<'a> FromIterator<&'a str> for StopWords {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(Box::from).collect(),
        }
    }
}
