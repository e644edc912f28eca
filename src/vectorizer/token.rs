use std::collections::BTreeMap;

use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::corpus::{Corpus, ItemId};

/// Raw term counts per item.
///
/// Rows are dense: every row has one slot per vocabulary term, in vocabulary
/// order, zero when the item does not contain the term.
///
/// # Examples
/// ```
/// use tfidf_ranker::{Corpus, Tokenizer, vectorizer::token::compute_term_frequency};
/// let corpus = Corpus::from_texts(["wing flow wing", "drag"], &Tokenizer::default());
/// let tf = compute_term_frequency(&corpus);
/// assert_eq!(tf.count(1, "wing"), Some(2));
/// assert_eq!(tf.count(2, "wing"), Some(0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermFrequencyTable {
    vocabulary: IndexSet<String>,
    rows: BTreeMap<ItemId, Vec<u32>>,
}

impl TermFrequencyTable {
    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }

    /// Dense counts of one item, in vocabulary order
    pub fn row(&self, id: ItemId) -> Option<&[u32]> {
        self.rows.get(&id).map(Vec::as_slice)
    }

    /// Count of `term` in item `id`
    /// `None` if the item or the term is unknown to this corpus
    pub fn count(&self, id: ItemId, term: &str) -> Option<u32> {
        let idx = self.vocabulary.get_index_of(term)?;
        self.rows.get(&id)?.get(idx).copied()
    }

    /// (term, count) pairs of one item, zero entries included
    pub fn iter_row(&self, id: ItemId) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.rows
            .get(&id)
            .into_iter()
            .flat_map(move |row| self.vocabulary.iter().map(String::as_str).zip(row.iter().copied()))
    }

    /// Sum of the counts of `term` over all items
    pub fn total_count(&self, term: &str) -> u64 {
        match self.vocabulary.get_index_of(term) {
            Some(idx) => self.rows.values().filter_map(|row| row.get(idx)).map(|&n| n as u64).sum(),
            None => 0,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.rows.keys().copied()
    }

    /// First item whose row length differs from the vocabulary size
    pub(crate) fn first_misshapen_row(&self) -> Option<ItemId> {
        let width = self.vocabulary.len();
        self.rows.iter().find(|(_, row)| row.len() != width).map(|(&id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Count every vocabulary term in every item
pub fn compute_term_frequency(corpus: &Corpus) -> TermFrequencyTable {
    let vocabulary = corpus.vocabulary();
    let rows: BTreeMap<ItemId, Vec<u32>> = corpus
        .items()
        .par_iter()
        .map(|(&id, tokens)| {
            let mut row = vec![0u32; vocabulary.len()];
            for token in tokens {
                // 語彙は同じコーパスから作られているので必ず見つかる
                if let Some(idx) = vocabulary.get_index_of(token.as_str()) {
                    row[idx] += 1;
                }
            }
            (id, row)
        })
        .collect();
    tracing::debug!(items = rows.len(), vocabulary = vocabulary.len(), "term frequency computed");
    TermFrequencyTable {
        vocabulary: vocabulary.clone(),
        rows,
    }
}

/// Number of items containing each vocabulary term at least once.
///
/// Computed once per corpus so IDF lookups do not rescan the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFrequency {
    doc_num: u64,
    counts: Vec<u64>,
}

impl DocumentFrequency {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let vocabulary = corpus.vocabulary();
        let mut counts = vec![0u64; vocabulary.len()];
        // last item that bumped each term, so repeats inside one item count once
        let mut last_seen: Vec<Option<ItemId>> = vec![None; vocabulary.len()];
        for (id, tokens) in corpus.iter() {
            for token in tokens {
                if let Some(idx) = vocabulary.get_index_of(token.as_str()) {
                    if last_seen[idx] != Some(id) {
                        last_seen[idx] = Some(id);
                        counts[idx] += 1;
                    }
                }
            }
        }
        Self {
            doc_num: corpus.len() as u64,
            counts,
        }
    }

    /// Total number of items in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Document frequency by vocabulary index
    #[inline]
    pub fn get(&self, term_idx: usize) -> u64 {
        self.counts.get(term_idx).copied().unwrap_or(0)
    }
}
