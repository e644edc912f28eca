use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{
    corpus::{Corpus, ItemId},
    token::{DocumentFrequency, TermFrequencyTable},
};

/// Weighting rules used to turn counts into TF-IDF values.
///
/// `DefaultTFIDFEngine` is the textbook form: natural-log IDF and raw-count TF.
pub trait TFIDFEngine {
    /// IDF of a term found in `doc_freq` of `doc_num` items
    fn idf(doc_num: u64, doc_freq: u64) -> f64;
    /// Weight of a term given its count and its IDF entry, if any
    fn tf_idf(tf: u32, idf: Option<f64>) -> f64;
}

/// ln(N / df) and tf × idf
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        (doc_num as f64 / doc_freq as f64).ln()
    }

    #[inline]
    fn tf_idf(tf: u32, idf: Option<f64>) -> f64 {
        // tf が 0 なら idf は引かない
        if tf == 0 {
            return 0.0;
        }
        match idf {
            Some(idf) if idf != 0.0 => tf as f64 * idf,
            _ => 0.0,
        }
    }
}

/// IDF values per item, only for the terms that item contains.
///
/// The value of a term is the same in every item that holds it; the per-item
/// layout keeps "absent term" distinguishable from "idf of zero".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdfTable {
    vocabulary: IndexSet<String>,
    doc_num: u64,
    /// item -> (vocabulary index -> idf), in first-occurrence order
    rows: BTreeMap<ItemId, IndexMap<usize, f64>>,
}

impl IdfTable {
    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }

    /// Number of items the table was built from
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// IDF of `term` for item `id`, `None` when the item does not contain it
    pub fn get(&self, id: ItemId, term: &str) -> Option<f64> {
        let idx = self.vocabulary.get_index_of(term)?;
        self.get_by_index(id, idx)
    }

    #[inline]
    pub fn get_by_index(&self, id: ItemId, term_idx: usize) -> Option<f64> {
        self.rows.get(&id)?.get(&term_idx).copied()
    }

    /// (term, idf) pairs of one item
    pub fn iter_row(&self, id: ItemId) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.rows.get(&id).into_iter().flat_map(move |row| {
            row.iter().filter_map(move |(&idx, &idf)| {
                self.vocabulary.get_index(idx).map(|term| (term.as_str(), idf))
            })
        })
    }

    /// First item holding a vocabulary index out of range
    pub(crate) fn first_misshapen_row(&self) -> Option<ItemId> {
        let width = self.vocabulary.len();
        self.rows
            .iter()
            .find(|(_, row)| row.keys().any(|&idx| idx >= width))
            .map(|(&id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// IDF of every term occurring in each item, with the default engine
pub fn compute_inverse_document_frequency(corpus: &Corpus) -> IdfTable {
    compute_inverse_document_frequency_with::<DefaultTFIDFEngine>(corpus)
}

pub fn compute_inverse_document_frequency_with<E: TFIDFEngine>(corpus: &Corpus) -> IdfTable {
    let vocabulary = corpus.vocabulary();
    let df = DocumentFrequency::from_corpus(corpus);
    let doc_num = df.doc_num();
    // df はコーパス全体で一度だけ数える
    let term_idf: Vec<f64> = (0..vocabulary.len()).map(|idx| E::idf(doc_num, df.get(idx))).collect();

    let rows: BTreeMap<ItemId, IndexMap<usize, f64>> = corpus
        .items()
        .par_iter()
        .map(|(&id, tokens)| {
            let mut row = IndexMap::new();
            for token in tokens {
                if let Some(idx) = vocabulary.get_index_of(token.as_str()) {
                    row.entry(idx).or_insert(term_idf[idx]);
                }
            }
            tracing::trace!(id, terms = row.len(), "idf row");
            (id, row)
        })
        .collect();

    tracing::debug!(items = rows.len(), vocabulary = vocabulary.len(), "inverse document frequency computed");
    IdfTable {
        vocabulary: vocabulary.clone(),
        doc_num,
        rows,
    }
}

/// TF-IDF weights per item, dense over the vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfTable {
    vocabulary: IndexSet<String>,
    rows: BTreeMap<ItemId, Vec<f64>>,
}

impl TfIdfTable {
    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }

    pub fn row(&self, id: ItemId) -> Option<&[f64]> {
        self.rows.get(&id).map(Vec::as_slice)
    }

    /// Weight of `term` in item `id`
    /// unknown items and terms weigh 0
    pub fn weight(&self, id: ItemId, term: &str) -> f64 {
        self.vocabulary
            .get_index_of(term)
            .map_or(0.0, |idx| self.weight_by_index(id, idx))
    }

    #[inline]
    pub fn weight_by_index(&self, id: ItemId, term_idx: usize) -> f64 {
        self.rows
            .get(&id)
            .and_then(|row| row.get(term_idx))
            .copied()
            .unwrap_or(0.0)
    }

    /// (term, weight) pairs of one item, zero entries included
    pub fn iter_row(&self, id: ItemId) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.rows
            .get(&id)
            .into_iter()
            .flat_map(move |row| self.vocabulary.iter().map(String::as_str).zip(row.iter().copied()))
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

/// tf × idf for every vocabulary term of every item, with the default engine
pub fn compute_tf_idf(tf: &TermFrequencyTable, idf: &IdfTable) -> TfIdfTable {
    compute_tf_idf_with::<DefaultTFIDFEngine>(tf, idf)
}

pub fn compute_tf_idf_with<E: TFIDFEngine>(tf: &TermFrequencyTable, idf: &IdfTable) -> TfIdfTable {
    let vocabulary = tf.vocabulary();
    // tf の列番号 -> idf の列番号
    let idf_index: Vec<Option<usize>> = vocabulary
        .iter()
        .map(|term| idf.vocabulary().get_index_of(term.as_str()))
        .collect();
    let rows: BTreeMap<ItemId, Vec<f64>> = tf
        .ids()
        .map(|id| {
            let counts = tf.row(id).unwrap_or_default();
            let weights: Vec<f64> = counts
                .iter()
                .zip(&idf_index)
                .map(|(&count, &term_idx)| {
                    if count == 0 {
                        0.0
                    } else {
                        E::tf_idf(count, term_idx.and_then(|j| idf.get_by_index(id, j)))
                    }
                })
                .collect();
            (id, weights)
        })
        .collect();
    tracing::debug!(items = rows.len(), "tf-idf computed");
    TfIdfTable {
        vocabulary: vocabulary.clone(),
        rows,
    }
}
