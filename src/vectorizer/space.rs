use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{
    corpus::{Corpus, ItemId},
    tfidf::TfIdfTable,
};

/// Vectors compared for one query.
///
/// `query[i]` is the query's own TF-IDF weight for its i-th token. Each
/// document vector has the same length; position i holds the document's
/// weight for that same token, or 0 when the document lacks it.
/// A token repeated in the query fills several positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryVectors {
    pub query: Vec<f64>,
    pub documents: BTreeMap<ItemId, Vec<f64>>,
}

/// Comparison vectors of every query against every document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonVectors {
    queries: BTreeMap<ItemId, QueryVectors>,
}

impl ComparisonVectors {
    pub fn get(&self, query_id: ItemId) -> Option<&QueryVectors> {
        self.queries.get(&query_id)
    }

    /// Query vector of `query_id`
    pub fn query_vector(&self, query_id: ItemId) -> Option<&[f64]> {
        self.queries.get(&query_id).map(|v| v.query.as_slice())
    }

    /// Document vector aligned to `query_id`'s tokens
    pub fn document_vector(&self, query_id: ItemId, document_id: ItemId) -> Option<&[f64]> {
        self.queries
            .get(&query_id)?
            .documents
            .get(&document_id)
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &QueryVectors)> + '_ {
        self.queries.iter().map(|(id, v)| (*id, v))
    }

    /// First (query, document) pair whose vectors differ in length
    pub(crate) fn first_misaligned(&self) -> Option<(ItemId, ItemId)> {
        self.queries.iter().find_map(|(&query_id, v)| {
            v.documents
                .iter()
                .find(|(_, doc)| doc.len() != v.query.len())
                .map(|(&document_id, _)| (query_id, document_id))
        })
    }

    pub(crate) fn inner(&self) -> &BTreeMap<ItemId, QueryVectors> {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Project queries and documents onto each query's own tokens.
///
/// Only the query's tokens span the space; terms found only in documents are
/// ignored.
pub fn build_comparison_vectors(
    queries: &Corpus,
    documents: &Corpus,
    query_tfidf: &TfIdfTable,
    document_tfidf: &TfIdfTable,
) -> ComparisonVectors {
    let queries: BTreeMap<ItemId, QueryVectors> = queries
        .items()
        .par_iter()
        .map(|(&query_id, tokens)| {
            let query: Vec<f64> = tokens
                .iter()
                .map(|token| query_tfidf.weight(query_id, token))
                .collect();

            // クエリのトークン -> 文書側の語彙番号 (文書コーパスに無ければ None)
            let columns: Vec<Option<usize>> = tokens
                .iter()
                .map(|token| document_tfidf.vocabulary().get_index_of(token.as_str()))
                .collect();

            let documents: BTreeMap<ItemId, Vec<f64>> = documents
                .ids()
                .map(|document_id| {
                    let vector: Vec<f64> = columns
                        .iter()
                        .map(|&column| column.map_or(0.0, |idx| document_tfidf.weight_by_index(document_id, idx)))
                        .collect();
                    (document_id, vector)
                })
                .collect();

            tracing::trace!(query_id, dims = query.len(), "comparison vectors built");
            (query_id, QueryVectors { query, documents })
        })
        .collect();

    tracing::debug!(queries = queries.len(), documents = documents.len(), "comparison vectors built");
    ComparisonVectors { queries }
}
