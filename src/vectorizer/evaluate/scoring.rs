use std::{cmp::Ordering, collections::BTreeMap, fmt::{self, Debug, Display}};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{
    compute::compare::{Compare, DefaultCompare},
    corpus::ItemId,
    space::ComparisonVectors,
};

/// Cosine scores of every query against every document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    scores: BTreeMap<ItemId, BTreeMap<ItemId, f64>>,
}

impl ScoreTable {
    pub fn score(&self, query_id: ItemId, document_id: ItemId) -> Option<f64> {
        self.scores.get(&query_id)?.get(&document_id).copied()
    }

    /// document -> score for one query
    pub fn query_scores(&self, query_id: ItemId) -> Option<&BTreeMap<ItemId, f64>> {
        self.scores.get(&query_id)
    }

    /// Query ids in ascending order
    pub fn query_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.scores.keys().copied()
    }

    /// Unsorted hits of one query
    pub fn hits(&self, query_id: ItemId) -> Option<Hits<ItemId>> {
        self.scores
            .get(&query_id)
            .map(|docs| Hits::new(docs.iter().map(|(&doc, &score)| (doc, score)).collect()))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Score every (query, document) pair with the default comparison
pub fn rank_all(vectors: &ComparisonVectors) -> ScoreTable {
    rank_all_with::<DefaultCompare>(vectors)
}

/// Score every (query, document) pair
pub fn rank_all_with<C: Compare<f64>>(vectors: &ComparisonVectors) -> ScoreTable {
    let scores: BTreeMap<ItemId, BTreeMap<ItemId, f64>> = vectors
        .inner()
        .par_iter()
        .map(|(&query_id, qv)| {
            let per_doc: BTreeMap<ItemId, f64> = qv
                .documents
                .iter()
                .map(|(&document_id, dv)| (document_id, C::cosine_similarity(&qv.query, dv)))
                .collect();
            tracing::debug!(query_id, documents = per_doc.len(), "cosine similarity finished");
            (query_id, per_doc)
        })
        .collect();
    ScoreTable { scores }
}

/// One output line: query, document, score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub query_id: ItemId,
    pub document_id: ItemId,
    pub score: f64,
}

impl Display for RankedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // {:?} keeps a decimal point on whole numbers (1.0, 0.0)
        write!(f, "{}\t{}\t{:?}", self.query_id, self.document_id, self.score)
    }
}

/// Flatten scores into ranked records.
///
/// Queries come in ascending id order. Within a query, documents are ordered
/// by score descending and then by document id ascending.
pub fn emit_ranking(scores: &ScoreTable) -> Vec<RankedRecord> {
    emit_ranking_top(scores, None)
}

/// Same as `emit_ranking`, keeping at most `top` documents per query
pub fn emit_ranking_top(scores: &ScoreTable, top: Option<usize>) -> Vec<RankedRecord> {
    let mut records = Vec::new();
    for query_id in scores.query_ids() {
        let Some(mut hits) = scores.hits(query_id) else { continue };
        hits.sort_by_score_desc();
        if let Some(k) = top {
            hits.top(k);
        }
        records.extend(hits.list.into_iter().map(|(document_id, score)| RankedRecord {
            query_id,
            document_id,
            score,
        }));
    }
    records
}

/// Scored keys of one query
pub struct Hits<K> {
    /// (key, score)
    pub list: Vec<(K, f64)>,
}

impl<K> Hits<K>
where
    K: Ord,
{
    pub fn new(list: Vec<(K, f64)>) -> Self {
        Hits { list }
    }

    /// Sort by descending score, equal scores by ascending key
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            ord => ord,
        });
        self
    }

    /// Keep the first `k` entries
    pub fn top(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for (key, score) in &self.list {
                writeln!(f, "    {:?}: {:.6}", key, score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}
