pub mod compute;
pub mod corpus;
pub mod evaluate;
pub mod serde;
pub mod space;
pub mod tfidf;
pub mod token;

use std::path::Path;

use ::serde::{Deserialize, Serialize};

use crate::{
    analyzer::{StopWords, Tokenizer},
    config::RankerConfig,
    error::Result,
    vectorizer::{
        corpus::Corpus,
        evaluate::scoring::{emit_ranking_top, rank_all, RankedRecord, ScoreTable},
        space::{build_comparison_vectors, ComparisonVectors},
        tfidf::{compute_inverse_document_frequency, compute_tf_idf, IdfTable, TfIdfTable},
        token::{compute_term_frequency, TermFrequencyTable},
    },
};

/// Every table one corpus goes through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusTables {
    pub corpus: Corpus,
    pub tf: TermFrequencyTable,
    pub idf: IdfTable,
    pub tf_idf: TfIdfTable,
}

impl CorpusTables {
    /// TF -> IDF -> TF-IDF
    pub fn build(corpus: Corpus) -> Self {
        let tf = compute_term_frequency(&corpus);
        let idf = compute_inverse_document_frequency(&corpus);
        let tf_idf = compute_tf_idf(&tf, &idf);
        Self { corpus, tf, idf, tf_idf }
    }
}

/// Query/document ranking pipeline.
///
/// Built in one pass by `Pipeline::run`:
/// corpora -> TF / IDF / TF-IDF per corpus -> comparison vectors -> scores.
/// Nothing is mutated after construction; every stage stays available for
/// inspection or for a snapshot (see `vectorizer::serde`).
///
/// # Examples
/// ```
/// use tfidf_ranker::{Corpus, Pipeline, Tokenizer};
/// let tokenizer = Tokenizer::default();
/// let queries = Corpus::from_texts(["wing flow", "drag"], &tokenizer);
/// let documents = Corpus::from_texts(["wing flow wing", "drag"], &tokenizer);
/// let pipeline = Pipeline::run(queries, documents);
/// let ranking = pipeline.ranking();
/// assert_eq!((ranking[0].query_id, ranking[0].document_id), (1, 1));
/// assert!(ranking[0].score > 0.0);
/// assert_eq!(ranking[1].score, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub queries: CorpusTables,
    pub documents: CorpusTables,
    pub vectors: ComparisonVectors,
    pub scores: ScoreTable,
}

impl Pipeline {
    /// Run every stage over an already parsed corpus pair
    pub fn run(queries: Corpus, documents: Corpus) -> Self {
        tracing::info!(queries = queries.len(), documents = documents.len(), "building tf-idf tables");
        let (queries, documents) = rayon::join(|| CorpusTables::build(queries), || CorpusTables::build(documents));

        tracing::info!("building comparison vectors");
        let vectors = build_comparison_vectors(
            &queries.corpus,
            &documents.corpus,
            &queries.tf_idf,
            &documents.tf_idf,
        );

        tracing::info!("scoring query/document pairs");
        let scores = rank_all(&vectors);

        Self { queries, documents, vectors, scores }
    }

    /// Load both corpora from disk with `config` and run the pipeline
    pub fn from_files(queries: impl AsRef<Path>, documents: impl AsRef<Path>, config: &RankerConfig) -> Result<Self> {
        let tokenizer = tokenizer_from_config(config)?;
        let queries = Corpus::load(queries, &config.markers, &tokenizer)?;
        let documents = Corpus::load(documents, &config.markers, &tokenizer)?;
        Ok(Self::run(queries, documents))
    }

    /// All records, ordered for output
    pub fn ranking(&self) -> Vec<RankedRecord> {
        emit_ranking_top(&self.scores, None)
    }

    /// At most `top` records per query
    pub fn ranking_top(&self, top: Option<usize>) -> Vec<RankedRecord> {
        emit_ranking_top(&self.scores, top)
    }
}

/// Tokenizer described by `config`
pub fn tokenizer_from_config(config: &RankerConfig) -> Result<Tokenizer> {
    let stop_words = match &config.stop_words_path {
        Some(path) => {
            let words = StopWords::load(path)?;
            tracing::info!(path = %path.display(), words = words.len(), "stop word list loaded");
            words
        }
        None => StopWords::closed_class(),
    };
    Ok(Tokenizer::new(stop_words).with_lowercase(config.lowercase))
}
