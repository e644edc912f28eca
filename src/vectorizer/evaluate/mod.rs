pub mod scoring;

pub use scoring::{emit_ranking, emit_ranking_top, rank_all, Hits, RankedRecord, ScoreTable};
