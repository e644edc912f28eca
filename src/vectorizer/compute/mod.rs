pub mod compare;

pub use compare::{cosine_similarity, Compare, DefaultCompare};
