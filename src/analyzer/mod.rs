pub mod stop_words;
pub mod tokenizer;

pub use stop_words::{StopWords, CLOSED_CLASS_STOP_WORDS};
pub use tokenizer::Tokenizer;
