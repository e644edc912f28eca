use std::sync::LazyLock;

use regex::Regex;

use super::stop_words::StopWords;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid digit regex"));
static WORDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Turns raw text into normalized tokens.
///
/// 1. every digit is removed from the text
/// 2. the remainder is split into maximal runs of word characters
/// 3. stop words are dropped
///
/// Token order and duplicates are preserved. There is no stemming and no case
/// folding unless `with_lowercase(true)` is set.
///
/// # Examples
/// ```
/// use tfidf_ranker::Tokenizer;
/// let tokenizer = Tokenizer::default();
/// assert_eq!(tokenizer.tokenize("nyc is the best city"), vec!["nyc", "best", "city"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: StopWords,
    lowercase: bool,
}

impl Tokenizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, lowercase: false }
    }

    /// Fold tokens to lowercase before the stop word check
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let stripped = DIGITS.replace_all(text, "");
        WORDS
            .find_iter(&stripped)
            .map(|m| {
                if self.lowercase {
                    m.as_str().to_lowercase()
                } else {
                    m.as_str().to_string()
                }
            })
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stop_words_in_order() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("nyc is the best city"), vec!["nyc", "best", "city"]);
    }

    #[test]
    fn keeps_duplicates() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("flow and more flow over the wing flow"),
            vec!["flow", "flow", "wing", "flow"]
        );
    }

    #[test]
    fn strips_digits() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("street 42 is busy");
        assert_eq!(tokens, vec!["street", "busy"]);
        assert!(tokens.iter().all(|t| !t.chars().any(|c| c.is_ascii_digit())));
    }

    #[test]
    fn digits_inside_words_are_removed_not_split() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("mach2 number3x"), vec!["mach", "numberx"]);
    }

    #[test]
    fn punctuation_separates_tokens() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("hey, my name is mir. i go to nyu."),
            vec!["hey", "name", "mir", "i", "go", "nyu"]
        );
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  \n\t ").is_empty());
        assert!(tokenizer.tokenize("1234 5678 ...").is_empty());
    }

    #[test]
    fn case_is_kept_by_default() {
        let tokenizer = Tokenizer::default();
        // "The" is not in the list, "the" is
        assert_eq!(tokenizer.tokenize("The the Wing"), vec!["The", "Wing"]);
    }

    #[test]
    fn lowercase_option_folds_before_filtering() {
        let tokenizer = Tokenizer::default().with_lowercase(true);
        assert_eq!(tokenizer.tokenize("The the Wing"), vec!["wing"]);
    }

    #[test]
    fn custom_stop_list() {
        let tokenizer = Tokenizer::new(["wing"].into_iter().collect());
        assert_eq!(tokenizer.tokenize("the wing flow"), vec!["the", "flow"]);
    }
}
