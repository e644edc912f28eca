use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::vectorizer::corpus::RecordMarkers;

/// Line prefix that opens a new record
pub const DEFAULT_RECORD_MARKER: &str = ".I";
/// Line prefix that opens the body text of a record
pub const DEFAULT_BODY_MARKER: &str = ".W";
/// Where rankings go when no output path is given
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";
/// `RUST_LOG` fallback used by the binary
pub const DEFAULT_LOG_FILTER: &str = "tfidf_ranker=info";

/// Run configuration shared by the library pipeline and the CLI.
///
/// Everything here has a usable default, so `RankerConfig::default()`
/// reproduces the plain `.I` / `.W` behaviour with the built-in stop list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    /// record / body markers used by the corpus parser
    pub markers: RecordMarkers,
    /// external stop word list, one word per line
    /// `None` uses the built-in closed-class list
    pub stop_words_path: Option<PathBuf>,
    /// fold tokens to lowercase before stop word filtering
    pub lowercase: bool,
    /// emit at most this many documents per query
    pub top: Option<usize>,
    /// rayon worker count (0 = rayon default)
    pub threads: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            markers: RecordMarkers::default(),
            stop_words_path: None,
            lowercase: false,
            top: None,
            threads: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_cranfield_markers() {
        let config = RankerConfig::default();
        assert_eq!(config.markers.record, DEFAULT_RECORD_MARKER);
        assert_eq!(config.markers.body, DEFAULT_BODY_MARKER);
        assert!(config.stop_words_path.is_none());
        assert!(!config.lowercase);
        assert_eq!(config.top, None);
        assert_eq!(config.threads, 0);
    }
}
