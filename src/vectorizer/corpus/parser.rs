use std::io::BufRead;

use crate::analyzer::Tokenizer;

use super::{Corpus, RecordMarkers};

/// Parse a record-marked stream into a `Corpus`.
///
/// A line starting with `markers.body` opens a body. Every following line is
/// part of that body until a line starting with `markers.record` or the end of
/// the stream. Body lines are joined with a trailing single space each and
/// tokenized. Anything outside a body is skipped.
///
/// Each body becomes the next item id, whatever number the record marker
/// line carries. A stream that ends inside a body still yields that body.
pub fn parse_corpus<R: BufRead>(reader: R, markers: &RecordMarkers, tokenizer: &Tokenizer) -> std::io::Result<Corpus> {
    let mut corpus = Corpus::new();
    let mut body: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        match body.take() {
            Some(text) if line.starts_with(markers.record.as_str()) => {
                let id = corpus.push_item(tokenizer.tokenize(&text));
                tracing::debug!(id, "record parsed");
            }
            Some(mut text) => {
                text.push_str(&line);
                text.push(' ');
                body = Some(text);
            }
            None => {
                if line.starts_with(markers.body.as_str()) {
                    body = Some(String::new());
                }
            }
        }
    }

    // 末尾のレコード (終端マーカーなし)
    if let Some(text) = body {
        let id = corpus.push_item(tokenizer.tokenize(&text));
        tracing::debug!(id, "record parsed at end of stream");
    }

    Ok(corpus)
}
