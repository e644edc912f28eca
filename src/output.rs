use std::{fmt::Write as _, io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::{
    error::{Error, Result},
    vectorizer::evaluate::scoring::RankedRecord,
};

/// One `query \t document \t score` line per record
pub fn render(records: &[RankedRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 24);
    for record in records {
        // String への書き込みは失敗しない
        let _ = writeln!(out, "{record}");
    }
    out
}

/// Write rankings to `path`.
///
/// The whole output is rendered first and written to a temporary file next
/// to `path`, which then replaces it. A failed run leaves no partial file.
pub fn write_rankings(path: impl AsRef<Path>, records: &[RankedRecord]) -> Result<()> {
    let path = path.as_ref();
    let rendered = render(records);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    tmp.write_all(rendered.as_bytes()).map_err(|e| Error::io(path, e))?;
    tmp.flush().map_err(|e| Error::io(path, e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    tracing::info!(path = %path.display(), records = records.len(), "rankings written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(query_id: u32, document_id: u32, score: f64) -> RankedRecord {
        RankedRecord { query_id, document_id, score }
    }

    #[test]
    fn render_lines() {
        let records = [record(1, 4, 0.5), record(1, 2, 0.0), record(2, 1, 1.0)];
        assert_eq!(render(&records), "1\t4\t0.5\n1\t2\t0.0\n2\t1\t1.0\n");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale\n").unwrap();
        write_rankings(&path, &[record(1, 1, 0.25)]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t1\t0.25\n");
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_rankings(&path, &[record(1, 1, 0.25)]).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
    }
}
