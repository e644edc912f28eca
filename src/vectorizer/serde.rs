use std::{fs, path::Path};

use ::serde::{ser::SerializeStruct, Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    vectorizer::{evaluate::scoring::ScoreTable, space::ComparisonVectors, CorpusTables, Pipeline},
};

/// Snapshot layout version written next to the tables
pub const SNAPSHOT_VERSION: u32 = 1;

/// Owned, deserializable form of a `Pipeline` snapshot.
/// Converts back with `into_pipeline`.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSnapshot {
    pub version: u32,
    pub queries: CorpusTables,
    pub documents: CorpusTables,
    pub vectors: ComparisonVectors,
    pub scores: ScoreTable,
}

/// Only the version field, read before the full layout
#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

impl PipelineSnapshot {
    /// Decode a CBOR snapshot.
    ///
    /// Fails with `Error::SnapshotVersion` for another layout version and with
    /// `Error::InvalidSnapshot` when a table row does not fit its vocabulary.
    pub fn from_cbor_slice(bytes: &[u8]) -> Result<Self> {
        let header: SnapshotHeader = serde_cbor::from_slice(bytes)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(Error::SnapshotVersion {
                found: header.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        let snapshot: Self = serde_cbor::from_slice(bytes)?;
        snapshot.check_shapes()?;
        Ok(snapshot)
    }

    fn check_shapes(&self) -> Result<()> {
        for (side, tables) in [("queries", &self.queries), ("documents", &self.documents)] {
            if let Some(id) = tables.tf.first_misshapen_row() {
                return Err(Error::InvalidSnapshot(format!("{side} tf row {id} does not fit the vocabulary")));
            }
            if let Some(id) = tables.idf.first_misshapen_row() {
                return Err(Error::InvalidSnapshot(format!("{side} idf row {id} does not fit the vocabulary")));
            }
            if let Some(id) = tables.tf_idf.first_misshapen_row() {
                return Err(Error::InvalidSnapshot(format!("{side} tf-idf row {id} does not fit the vocabulary")));
            }
        }
        if let Some((query_id, document_id)) = self.vectors.first_misaligned() {
            return Err(Error::InvalidSnapshot(format!(
                "document {document_id} vector is not aligned to query {query_id}"
            )));
        }
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_cbor_slice(&bytes)
    }

    pub fn into_pipeline(self) -> Pipeline {
        Pipeline {
            queries: self.queries,
            documents: self.documents,
            vectors: self.vectors,
            scores: self.scores,
        }
    }
}

impl Serialize for Pipeline {
    /// Every intermediate table, tagged with `SNAPSHOT_VERSION`.
    /// Read it back with `PipelineSnapshot`.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ::serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Pipeline", 5)?;
        state.serialize_field("version", &SNAPSHOT_VERSION)?;
        state.serialize_field("queries", &self.queries)?;
        state.serialize_field("documents", &self.documents)?;
        state.serialize_field("vectors", &self.vectors)?;
        state.serialize_field("scores", &self.scores)?;
        state.end()
    }
}

impl Pipeline {
    /// CBOR-encode every table
    pub fn to_cbor_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Write the CBOR snapshot to `path`
    pub fn write_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_cbor_vec()?;
        fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }
}
