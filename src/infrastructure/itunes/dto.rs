//! iTunes Search API response structures.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::domain::entities::{ArtistRecord, SoftwareRecord};
use crate::domain::ports::CatalogResults;

/// Top-level lookup/search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsEnvelope {
    /// Number of records the service says it returned.
    #[serde(default)]
    pub result_count: usize,
    /// Heterogeneous records, decoded one by one with [`DecodedRecord::decode`].
    pub results: Vec<Value>,
}

/// Outcome of decoding one entry of `results`.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DecodedRecord {
    Software(Box<SoftwareRecord>),
    Artist(ArtistRecord),
    Unrecognized,
}

impl DecodedRecord {
    /// Tries the item shape first, then the publisher shape.
    #[must_use]
    pub fn decode(value: &Value) -> Self {
        if let Ok(software) = SoftwareRecord::deserialize(value) {
            return Self::Software(Box::new(software));
        }
        if let Ok(artist) = ArtistRecord::deserialize(value) {
            return Self::Artist(artist);
        }
        Self::Unrecognized
    }
}

impl ResultsEnvelope {
    /// Splits records into items and the first publisher record.
    /// Unrecognized records are dropped.
    #[must_use]
    pub fn partition(&self) -> CatalogResults {
        let mut results = CatalogResults::default();

        for value in &self.results {
            match DecodedRecord::decode(value) {
                DecodedRecord::Software(software) => results.software.push(*software),
                DecodedRecord::Artist(artist) => {
                    if results.artist.is_none() {
                        results.artist = Some(artist);
                    } else {
                        trace!(artist_id = artist.artist_id, "Ignoring extra artist record");
                    }
                }
                DecodedRecord::Unrecognized => {
                    let wrapper_type = value
                        .get("wrapperType")
                        .and_then(serde_json::Value::as_str);
                    trace!(?wrapper_type, "Dropping unrecognized record");
                }
            }
        }

        results
    }
}

/// Parses a response body into an envelope.
///
/// # Errors
/// Returns the `serde_json` error when the body is not an envelope.
pub fn parse_envelope(body: &[u8]) -> Result<ResultsEnvelope, serde_json::Error> {
    serde_json::from_slice(body)
}
