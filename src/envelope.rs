//! Signed-envelope metadata decoding
//!
//! gittuf stores policy metadata as DSSE-style envelopes: a JSON object with
//! a base64-encoded `payload` and a `signatures` array. This core decodes the
//! payload into a generic JSON document; it never verifies signatures.
//!
//! The three decode stages fail distinctly so callers can tell a broken
//! envelope from a broken payload encoding from a broken inner document.

use crate::error::EnvelopeError;
use crate::types::MetadataDocument;
use base64::Engine;
use serde::Deserialize;

/// A parsed (but not yet decoded) metadata envelope
///
/// `signatures` is preserved exactly as stored; this core never interprets it.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Base64-encoded metadata document (standard alphabet, padded)
    pub payload: String,
    /// Opaque signature list, uninterpreted
    #[serde(default)]
    pub signatures: serde_json::Value,
}

impl Envelope {
    /// Parse raw bytes as the outer envelope JSON
    ///
    /// Malformed JSON and a missing or non-string `payload` field are both
    /// reported as [`EnvelopeError::MalformedEnvelope`].
    pub fn parse(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(bytes).map_err(|e| EnvelopeError::MalformedEnvelope(e.to_string()))
    }

    /// Base64-decode the payload and parse it as a JSON object
    pub fn decode_payload(&self) -> Result<MetadataDocument, EnvelopeError> {
        let payload = base64::engine::general_purpose::STANDARD.decode(&self.payload)?;

        serde_json::from_slice(&payload)
            .map_err(|e| EnvelopeError::MalformedMetadataDocument(e.to_string()))
    }
}

/// Decode an envelope blob into its metadata document in one step
pub fn decode_envelope(bytes: &[u8]) -> Result<MetadataDocument, EnvelopeError> {
    let envelope = Envelope::parse(bytes)?;
    let document = envelope.decode_payload()?;

    tracing::debug!(
        "Decoded metadata document with {} top-level keys (type: {})",
        document.len(),
        document
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or("<none>")
    );

    Ok(document)
}
