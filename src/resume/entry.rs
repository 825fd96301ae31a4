use std::collections::BTreeMap;

use crate::bencode::{decode_document, encode_bvalue, BValue};
use crate::resume::{ResetError, UploadCounter};
use crate::utils::display_text;

/// How a sub-document was stored in the outer dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A byte string holding an independently encoded dictionary.
    Encoded,
    /// A dictionary value embedded directly.
    Structured,
}

/// One torrent's resume data, decoded regardless of how it was stored.
#[derive(Debug, Clone)]
pub struct ResumeEntry {
    pub id: Vec<u8>,
    pub fields: BTreeMap<Vec<u8>, BValue>,
    pub storage: Storage,
}

impl ResumeEntry {
    pub fn from_bvalue(id: &[u8], value: &BValue) -> Result<Self, ResetError> {
        let (decoded, storage) = match value {
            BValue::ByteString(raw) => {
                let decoded = decode_document(raw).map_err(|source| ResetError::Format {
                    id: hex::encode(id),
                    source,
                })?;
                (decoded, Storage::Encoded)
            }
            BValue::Dict(_) => (value.clone(), Storage::Structured),
            other => {
                return Err(ResetError::InvalidEntry {
                    id: hex::encode(id),
                    kind: other.kind(),
                })
            }
        };

        match decoded {
            BValue::Dict(fields) => Ok(ResumeEntry {
                id: id.to_vec(),
                fields,
                storage,
            }),
            other => Err(ResetError::InvalidEntry {
                id: hex::encode(id),
                kind: other.kind(),
            }),
        }
    }

    pub fn id_hex(&self) -> String {
        hex::encode(&self.id)
    }

    /// Human-readable name, `<unknown>` when the field is absent or not a
    /// byte string.
    pub fn display_name(&self, name_field: &[u8]) -> String {
        self.fields
            .get(name_field)
            .and_then(BValue::as_bytes)
            .map(display_text)
            .unwrap_or_else(|| "<unknown>".to_string())
    }

    pub fn counter(&self, counter_field: &[u8]) -> UploadCounter {
        UploadCounter::from_field(self.fields.get(counter_field))
    }

    pub fn set_field(&mut self, key: &[u8], value: BValue) {
        self.fields.insert(key.to_vec(), value);
    }

    /// Back into the representation the entry was read from.
    pub fn into_bvalue(self) -> BValue {
        let dict = BValue::Dict(self.fields);
        match self.storage {
            Storage::Encoded => BValue::ByteString(encode_bvalue(&dict)),
            Storage::Structured => dict,
        }
    }
}
