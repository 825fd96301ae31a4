use thiserror::Error;

use crate::bencode::BencodeError;

#[derive(Debug, Error)]
pub enum ResetError {
    #[error("State file root must be a dictionary, found {0}")]
    NotADictionary(&'static str),

    #[error("Entry {id}: sub-document is not valid bencode: {source}")]
    Format {
        id: String,
        #[source]
        source: BencodeError,
    },

    #[error("Entry {id}: expected a dictionary sub-document, found {kind}")]
    InvalidEntry { id: String, kind: &'static str },
}
