use std::num::ParseIntError;
use thiserror::Error;

/// Reasons a byte sequence is not a well-formed bencoded value.
#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("Unexpected end of input")]
	UnexpectedEnd,

	#[error("Invalid Integer {0}")]
	InvalidInteger(String),

	#[error("Invalid Format {0}")]
	InvalidFormat(String),

	#[error("Duplicate dictionary key {0:?}")]
	DuplicateKey(String),

	#[error("Trailing data: value ends at byte {consumed} of {total}")]
	TrailingData { consumed: usize, total: usize },

	#[error("Invalid length header {0}")]
	InvalidLength(ParseIntError)
}

impl From<ParseIntError> for BencodeError {
	fn from(err: ParseIntError) -> Self {
		BencodeError::InvalidLength(err)
	}
}
