use crate::bencode::BValue;

/// The upload counter of one sub-document, classified by how it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCounter {
    /// Field absent; counts as zero.
    Missing,
    /// Stored as a bencoded integer.
    Native(i64),
    /// Stored as a big-endian unsigned integer in a byte string of fixed width.
    FixedWidth(Vec<u8>),
    /// Stored as a list or dictionary; left alone and treated as zero.
    Unsupported(&'static str),
}

impl UploadCounter {
    pub fn from_field(field: Option<&BValue>) -> Self {
        match field {
            None => UploadCounter::Missing,
            Some(BValue::Integer(n)) => UploadCounter::Native(*n),
            Some(BValue::ByteString(bytes)) => UploadCounter::FixedWidth(bytes.clone()),
            Some(other @ (BValue::List(_) | BValue::Dict(_))) => {
                UploadCounter::Unsupported(other.kind())
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            UploadCounter::Missing | UploadCounter::Unsupported(_) => true,
            UploadCounter::Native(n) => *n == 0,
            UploadCounter::FixedWidth(bytes) => bytes.iter().all(|&b| b == 0),
        }
    }

    /// Byte count for display. Saturates when a fixed-width value does not
    /// fit in 128 bits; negative native values report their magnitude.
    pub fn as_u128(&self) -> u128 {
        match self {
            UploadCounter::Missing | UploadCounter::Unsupported(_) => 0,
            UploadCounter::Native(n) => n.unsigned_abs() as u128,
            UploadCounter::FixedWidth(bytes) => {
                let significant = match bytes.iter().position(|&b| b != 0) {
                    Some(first) => &bytes[first..],
                    None => return 0,
                };
                if significant.len() > 16 {
                    return u128::MAX;
                }
                significant
                    .iter()
                    .fold(0u128, |acc, &b| (acc << 8) | b as u128)
            }
        }
    }

    /// Width in bytes the value occupies on the wire, never less than one.
    ///
    /// For native integers this is the minimal big-endian width of the
    /// magnitude; it is informational only since native counters are
    /// rewritten as native integers.
    pub fn width(&self) -> usize {
        match self {
            UploadCounter::FixedWidth(bytes) => bytes.len().max(1),
            UploadCounter::Native(n) => {
                let bits = 64 - n.unsigned_abs().leading_zeros() as usize;
                ((bits + 7) / 8).max(1)
            }
            UploadCounter::Missing | UploadCounter::Unsupported(_) => 1,
        }
    }

    /// The zero replacement in the same representation, or `None` when there
    /// is nothing to rewrite.
    pub fn zeroed(&self) -> Option<BValue> {
        match self {
            UploadCounter::Native(_) => Some(BValue::Integer(0)),
            UploadCounter::FixedWidth(_) => Some(BValue::ByteString(vec![0u8; self.width()])),
            UploadCounter::Missing | UploadCounter::Unsupported(_) => None,
        }
    }
}
