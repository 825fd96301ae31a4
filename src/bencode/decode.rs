use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::error::BencodeError;
use crate::bencode::bvalue::BValue;
use crate::utils::display_text;

/// Deepest list/dictionary nesting accepted before decoding gives up.
pub const MAX_DEPTH: usize = 256;

/// Decodes exactly one value from the front of `input`, returning how many
/// bytes it spans.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    decode_value(input, 0)
}

fn decode_value(input: &[u8], depth: usize) -> Result<(usize, BValue), BencodeError> {
    if input.is_empty() {
        return Err(BencodeError::UnexpectedEnd);
    }

    match input[0] {
        b'i' => decode_integer(input),
        b'l' | b'd' if depth >= MAX_DEPTH => Err(BencodeError::InvalidFormat(
            "Nesting too deep".to_string(),
        )),
        b'l' => decode_list(input, depth + 1),
        b'd' => decode_dict(input, depth + 1),
        c if c.is_ascii_digit() => decode_string(input),
        c => Err(BencodeError::InvalidFormat(format!(
            "Unexpected byte: {:#04x}",
            c
        ))),
    }
}

/// Decodes a whole document: one value that must cover all of `input`.
pub fn decode_document(input: &[u8]) -> Result<BValue, BencodeError> {
    let (consumed, value) = decode_bencode(input)?;
    if consumed != input.len() {
        return Err(BencodeError::TrailingData {
            consumed,
            total: input.len(),
        });
    }
    Ok(value)
}

fn decode_integer(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
	let end_pos = input
		.iter()
		.position(|&b| b == b'e')
		.ok_or(BencodeError::UnexpectedEnd)?;

	let body = &input[1..end_pos];
	let digits = body.strip_prefix(b"-").unwrap_or(body);

	if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
		return Err(BencodeError::InvalidInteger(format!(
			"Non-numeric integer body: {:?}",
			display_text(body)
		)));
	}

	// Only canonical forms survive a round trip: no leading zeros, no "-0"
	if digits[0] == b'0' && (digits.len() > 1 || digits.len() != body.len()) {
		return Err(BencodeError::InvalidInteger(format!(
			"Non-canonical integer: {}",
			display_text(body)
		)));
	}

	// body is ASCII at this point
	let num_str = std::str::from_utf8(body)
		.map_err(|_| BencodeError::InvalidInteger("Non-ASCII integer body".to_string()))?;
	let parsed = num_str.parse::<i64>().map_err(|e| {
		BencodeError::InvalidInteger(format!("Failed to parse integer '{}': {}", num_str, e))
	})?;

	// add 1 to account for 'e'
	Ok((end_pos + 1, BValue::Integer(parsed)))
}

/// Decodes a Bencoded string of the form `<length>:<bytes>`.
fn decode_string(encoded: &[u8]) -> Result<(usize, BValue), BencodeError> {
	let colon_index = encoded
		.iter()
		.position(|b| !b.is_ascii_digit())
		.ok_or(BencodeError::UnexpectedEnd)?;

	if encoded[colon_index] != b':' {
		return Err(BencodeError::InvalidFormat(format!(
			"Expected ':' after string length, found {:#04x}",
			encoded[colon_index]
		)));
	}

	let header = &encoded[..colon_index];
	if header.is_empty() {
		return Err(BencodeError::InvalidFormat("Missing string length".to_string()));
	}
	if header.len() > 1 && header[0] == b'0' {
		return Err(BencodeError::InvalidFormat(format!(
			"Leading zeros in string length: {}",
			display_text(header)
		)));
	}

	let length = std::str::from_utf8(header)
		.map_err(|_| BencodeError::InvalidFormat("Non-ASCII string length".to_string()))?
		.parse::<usize>()?;

	let start_data = colon_index + 1;
	let end_data = start_data
		.checked_add(length)
		.filter(|&end| end <= encoded.len())
		.ok_or(BencodeError::UnexpectedEnd)?;

	let data = &encoded[start_data..end_data];
	Ok((end_data, BValue::ByteString(data.to_vec())))
}

/// Decodes a Bencoded list of the form `l<items>e`.
fn decode_list(encoded: &[u8], depth: usize) -> Result<(usize, BValue), BencodeError> {
    let mut idx = 1; // skip 'l'
    let mut items = Vec::new();

    while idx < encoded.len() && encoded[idx] != b'e' {
        let (consumed, val) = decode_value(&encoded[idx..], depth)?;
        idx += consumed;
        items.push(val);
    }

    // If we've run out of input, the list is unclosed
    if idx >= encoded.len() {
        return Err(BencodeError::UnexpectedEnd);
    }

	// add 1 to account for 'e'
    Ok((idx + 1, BValue::List(items)))
}

/// Decodes a Bencoded dictionary of the form `d<key><value>...e`.
///
/// Keys are accepted in any order; the encoder re-sorts them.
fn decode_dict(encoded: &[u8], depth: usize) -> Result<(usize, BValue), BencodeError> {
    let mut idx = 1; // Skip the initial 'd'
    let mut map = BTreeMap::new();

    while idx < encoded.len() && encoded[idx] != b'e' {
        if !encoded[idx].is_ascii_digit() {
            return Err(BencodeError::InvalidFormat(
                "Dict key must be a ByteString".to_string(),
            ));
        }

        let (key_length, key_value) = decode_string(&encoded[idx..])?;
        idx += key_length;
        let key = match key_value {
            BValue::ByteString(bytes) => bytes,
            other => {
                return Err(BencodeError::InvalidFormat(format!(
                    "Dict key decoded as {}",
                    other.kind()
                )));
            }
        };

        let (consumed_val, value) = decode_value(&encoded[idx..], depth)?;
        idx += consumed_val;

        match map.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                return Err(BencodeError::DuplicateKey(display_text(slot.key())));
            }
        }
    }

    if idx >= encoded.len() {
        return Err(BencodeError::UnexpectedEnd);
    }

	// add 1 to account for 'e'
    Ok((idx + 1, BValue::Dict(map)))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(s: &str) -> BValue {
        BValue::ByteString(s.as_bytes().to_vec())
    }

    #[test]
    fn test_decode_integer() {
        let input = b"i42e";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());
        assert_eq!(value, BValue::Integer(42));
    }

    #[test]
    fn test_decode_negative_integer() {
        let input = b"i-13e";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());
        assert_eq!(value, BValue::Integer(-13));
    }

    #[test]
    fn test_decode_integer_zero() {
        let (consumed, value) = decode_bencode(b"i0e").unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(value, BValue::Integer(0));
    }

    #[test]
    fn test_decode_integer_extremes() {
        let (_, value) = decode_bencode(b"i-9223372036854775808e").unwrap();
        assert_eq!(value, BValue::Integer(i64::MIN));
        let (_, value) = decode_bencode(b"i9223372036854775807e").unwrap();
        assert_eq!(value, BValue::Integer(i64::MAX));
        assert!(decode_bencode(b"i9223372036854775808e").is_err());
    }

    #[test]
    fn test_decode_string() {
        let input = b"5:hello";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());
        assert_eq!(value, bytes("hello"));
    }

    #[test]
    fn test_decode_empty_string() {
        let (consumed, value) = decode_bencode(b"0:").unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(value, BValue::ByteString(Vec::new()));
    }

    #[test]
    fn test_decode_binary_string() {
        let input = b"4:\x00\xff\x40e";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());
        assert_eq!(value, BValue::ByteString(vec![0x00, 0xff, 0x40, b'e']));
    }

    #[test]
    fn test_decode_stops_after_one_value() {
        let (consumed, value) = decode_bencode(b"3:abci1e").unwrap();
        assert_eq!(consumed, 5);
        assert_eq!(value, bytes("abc"));
    }

    #[test]
    fn test_decode_list() {
        // l4:spami42ee => ["spam", 42]
        let input = b"l4:spami42ee";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());
        assert_eq!(
            value,
            BValue::List(vec![bytes("spam"), BValue::Integer(42)])
        );
    }

	#[test]
	fn test_decode_nested_list() {
		let input = b"l4:spaml3:eggi3eee";
		let (consumed, value) = decode_bencode(input).unwrap();
		assert_eq!(consumed, input.len());
		assert_eq!(
			value,
			BValue::List(vec![
				bytes("spam"),
				BValue::List(vec![bytes("egg"), BValue::Integer(3)]),
			])
		);
	}

    #[test]
    fn test_decode_dict() {
        // d3:bar4:spam3:fooi42ee => {"bar":"spam", "foo":42}
        let input = b"d3:bar4:spam3:fooi42ee";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());
        let mut expected_map = BTreeMap::new();
        expected_map.insert(b"bar".to_vec(), bytes("spam"));
        expected_map.insert(b"foo".to_vec(), BValue::Integer(42));
        assert_eq!(value, BValue::Dict(expected_map));
    }

    #[test]
    fn test_decode_empty_dict() {
        let (consumed, value) = decode_bencode(b"de").unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(value, BValue::Dict(BTreeMap::new()));
    }

    #[test]
    fn test_decode_dict_unsorted_keys_accepted() {
        let input = b"d3:fool4:spami1ee3:bar4:eggse";
        let (consumed, value) = decode_bencode(input).unwrap();
        assert_eq!(consumed, input.len());

        let map = value.as_dict().unwrap();
        let keys: Vec<&[u8]> = map.keys().map(Vec::as_slice).collect();
        assert_eq!(keys, vec![&b"bar"[..], &b"foo"[..]]);
        assert_eq!(
            map[&b"foo".to_vec()],
            BValue::List(vec![bytes("spam"), BValue::Integer(1)])
        );
    }

    #[test]
    fn test_decode_dict_binary_key() {
        let input = b"d2:\xde\xadi1ee";
        let (_, value) = decode_bencode(input).unwrap();
        assert!(value.as_dict().unwrap().contains_key(&vec![0xde, 0xad]));
    }

    #[test]
    fn test_decode_document_rejects_trailing_data() {
        assert!(decode_document(b"i1e").is_ok());
        match decode_document(b"i1ei2e") {
            Err(BencodeError::TrailingData { consumed, total }) => {
                assert_eq!((consumed, total), (3, 6));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    //
    // Malformed Inputs: Test expected failures
    //

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(decode_bencode(b""), Err(BencodeError::UnexpectedEnd)));
    }

    #[test]
    fn test_decode_integer_missing_e() {
        assert!(decode_bencode(b"i42").is_err());
    }

    #[test]
    fn test_decode_integer_bad_bodies() {
        let inputs: [&[u8]; 5] = [b"ie", b"i-e", b"i+5e", b"i4x2e", b"i 1e"];
        for input in inputs {
            assert!(
                matches!(decode_bencode(input), Err(BencodeError::InvalidInteger(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_decode_leading_zeros() {
        assert!(decode_bencode(b"i0123e").is_err());
        assert!(decode_bencode(b"i-0e").is_err());
        assert!(decode_bencode(b"i-012e").is_err());
    }

    #[test]
    fn test_decode_string_missing_colon() {
        assert!(decode_bencode(b"5hello").is_err());
        assert!(decode_bencode(b"12").is_err());
    }

    #[test]
    fn test_decode_string_length_exceeds_input() {
        assert!(matches!(
            decode_bencode(b"10:short"),
            Err(BencodeError::UnexpectedEnd)
        ));
        assert!(matches!(
            decode_bencode(b"99999999999999999999999:x"),
            Err(BencodeError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_decode_string_length_leading_zero() {
        assert!(decode_bencode(b"05:hello").is_err());
    }

    #[test]
    fn test_decode_list_unclosed() {
        assert!(decode_bencode(b"l4:spam").is_err());
    }

    #[test]
    fn test_decode_dict_unclosed() {
        assert!(decode_bencode(b"d3:foo4:spam").is_err());
        assert!(decode_bencode(b"d3:foo").is_err());
    }

    #[test]
    fn test_decode_dict_key_not_string() {
        assert!(decode_bencode(b"di42e4:spame").is_err());
    }

    #[test]
    fn test_decode_deep_nesting_is_rejected() {
        assert!(matches!(
            decode_document(&vec![b'l'; 200_000]),
            Err(BencodeError::InvalidFormat(_))
        ));

        let mut nested_dicts = b"d1:a".repeat(100_000);
        nested_dicts.extend_from_slice(b"i1e");
        assert!(decode_document(&nested_dicts).is_err());
    }

    #[test]
    fn test_decode_nesting_at_limit() {
        let mut input = vec![b'l'; MAX_DEPTH];
        input.extend(vec![b'e'; MAX_DEPTH]);
        assert!(decode_document(&input).is_ok());

        let mut input = vec![b'l'; MAX_DEPTH + 1];
        input.extend(vec![b'e'; MAX_DEPTH + 1]);
        assert!(decode_document(&input).is_err());
    }

    #[test]
    fn test_decode_dict_duplicate_key() {
        assert!(matches!(
            decode_bencode(b"d1:ai1e1:ai2ee"),
            Err(BencodeError::DuplicateKey(_))
        ));
    }
}
