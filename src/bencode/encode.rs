use serde_json::{json, Value};

use super::BValue;

/// Encode a `BValue` back into a bencoded `Vec<u8>`.
pub fn encode_bvalue(value: &BValue) -> Vec<u8> {
	let mut out: Vec<u8> = Vec::new();
	encode_into(value, &mut out);
	out
}

fn encode_into(value: &BValue, out: &mut Vec<u8>) {
	match value {
		BValue::Integer(i) => {
			out.push(b'i');
			out.extend_from_slice(i.to_string().as_bytes());
			out.push(b'e');
		}
		BValue::ByteString(bytes) => encode_bytes(bytes, out),
		BValue::List(items) => {
			out.push(b'l');
			for item in items {
				encode_into(item, out);
			}
			out.push(b'e');
		}
		BValue::Dict(dict) => {
			// BTreeMap iterates keys in ascending byte order
			out.push(b'd');
			for (key, val) in dict {
				encode_bytes(key, out);
				encode_into(val, out);
			}
			out.push(b'e');
		}
	}
}

fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
	out.extend_from_slice(bytes.len().to_string().as_bytes());
	out.push(b':');
	out.extend_from_slice(bytes);
}

/// Convert a `BValue` into JSON for inspection.
///
/// - `Integer(i)` => JSON number
/// - `ByteString(bytes)` => string if valid UTF-8, otherwise `{"_bytes_hex": "..."}`
/// - `List(...)` => JSON array
/// - `Dict(...)` => JSON object; keys that are not valid UTF-8 become `_hex:<hex>`
pub fn bvalue_to_json(bv: &BValue) -> Value {
	match bv {
		BValue::Integer(i) => json!(i),
		BValue::ByteString(bytes) => match std::str::from_utf8(bytes) {
			Ok(text) => Value::String(text.to_string()),
			Err(_) => json!({ "_bytes_hex": hex::encode(bytes) }),
		},
		BValue::List(items) => Value::Array(items.iter().map(bvalue_to_json).collect()),
		BValue::Dict(map) => {
			let mut json_map = serde_json::Map::new();
			for (k, v) in map {
				json_map.insert(json_key(k), bvalue_to_json(v));
			}
			Value::Object(json_map)
		}
	}
}

fn json_key(key: &[u8]) -> String {
	match std::str::from_utf8(key) {
		Ok(text) => text.to_string(),
		Err(_) => format!("_hex:{}", hex::encode(key)),
	}
}
