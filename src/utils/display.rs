//! Text shown to people. Nothing here feeds back into encoded bytes.

const BYTES_IN_GB: f64 = (1u64 << 30) as f64;

/// Renders raw bytes as text, substituting U+FFFD for each invalid UTF-8 unit.
pub fn display_text(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes).into_owned()
}

/// Formats a byte count in binary gigabytes with two decimals, e.g. `1.50 GB`.
pub fn format_gigabytes(bytes: u128) -> String {
	format!("{:.2} GB", bytes as f64 / BYTES_IN_GB)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_text_valid_utf8() {
		assert_eq!(display_text("Ubuntu 24.04 ✓".as_bytes()), "Ubuntu 24.04 ✓");
	}

	#[test]
	fn test_display_text_replaces_invalid_units() {
		assert_eq!(display_text(b"ab\xffcd"), "ab\u{fffd}cd");
		assert_eq!(display_text(b"\xff\xfe"), "\u{fffd}\u{fffd}");
	}

	#[test]
	fn test_format_gigabytes() {
		assert_eq!(format_gigabytes(0), "0.00 GB");
		assert_eq!(format_gigabytes(1 << 30), "1.00 GB");
		assert_eq!(format_gigabytes(3 << 29), "1.50 GB");
	}
}
