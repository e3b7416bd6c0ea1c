use std::borrow::Cow;

/// How file bytes become text before rewriting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
	/// Replace invalid UTF-8 sequences with U+FFFD. Never fails.
	#[default]
	Lossy,

	/// Reject files that are not valid UTF-8.
	Strict,
}

/// Text decoded from a file.
#[derive(Debug)]
pub struct Decoded<'a> {
	pub text: Cow<'a, str>,

	/// Invalid sequences were replaced with U+FFFD.
	pub lossy: bool,
}

impl DecodeMode {
	pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Decoded<'a>, std::str::Utf8Error> {
		match self {
			DecodeMode::Lossy => {
				// from_utf8_lossy only allocates when it had to replace something.
				let text = String::from_utf8_lossy(bytes);
				let lossy = matches!(text, Cow::Owned(_));
				Ok(Decoded { text, lossy })
			}
			DecodeMode::Strict => std::str::from_utf8(bytes).map(|text| Decoded {
				text: Cow::Borrowed(text),
				lossy: false,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const INVALID: &[u8] = b"<img src=\"a\xff.png\">";

	#[test]
	fn test_lossy_replaces_invalid_bytes() {
		let decoded = DecodeMode::Lossy.decode(INVALID).unwrap();
		assert_eq!(decoded.text, "<img src=\"a\u{FFFD}.png\">");
		assert!(decoded.lossy);
	}

	#[test]
	fn test_strict_rejects_invalid_bytes() {
		let err = DecodeMode::Strict.decode(INVALID).unwrap_err();
		assert_eq!(err.valid_up_to(), 11);
	}

	#[test]
	fn test_valid_utf8_borrows_in_both_modes() {
		let bytes = "<p>café</p>".as_bytes();
		for mode in [DecodeMode::Lossy, DecodeMode::Strict] {
			let decoded = mode.decode(bytes).unwrap();
			assert!(matches!(decoded.text, Cow::Borrowed("<p>café</p>")));
			assert!(!decoded.lossy);
		}
	}

	#[test]
	fn test_default_is_lossy() {
		assert_eq!(DecodeMode::default(), DecodeMode::Lossy);
	}
}
