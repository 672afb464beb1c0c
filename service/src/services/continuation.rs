//! Continuation tokens for published item listings: URL-safe base64 of the
//! offset of the next page. Offsets are bounded by SQLite's signed 64-bit
//! OFFSET.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

pub fn encode(offset: usize) -> String {
    URL_SAFE_NO_PAD.encode(offset.to_string())
}

pub fn decode(token: &str) -> Option<usize> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
    let offset: usize = std::str::from_utf8(&bytes).ok()?.parse().ok()?;
    i64::try_from(offset).ok()?;
    Some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_url_safe() {
        let token = encode(123_456);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&token), Some(123_456));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("!!!"), None);
        // valid base64 of "abc", not a number
        assert_eq!(decode("YWJj"), None);
    }

    #[test]
    fn test_rejects_offsets_past_i64() {
        let max = i64::MAX as usize;
        assert_eq!(decode(&encode(max)), Some(max));
        assert_eq!(decode(&encode(max + 1)), None);
        assert_eq!(decode(&encode(usize::MAX)), None);
    }
}
