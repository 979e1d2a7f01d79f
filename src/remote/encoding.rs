//! remote::encoding
//!
//! Escaping for identifiers embedded into provider URLs.
//!
//! [`encode_url`] follows URI (not component) rules: path separators and
//! query punctuation survive, everything else is percent-encoded as UTF-8.
//! A literal `#` is always escaped to `%23` since branch and file names may
//! legitimately contain it and it would otherwise start a fragment.
//!
//! Encode exactly once, at the point where a raw identifier is placed into a
//! URL. Encoding an already encoded string escapes its `%` signs again.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::traits::RemoteError;

/// Characters left untouched by [`encode_url`].
///
/// Reserved URI characters plus the unreserved marks. `#` is deliberately
/// absent so it is escaped.
const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a raw path or URL fragment for embedding into a provider URL.
///
/// # Example
///
/// ```
/// use remotelink::remote::encode_url;
///
/// assert_eq!(encode_url("feature/#12 fix"), "feature/%2312%20fix");
/// ```
pub fn encode_url(raw: &str) -> String {
    utf8_percent_encode(raw, URI).to_string()
}

/// [`encode_url`] lifted over an optional input.
pub fn encode_url_opt(raw: Option<&str>) -> Option<String> {
    raw.map(encode_url)
}

/// Encode a single query-string value.
///
/// Unlike [`encode_url`] this also escapes `/`, `?`, `&` and `=`, so the
/// value cannot break out of its parameter.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Decode a percent-encoded string produced by [`encode_url`] or
/// [`encode_component`].
///
/// # Errors
///
/// Returns [`RemoteError::InvalidResource`] if the decoded bytes are not UTF-8.
pub fn decode_url(encoded: &str) -> Result<String, RemoteError> {
    urlencoding::decode(encoded)
        .map(|s| s.into_owned())
        .map_err(|e| RemoteError::InvalidResource(format!("cannot decode '{}': {}", encoded, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod encode_url {
        use super::*;

        #[test]
        fn leaves_safe_strings_alone() {
            assert_eq!(encode_url("main"), "main");
            assert_eq!(
                encode_url("https://github.com/owner/repo/blob/main/src/lib.rs"),
                "https://github.com/owner/repo/blob/main/src/lib.rs"
            );
        }

        #[test]
        fn keeps_query_punctuation() {
            assert_eq!(encode_url("a?path=b&x=1"), "a?path=b&x=1");
        }

        #[test]
        fn escapes_hash() {
            assert_eq!(encode_url("issue#42"), "issue%2342");
            assert!(!encode_url("##a#").contains('#'));
        }

        #[test]
        fn escapes_spaces_and_percent() {
            assert_eq!(encode_url("my file.txt"), "my%20file.txt");
            assert_eq!(encode_url("100%"), "100%25");
        }

        #[test]
        fn escapes_unicode_as_utf8() {
            assert_eq!(encode_url("café"), "caf%C3%A9");
        }

        #[test]
        fn optional_input() {
            assert_eq!(encode_url_opt(None), None);
            assert_eq!(encode_url_opt(Some("a#b")), Some("a%23b".to_string()));
        }
    }

    mod encode_component {
        use super::*;

        #[test]
        fn escapes_separators() {
            assert_eq!(encode_component("feat/x&y=1"), "feat%2Fx%26y%3D1");
        }
    }

    mod decode_url {
        use super::*;

        #[test]
        fn recovers_reserved_characters() {
            let raw = "fix/#1?x=ü";
            assert_eq!(decode_url(&encode_url(raw)).unwrap(), raw);
            assert_eq!(decode_url(&encode_component(raw)).unwrap(), raw);
        }

        #[test]
        fn rejects_invalid_utf8() {
            assert!(matches!(
                decode_url("%FF%FE"),
                Err(RemoteError::InvalidResource(_))
            ));
        }
    }
}
