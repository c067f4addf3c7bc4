//! OAuth percent-encoding and parameter normalization (RFC 5849 §3.4.1.3, §3.6).

use std::borrow::Cow;
use std::str::Utf8Error;

use percent_encoding::{percent_decode_str, percent_encode as encode_with, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
///
/// Unlike a form/query encoder, `!*'()` are escaped and space becomes `%20`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string with the strict OAuth table.
pub fn percent_encode(input: &str) -> String {
    encode_with(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Reverse of [`percent_encode`].
pub fn percent_decode(input: &str) -> Result<Cow<'_, str>, Utf8Error> {
    percent_decode_str(input).decode_utf8()
}

/// Build the normalized parameter string used in the signature base string.
///
/// Keys and values are encoded individually, then the pairs are sorted
/// byte-wise by encoded key (and by encoded value when keys repeat) and
/// joined as `key=value&key=value`. The order of `params` does not matter.
pub fn canonicalize<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded = params
        .into_iter()
        .map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
        .collect::<Vec<(String, String)>>();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unreserved_passes_through() {
        assert_eq!(percent_encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(percent_encode("-._~"), "-._~");
    }

    #[test]
    fn reserved_is_escaped() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("&"), "%26");
        assert_eq!(percent_encode("="), "%3D");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("/"), "%2F");
        assert_eq!(percent_encode("!*'()"), "%21%2A%27%28%29");
    }

    #[test]
    fn multibyte_is_escaped_per_byte() {
        assert_eq!(percent_encode("少女"), "%E5%B0%91%E5%A5%B3");
    }

    #[test]
    fn decode_reverses_reserved_characters() {
        let original = "a b&c=d+e/f";
        let encoded = percent_encode(original);
        assert_eq!(encoded, "a%20b%26c%3Dd%2Be%2Ff");
        assert_eq!(percent_decode(&encoded).unwrap(), original);
    }

    #[test]
    fn canonicalize_sorts_by_key() {
        let params = [
            ("x_auth_username", "u"),
            ("oauth_nonce", "abc"),
            ("limit", "10"),
        ];
        assert_eq!(
            canonicalize(params),
            "limit=10&oauth_nonce=abc&x_auth_username=u"
        );
    }

    #[test]
    fn canonicalize_encodes_keys_and_values() {
        let params = [("status", "Hello Ladies + Gentlemen!"), ("a b", "c")];
        assert_eq!(
            canonicalize(params),
            "a%20b=c&status=Hello%20Ladies%20%2B%20Gentlemen%21"
        );
    }

    #[test]
    fn canonicalize_empty() {
        assert_eq!(canonicalize(Vec::<(String, String)>::new()), "");
    }

    proptest! {
        #[test]
        fn percent_round_trip(s in ".*") {
            let encoded = percent_encode(&s);
            prop_assert_eq!(percent_decode(&encoded).unwrap(), s.as_str());
        }

        #[test]
        fn canonicalize_ignores_input_order(
            map in prop::collection::btree_map("[a-z_]{1,12}", ".{0,16}", 0..8)
        ) {
            let forward = map.iter().collect::<Vec<_>>();
            let mut reversed = forward.clone();
            reversed.reverse();
            prop_assert_eq!(canonicalize(forward), canonicalize(reversed));
        }

        #[test]
        fn canonicalize_output_is_sorted(
            map in prop::collection::btree_map("[A-Za-z0-9_]{1,12}", "[a-z]{0,8}", 0..8)
        ) {
            let out = canonicalize(&map);
            let keys = out
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|pair| pair.split('=').next().unwrap_or_default().to_string())
                .collect::<Vec<_>>();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }
    }
}
