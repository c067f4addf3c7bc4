use std::borrow::Cow;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use http::Method;
use sha1::Sha1;
use tracing::debug;
use url::Url;

use crate::encode::{canonicalize, percent_encode};
use crate::nonce::{generate_nonce, generate_timestamp, NONCE_LENGTH};
use crate::{
    Result, SecretsProvider, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY,
};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const HMAC_SHA1: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Overrides for the per-request OAuth parameters.
///
/// Left unset, a fresh nonce and the current time are used for every
/// signature. Fixing them makes the signature reproducible.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    fn resolve_nonce(&self) -> Result<String> {
        match self.nonce {
            Some(ref nonce) => Ok(nonce.to_string()),
            None => generate_nonce(NONCE_LENGTH),
        }
    }

    fn resolve_timestamp(&self) -> u64 {
        self.timestamp.unwrap_or_else(generate_timestamp)
    }
}

/// A request with its OAuth signature computed.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    /// Target URL without query string.
    pub url: Url,
    /// OAuth parameters merged with the query and body parameters, sorted.
    /// Repeated keys keep every value.
    pub parameters: Vec<(String, String)>,
    pub signature: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl SignedRequest {
    /// First value of `key`.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        find(&self.parameters, key)
    }
}

fn find<'p>(parameters: &'p [(String, String)], key: &str) -> Option<&'p str> {
    parameters
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
        }
    }

    /// Sign a request.
    ///
    /// `payload` holds the form body parameters; they take part in the
    /// signature but never appear in the `Authorization` header. Query
    /// parameters on `url` are signed as well and stripped from
    /// [`SignedRequest::url`].
    pub fn sign<K, V>(&self, method: Method, url: &Url, payload: &[(K, V)]) -> Result<SignedRequest>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (token, token_secret) = self.secrets.get_token_option_pair();

        let mut parameters = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<Vec<_>>();
        parameters.extend(
            payload
                .iter()
                .map(|(key, value)| (key.as_ref().to_owned(), value.as_ref().to_owned())),
        );
        parameters.push((OAUTH_CONSUMER_KEY.to_owned(), consumer_key.to_owned()));
        parameters.push((OAUTH_NONCE_KEY.to_owned(), self.parameters.resolve_nonce()?));
        parameters.push((OAUTH_SIGNATURE_METHOD_KEY.to_owned(), HMAC_SHA1.to_owned()));
        parameters.push((
            OAUTH_TIMESTAMP_KEY.to_owned(),
            self.parameters.resolve_timestamp().to_string(),
        ));
        if let Some(token) = token {
            parameters.push((OAUTH_TOKEN_KEY.to_owned(), token.to_owned()));
        }
        parameters.push((OAUTH_VERSION_KEY.to_owned(), OAUTH_VERSION.to_owned()));
        parameters.sort();

        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        let base_string = signature_base_string(
            method.as_str(),
            base_url.as_str(),
            parameters.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        let key = signing_key(consumer_secret, token_secret);
        let signature = hmac_sha1_signature(&key, &base_string);
        let authorization = authorization_header(&parameters, &signature);

        debug!(
            method = %method,
            url = %base_url,
            with_token = token.is_some(),
            "signed request"
        );

        Ok(SignedRequest {
            method,
            url: base_url,
            parameters,
            signature,
            authorization,
        })
    }
}

/// `METHOD&encoded_url&encoded_parameters`, RFC 5849 §3.4.1.
pub fn signature_base_string<I, K, V>(method: &str, base_url: &str, parameters: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&canonicalize(parameters))
    )
}

/// `encoded_consumer_secret&encoded_token_secret`; the token part is empty
/// before a token exists.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or_default())
    )
}

/// Base64 of HMAC-SHA1 over the base string.
pub fn hmac_sha1_signature(key: &str, base_string: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base_string.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// `OAuth k="v",...` with the oauth_* parameters in fixed order.
///
/// Anything that is not an OAuth protocol parameter (`x_auth_*`, body
/// fields) stays out of the header.
fn authorization_header(parameters: &[(String, String)], signature: &str) -> String {
    let ordered = [
        (OAUTH_CONSUMER_KEY, find(parameters, OAUTH_CONSUMER_KEY)),
        (OAUTH_NONCE_KEY, find(parameters, OAUTH_NONCE_KEY)),
        (
            OAUTH_SIGNATURE_METHOD_KEY,
            find(parameters, OAUTH_SIGNATURE_METHOD_KEY),
        ),
        (OAUTH_TIMESTAMP_KEY, find(parameters, OAUTH_TIMESTAMP_KEY)),
        (OAUTH_TOKEN_KEY, find(parameters, OAUTH_TOKEN_KEY)),
        (OAUTH_SIGNATURE_KEY, Some(signature)),
        (OAUTH_VERSION_KEY, find(parameters, OAUTH_VERSION_KEY)),
    ];
    let pairs = ordered
        .iter()
        .filter_map(|(k, v)| v.map(|v| format!("{}=\"{}\"", k, percent_encode(v))))
        .collect::<Vec<_>>();
    format!("OAuth {}", pairs.join(","))
}
