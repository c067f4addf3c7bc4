use std::collections::HashMap;

use serde::Deserialize;

use crate::transport::HttpResponse;
use crate::{AccessToken, TokenReaderError, TokenReaderResult, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

/// Represents response of token acquisition.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        AccessToken::new(response.oauth_token, response.oauth_token_secret)
    }
}

/// Add parse_oauth_token feature to a transport response.
// this trait is sealed
pub trait TokenReader: private::Sealed {
    fn parse_oauth_token(self) -> TokenReaderResult<TokenResponse>;
}

impl TokenReader for HttpResponse {
    fn parse_oauth_token(self) -> TokenReaderResult<TokenResponse> {
        read_oauth_token(self.body)
    }
}

/// Parse a url-encoded `oauth_token=...&oauth_token_secret=...` body.
///
/// Keys and values are form-decoded. When a key repeats, the first value wins.
/// On failure only key names are reported, never values.
pub fn read_oauth_token(text: String) -> TokenReaderResult<TokenResponse> {
    let mut destructured = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(text.as_bytes()) {
        destructured
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    let mut keys = destructured.keys().cloned().collect::<Vec<_>>();
    keys.sort();
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: destructured,
        }),
        (None, _) => Err(TokenReaderError::TokenKeyNotFound(OAUTH_TOKEN_KEY, keys)),
        (_, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            keys,
        )),
    }
}

mod private {
    use crate::transport::HttpResponse;

    pub trait Sealed {}
    impl Sealed for HttpResponse {}
}
