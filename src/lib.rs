/*!
reqwest-xauth: xAuth sign-in and signed bookmark API calls over reqwest.

# Overview

xAuth is the OAuth 1.0a variant where an application trades the user's
username and password directly for an access token (`x_auth_mode=client_auth`),
without the browser redirect of the three-legged flow. This crate performs
that exchange, then signs every following request with the token
(HMAC-SHA1) and exposes the bookmarks API on top.

Everything is blocking. Signing and sending are separate steps: a
[`Signer`] produces a [`SignedRequest`], and a [`Transport`] puts it on the
wire. `reqwest::blocking::Client` is the stock transport.

# How to use

## Signing in and listing bookmarks

```no_run
use reqwest_xauth::{BookmarkClient, Credentials, Session};

# fn run() -> reqwest_xauth::Result<()> {
let credentials = Credentials::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "[USERNAME]",
    "[PASSWORD]",
);

let session = Session::authenticate(
    reqwest::blocking::Client::new(),
    "https://www.instapaper.com/api/1/oauth/access_token",
    &credentials,
)?;
let client = BookmarkClient::new(session, "https://www.instapaper.com/api/1");

for bookmark in client.list_bookmarks(10)? {
    println!("{} ({:.0}%)", bookmark.title, bookmark.progress * 100.0);
}
# Ok(())
# }
```

## Only acquiring the token

```no_run
use reqwest_xauth::{Credentials, TokenExchangeClient};

# fn run() -> reqwest_xauth::Result<()> {
let credentials = Credentials::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]", "[USERNAME]", "[PASSWORD]");
let token = TokenExchangeClient::new(
    reqwest::blocking::Client::new(),
    "https://www.instapaper.com/api/1/oauth/access_token",
)
.exchange_credentials_for_token(&credentials)?;
println!("token: {}", token.token);
# Ok(())
# }
```
*/
mod bookmarks;
mod client;
pub mod config;
pub mod encode;
mod error;
#[cfg(test)]
mod mock;
pub mod models;
mod nonce;
mod request;
mod secrets;
mod session;
mod signer;
mod token_reader;
mod transport;
mod xauth;

use std::time::Duration;

// exposed to external program
pub use bookmarks::BookmarkClient;
pub use client::{Client, OAuthClientProvider};
pub use config::Config;
pub use error::{Error, Result, TokenReaderError, TokenReaderResult};
pub use models::{tag_counts, Bookmark, BookmarkCollectionResponse, Highlight, Tag, User};
pub use nonce::{generate_nonce, generate_timestamp, NONCE_LENGTH};
pub use request::RequestBuilder;
pub use secrets::{AccessToken, Credentials, Secrets, SecretsProvider};
pub use session::Session;
pub use signer::{
    hmac_sha1_signature, signature_base_string, signing_key, OAuthParameters, SignedRequest,
    Signer, HMAC_SHA1, OAUTH_VERSION,
};
pub use token_reader::{read_oauth_token, TokenReader, TokenResponse};
pub use transport::{HttpRequest, HttpResponse, Transport, FORM_CONTENT_TYPE};
pub use xauth::{exchange_credentials_for_token, x_auth_parameters, TokenExchangeClient, CLIENT_AUTH};

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// exposed constant variables
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `x_auth_mode`.
pub const X_AUTH_MODE_KEY: &str = "x_auth_mode";
/// Represents `x_auth_username`.
pub const X_AUTH_USERNAME_KEY: &str = "x_auth_username";
/// Represents `x_auth_password`.
pub const X_AUTH_PASSWORD_KEY: &str = "x_auth_password";
