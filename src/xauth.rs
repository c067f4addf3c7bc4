//! xAuth: trade an account's username and password for an access token.
//!
//! The request is an ordinary OAuth 1.0a `POST` to the access-token endpoint,
//! signed with the consumer secret alone, carrying `x_auth_mode=client_auth`,
//! `x_auth_username` and `x_auth_password` in the form body.

use std::time::Duration;

use tracing::{debug, warn};

use crate::token_reader::TokenReader;
use crate::{
    AccessToken, Credentials, Error, OAuthClientProvider, OAuthParameters, Result, Transport,
    DEFAULT_TIMEOUT, X_AUTH_MODE_KEY, X_AUTH_PASSWORD_KEY, X_AUTH_USERNAME_KEY,
};

/// Value of `x_auth_mode`.
pub const CLIENT_AUTH: &str = "client_auth";

/// The three `x_auth_*` form fields for `credentials`.
pub fn x_auth_parameters(credentials: &Credentials) -> [(&'static str, &str); 3] {
    [
        (X_AUTH_MODE_KEY, CLIENT_AUTH),
        (X_AUTH_USERNAME_KEY, credentials.username()),
        (X_AUTH_PASSWORD_KEY, credentials.password()),
    ]
}

/// One-shot client for the access-token endpoint.
#[derive(Debug)]
pub struct TokenExchangeClient<'a, TTransport> {
    transport: TTransport,
    access_token_url: String,
    parameters: OAuthParameters<'a>,
    timeout: Duration,
}

impl<'a, TTransport> TokenExchangeClient<'a, TTransport>
where
    TTransport: Transport,
{
    pub fn new<U: Into<String>>(transport: TTransport, access_token_url: U) -> Self {
        TokenExchangeClient {
            transport,
            access_token_url: access_token_url.into(),
            parameters: OAuthParameters::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Pin the nonce and/or timestamp instead of generating them.
    pub fn parameters(self, parameters: OAuthParameters<'a>) -> Self {
        TokenExchangeClient { parameters, ..self }
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        TokenExchangeClient { timeout, ..self }
    }

    /// Exchange `credentials` for an access token.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthenticationFailed`] on any non-200 status; the body is
    ///   returned as-is.
    /// - [`Error::MalformedTokenResponse`] if `oauth_token` or
    ///   `oauth_token_secret` is missing from a 200 response.
    /// - [`Error::Transport`] on network failure. Nothing is retried.
    pub fn exchange_credentials_for_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        debug!(
            url = %self.access_token_url,
            username = credentials.username(),
            "requesting xAuth access token"
        );
        let response = self
            .transport
            .oauth1_with_params(credentials, self.parameters.clone())
            .post(&self.access_token_url)?
            .form(&x_auth_parameters(credentials))?
            .timeout(self.timeout)
            .send()?;

        if !response.is_ok() {
            warn!(status = response.status, "xAuth token request rejected");
            return Err(Error::AuthenticationFailed {
                status: response.status,
                body: response.body,
            });
        }

        let token = response.parse_oauth_token()?;
        debug!(extra_fields = token.remain.len(), "xAuth access token received");
        Ok(token.into())
    }
}

/// Shorthand for [`TokenExchangeClient::exchange_credentials_for_token`].
pub fn exchange_credentials_for_token<TTransport>(
    transport: TTransport,
    access_token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken>
where
    TTransport: Transport,
{
    TokenExchangeClient::new(transport, access_token_url).exchange_credentials_for_token(credentials)
}
