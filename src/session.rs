use std::borrow::Cow;
use std::time::Duration;

use serde::Serialize;

use crate::transport::HttpResponse;
use crate::xauth::TokenExchangeClient;
use crate::{
    AccessToken, Credentials, OAuthClientProvider, Result, Secrets, SecretsProvider, Transport,
    DEFAULT_TIMEOUT,
};

/// An authorized session: every request is signed with the consumer key
/// pair and the access token obtained through xAuth.
///
/// The token is never mutated. Each call signs with its own nonce and
/// timestamp, so a shared `&Session` may be used from several threads when
/// the transport allows it. Getting a new token means building a new session.
#[derive(Debug)]
pub struct Session<TTransport> {
    transport: TTransport,
    secrets: Secrets<'static, Cow<'static, str>>,
    timeout: Duration,
}

impl<TTransport> Session<TTransport>
where
    TTransport: Transport,
{
    pub fn new(transport: TTransport, credentials: &Credentials, token: AccessToken) -> Self {
        let (consumer_key, consumer_secret) = credentials.get_consumer_key_pair();
        Session {
            transport,
            secrets: Secrets::new(consumer_key.to_owned(), consumer_secret.to_owned())
                .access_token(token),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Run the xAuth exchange over `transport`, then wrap the resulting
    /// token in a session using the same transport.
    pub fn authenticate(
        transport: TTransport,
        access_token_url: &str,
        credentials: &Credentials,
    ) -> Result<Self> {
        let token = TokenExchangeClient::new(&transport, access_token_url)
            .exchange_credentials_for_token(credentials)?;
        Ok(Session::new(transport, credentials, token))
    }

    /// Override the per-request timeout.
    pub fn timeout(self, timeout: Duration) -> Self {
        Session { timeout, ..self }
    }

    /// The access token this session signs with.
    pub fn token(&self) -> AccessToken {
        let (token, secret) = self.secrets.get_token_pair_option().unwrap_or_default();
        AccessToken::new(token, secret)
    }

    /// Sign and `POST` a form to `url`.
    ///
    /// Status and body are returned uninterpreted.
    pub fn post<T>(&self, url: &str, form: &T) -> Result<HttpResponse>
    where
        T: Serialize + ?Sized,
    {
        self.transport
            .oauth1(&self.secrets)
            .post(url)?
            .form(form)?
            .timeout(self.timeout)
            .send()
    }
}
