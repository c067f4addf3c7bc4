use http::Method;
use url::Url;

use crate::{OAuthParameters, Result, SecretsProvider, Signer, Transport};

use super::request::RequestBuilder;

/// Attach OAuth signing to any [`Transport`].
///
/// ```no_run
/// use reqwest_xauth::{OAuthClientProvider, Secrets};
///
/// # fn run() -> reqwest_xauth::Result<()> {
/// let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
///     .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");
/// let transport = reqwest::blocking::Client::new();
/// let response = transport
///     .oauth1(&secrets)
///     .post("https://www.instapaper.com/api/1/bookmarks/list")?
///     .form(&[("limit", "10")])?
///     .send()?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
pub trait OAuthClientProvider: Transport + Sized {
    fn oauth1<'a, T>(&'a self, secrets: &'a T) -> Client<'a, Self, T>
    where
        T: SecretsProvider,
    {
        self.oauth1_with_params(secrets, OAuthParameters::new())
    }

    fn oauth1_with_params<'a, T>(
        &'a self,
        secrets: &'a T,
        parameters: OAuthParameters<'a>,
    ) -> Client<'a, Self, T>
    where
        T: SecretsProvider,
    {
        Client {
            transport: self,
            secrets,
            parameters,
        }
    }
}

impl<T> OAuthClientProvider for T where T: Transport {}

#[derive(Debug)]
pub struct Client<'a, TTransport, TSecrets> {
    transport: &'a TTransport,
    secrets: &'a TSecrets,
    parameters: OAuthParameters<'a>,
}

impl<'a, TTransport, TSecrets> Client<'a, TTransport, TSecrets>
where
    TTransport: Transport,
    TSecrets: SecretsProvider,
{
    /// Convenience method to make a `POST` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied URL cannot be parsed.
    pub fn post(&self, url: &str) -> Result<RequestBuilder<'a, TTransport, TSecrets>> {
        self.request(Method::POST, url)
    }

    /// Start building a request with the `Method` and URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied URL cannot be parsed.
    pub fn request(
        &self,
        method: Method,
        url: &str,
    ) -> Result<RequestBuilder<'a, TTransport, TSecrets>> {
        let url = Url::parse(url)?;
        Ok(RequestBuilder::new(
            self.transport,
            Signer::new(self.secrets, self.parameters.clone()),
            method,
            url,
        ))
    }
}
