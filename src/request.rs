use std::borrow::Cow;
use std::time::Duration;

use http::Method;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{Error, Result, SecretsProvider, SignedRequest, Signer};

pub struct RequestBuilder<'a, TTransport, TSecrets>
where
    TSecrets: SecretsProvider,
{
    transport: &'a TTransport,
    signer: Signer<'a, TSecrets>,
    method: Method,
    url: Url,
    body: String,
    timeout: Option<Duration>,
}

impl<'a, TTransport, TSecrets> RequestBuilder<'a, TTransport, TSecrets>
where
    TTransport: Transport,
    TSecrets: SecretsProvider,
{
    pub(crate) fn new(
        transport: &'a TTransport,
        signer: Signer<'a, TSecrets>,
        method: Method,
        url: Url,
    ) -> Self {
        RequestBuilder {
            transport,
            signer,
            method,
            url,
            body: String::new(),
            timeout: None,
        }
    }

    /// Send a form body.
    ///
    /// The body is sent with conventional form encoding; its fields are
    /// also part of the OAuth signature.
    ///
    /// # Errors
    /// This method will fail if `form` cannot be serialized into a form body.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Result<Self> {
        self.body = serde_urlencoded::to_string(form)
            .map_err(|e| Error::InvalidArgument(format!("form body: {}", e)))?;
        Ok(self)
    }

    /// Enables a request timeout.
    ///
    /// The timeout is applied from when the request starts connecting until
    /// the response body has finished.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sign the request without sending it.
    pub fn generate_signature(&self) -> Result<SignedRequest> {
        // destructure the form body back into key-value pairs for signing
        let payload = url::form_urlencoded::parse(self.body.as_bytes())
            .collect::<Vec<(Cow<str>, Cow<str>)>>();
        self.signer.sign(self.method.clone(), &self.url, &payload)
    }

    /// Sign the request and turn it into what the transport sends.
    pub fn build(self) -> Result<HttpRequest> {
        let signed = self.generate_signature()?;
        Ok(HttpRequest {
            method: self.method,
            url: self.url,
            authorization: signed.authorization,
            body: self.body,
            timeout: self.timeout,
        })
    }

    /// Sign the request and send it through the transport.
    ///
    /// # Errors
    ///
    /// Fails if no nonce can be generated or the transport fails.
    pub fn send(self) -> Result<HttpResponse> {
        let transport = self.transport;
        let request = self.build()?;
        debug!(method = %request.method, url = %request.url, "sending signed request");
        let response = transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
