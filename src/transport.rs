use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use url::Url;

use crate::Result;

/// `Content-Type` of every request this crate sends.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A signed request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub authorization: String,
    pub body: String,
    pub timeout: Option<Duration>,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new<T: Into<String>>(status: u16, body: T) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends already-signed requests. Signing happens before a request reaches
/// the transport, so any HTTP stack can be plugged in.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

impl Transport for reqwest::blocking::Client {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .request(request.method, request.url)
            .header(AUTHORIZATION, request.authorization)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
