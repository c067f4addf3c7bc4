use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("secure random source unavailable : {0}")]
    RandomnessUnavailable(String),
    #[error("request failed : {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authentication failed with status {status} : {body}")]
    AuthenticationFailed { status: u16, body: String },
    #[error("malformed token response : {0}")]
    MalformedTokenResponse(#[from] TokenReaderError),
    #[error("API request failed with status {status} : {body}")]
    ApiRequestFailed { status: u16, body: String },
    #[error("invalid argument : {0}")]
    InvalidArgument(String),
    #[error("malformed response body : {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("invalid url : {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Only network-level failures are worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// HTTP status of a rejected exchange or API call.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AuthenticationFailed { status, .. } | Error::ApiRequestFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenReaderError {
    /// The missing key, and the keys the response did carry.
    #[error("response has malformed format: not found {0} among keys {1:?}")]
    TokenKeyNotFound(&'static str, Vec<String>),
}
