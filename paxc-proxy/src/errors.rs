//! Error handling, and how each error looks to API clients.

pub use failure::Error;
use failure_derive::Fail;
use paxc_util::http::{StatusCode, ErrorBody};
use paxc_types::{RESULT_INVALID_PARAMS, RESULT_KEY_NOT_REGISTERED, result_code_message};

/// Error that could occur when processing a request.
#[derive(Fail, Debug, PartialEq)]
pub enum ProxyError {
    /// No service key configured.
    #[fail(display = "API key not configured")]
    MissingCredential,
    /// The portal rejected the query parameters (result code 11).
    #[fail(display = "upstream rejected parameters: {}", _0)]
    InvalidParameters(String),
    /// The portal doesn't know our service key (result code 30).
    #[fail(display = "service key not registered upstream: {}", _0)]
    CredentialNotRegistered(String),
    /// Any other non-success result code.
    #[fail(display = "upstream error (code {}): {}", code, message)]
    UpstreamError {
        code: String,
        message: String
    },
    /// The upstream request timed out.
    #[fail(display = "upstream request timed out")]
    Timeout,
    /// DNS lookup or connection failed.
    #[fail(display = "upstream unreachable: {}", _0)]
    NetworkUnreachable(String),
    /// Some other HTTP-level failure.
    #[fail(display = "upstream transport error: {}", _0)]
    TransportError(String),
    /// Anything else, e.g. a body that isn't the expected JSON.
    #[fail(display = "unknown error: {}", _0)]
    UnknownError(String),
    /// The API path doesn't exist.
    #[fail(display = "not found")]
    NotFound,
}

impl ProxyError {
    /// Picks the error for a non-`00` result code.
    pub fn from_result_code(code: &str, message: &str) -> Self {
        match code {
            RESULT_INVALID_PARAMS => ProxyError::InvalidParameters(message.into()),
            RESULT_KEY_NOT_REGISTERED => ProxyError::CredentialNotRegistered(message.into()),
            _ => ProxyError::UpstreamError {
                code: code.into(),
                message: message.into()
            }
        }
    }
}

impl StatusCode for ProxyError {
    fn status_code(&self) -> u16 {
        use self::ProxyError::*;

        match *self {
            MissingCredential => 500,
            InvalidParameters(_) => 400,
            CredentialNotRegistered(_) => 400,
            UpstreamError { .. } => 400,
            Timeout => 504,
            NetworkUnreachable(_) => 503,
            NotFound => 404,
            _ => 500
        }
    }
}

impl ErrorBody for ProxyError {
    fn error_code(&self) -> String {
        use self::ProxyError::*;

        match *self {
            MissingCredential => "MISSING_API_KEY".into(),
            InvalidParameters(_) => RESULT_INVALID_PARAMS.into(),
            CredentialNotRegistered(_) => RESULT_KEY_NOT_REGISTERED.into(),
            UpstreamError { ref code, .. } => code.clone(),
            Timeout => "TIMEOUT".into(),
            NetworkUnreachable(_) => "NETWORK_ERROR".into(),
            TransportError(_) => "API_ERROR".into(),
            UnknownError(_) => "UNKNOWN_ERROR".into(),
            NotFound => "NOT_FOUND".into(),
        }
    }
    fn user_message(&self) -> String {
        use self::ProxyError::*;

        let msg = match *self {
            MissingCredential => "The API key is not configured. Check the server configuration.",
            InvalidParameters(_) => result_code_message(RESULT_INVALID_PARAMS),
            CredentialNotRegistered(_) => result_code_message(RESULT_KEY_NOT_REGISTERED),
            UpstreamError { ref code, .. } => result_code_message(code),
            Timeout => "The request timed out. Please try again shortly.",
            NetworkUnreachable(_) => "Network connection failed. Please check your internet connection.",
            TransportError(_) => "An error occurred while communicating with the API server.",
            UnknownError(_) => "An unknown error occurred.",
            NotFound => "Not found.",
        };
        msg.into()
    }
    fn context(&self) -> Vec<(&'static str, String)> {
        use self::ProxyError::*;

        match *self {
            InvalidParameters(ref m) | CredentialNotRegistered(ref m) => vec![("resultMsg", m.clone())],
            UpstreamError { ref message, .. } => vec![("resultMsg", message.clone())],
            TransportError(ref m) => vec![("message", m.clone())],
            _ => vec![]
        }
    }
}

pub type ProxyResult<T, E = ProxyError> = ::std::result::Result<T, E>;
pub type Result<T, E = Error> = ::std::result::Result<T, E>;
