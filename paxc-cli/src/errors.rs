//! Errors from fetching, as the user gets to see them.

pub use failure::Error;
use failure_derive::Fail;
use paxc_util::rpc::RpcError;

/// Fallback when the proxy's error body doesn't say what went wrong.
pub const GENERIC_MESSAGE: &str = "Data could not be loaded.";

/// Something went wrong while fetching passenger data.
#[derive(Fail, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The proxy or the portal answered with an error.
    #[fail(display = "{} (code {})", message, code)]
    Api {
        code: String,
        message: String
    },
    /// The proxy couldn't be reached.
    #[fail(display = "network error")]
    Network,
    /// Anything else.
    #[fail(display = "unknown error: {}", _0)]
    Unknown(String),
}

impl FetchError {
    /// The message to show in place of the data.
    pub fn user_message(&self) -> String {
        match *self {
            FetchError::Api { ref message, .. } => message.clone(),
            FetchError::Network => "Network connection failed. Please check your internet connection.".into(),
            FetchError::Unknown(_) => "An unknown error occurred.".into()
        }
    }
    /// Builds an `Api` error from the proxy's JSON error body, which has
    /// `error` and `code` fields when it's well-formed.
    pub fn from_error_body(body: &str) -> Self {
        let v: serde_json::Value = serde_json::from_str(body)
            .unwrap_or(serde_json::Value::Null);
        let message = v["error"].as_str().unwrap_or(GENERIC_MESSAGE);
        let code = v["code"].as_str().unwrap_or("API_ERROR");
        FetchError::Api {
            code: code.into(),
            message: message.into()
        }
    }
}

impl From<RpcError> for FetchError {
    fn from(e: RpcError) -> FetchError {
        match e {
            RpcError::RemoteError { body, .. } => FetchError::from_error_body(&body),
            RpcError::Unreachable(_) | RpcError::Timeout => FetchError::Network,
            RpcError::Reqwest(e) => FetchError::Unknown(e.to_string())
        }
    }
}

pub type Result<T, E = Error> = ::std::result::Result<T, E>;
