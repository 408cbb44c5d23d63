//! Making JSON requests to other paxcast services (i.e. the CLI talking to `paxc-proxy`).

use reqwest::blocking::Client;
use reqwest::Error as ReqwestError;
pub use reqwest::Method;
use failure_derive::Fail;
use std::fmt::Display;
use std::time::Duration;
use serde::de::DeserializeOwned;
use log::*;

use crate::impl_from_for_error;

/// An error encountered after an RPC call.
#[derive(Debug, Fail)]
pub enum RpcError {
    /// The remote service could not be reached at all.
    #[fail(display = "remote service unreachable: {}", _0)]
    Unreachable(ReqwestError),
    /// The remote service took too long to answer.
    #[fail(display = "remote service timed out")]
    Timeout,
    /// The remote service returned an error.
    #[fail(display = "{} error (code {}): {}", service, code, body)]
    RemoteError {
        /// Name of the service responsible.
        service: &'static str,
        /// The HTTP status code returned.
        code: u16,
        /// The response body, as text.
        body: String
    },
    /// reqwest error.
    #[fail(display = "reqwest: {}", _0)]
    Reqwest(ReqwestError)
}
impl_from_for_error!(RpcError,
                     ReqwestError => Reqwest);

impl RpcError {
    fn classify(e: ReqwestError) -> Self {
        if e.is_timeout() {
            RpcError::Timeout
        }
        else if e.is_connect() {
            RpcError::Unreachable(e)
        }
        else {
            RpcError::Reqwest(e)
        }
    }
}

#[derive(Clone)]
pub struct ServiceRpc {
    pub base_url: String,
    pub name: &'static str,
    pub cli: Client
}
impl ServiceRpc {
    pub fn new(ua: &str, name: &'static str, base_url: String, timeout: Duration) -> Result<Self, RpcError> {
        let cli = Client::builder()
            .user_agent(ua)
            .timeout(timeout)
            .build()?;
        let base_url = base_url.trim_end_matches('/').to_owned();
        Ok(Self { name, base_url, cli })
    }
    pub fn req_with_query<T, U>(&self, meth: Method, url: T, query: &[(&str, &str)]) -> Result<U, RpcError> where T: Display, U: DeserializeOwned {
        let url = format!("{}{}", self.base_url, url);
        debug!("RPC ({}): {} {}", self.name, meth, url);
        let resp = self.cli.request(meth, &url)
            .query(query)
            .send()
            .map_err(RpcError::classify)?;
        let status = resp.status();
        debug!("RPC ({}): response code {}", self.name, status.as_u16());
        if !status.is_success() {
            let text = resp.text().map_err(RpcError::classify)?;
            warn!("RPC ({}): request failed ({}): {}", self.name, status.as_u16(), crate::truncate_for_log(&text, 200));
            return Err(RpcError::RemoteError {
                service: self.name,
                code: status.as_u16(),
                body: text
            });
        }
        let ret: U = resp.json().map_err(RpcError::classify)?;
        Ok(ret)
    }
}
