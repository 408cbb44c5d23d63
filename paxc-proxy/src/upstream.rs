//! Talking to the data portal's passenger forecast API.

use reqwest::blocking::Client;
use reqwest::Error as ReqwestError;
use serde_json::Value;
use paxc_types::{Envelope, RawRecord};
use paxc_util::{user_agent, truncate_for_log};
use log::*;

use crate::config::Config;
use crate::errors::*;

/// Path of the forecast operation, relative to the configured base URL.
pub const OPERATION_PATH: &str = "/getPassgrAnncmt";
/// Rows requested per page; one page covers a whole day.
pub const NUM_OF_ROWS: &str = "999";
/// Longest upstream payload fragment that ends up in the logs.
const LOG_FRAGMENT_LEN: usize = 200;

/// A successful answer from upstream.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    /// The envelope exactly as received, for passing on to clients.
    pub envelope: Value,
    /// The records inside it, always as a list, with nulls dropped.
    pub records: Vec<RawRecord>
}

fn classify(e: ReqwestError) -> ProxyError {
    // reqwest puts the full URL (service key included) into its messages.
    let e = e.without_url();
    if e.is_timeout() {
        ProxyError::Timeout
    }
    else if e.is_connect() {
        ProxyError::NetworkUnreachable(e.to_string())
    }
    else {
        ProxyError::TransportError(e.to_string())
    }
}

/// Client for the forecast API. Makes exactly one request per `fetch`, with no
/// retries and no caching.
pub struct UpstreamClient {
    cli: Client,
    base_url: String,
    api_key: Option<String>
}
impl UpstreamClient {
    pub fn new(cfg: &Config) -> ProxyResult<Self> {
        let cli = Client::builder()
            .user_agent(user_agent!())
            .timeout(cfg.timeout())
            .build()
            .map_err(classify)?;
        Ok(Self {
            cli,
            base_url: cfg.api_base.trim_end_matches('/').to_owned(),
            api_key: cfg.api_key().map(|x| x.to_owned())
        })
    }
    /// Fetches the forecast for `selectdate` (`"0"` for today, `"1"` for
    /// tomorrow; passed on unchecked).
    pub fn fetch(&self, selectdate: &str) -> ProxyResult<UpstreamReply> {
        let key = self.api_key.as_ref().ok_or(ProxyError::MissingCredential)?;
        // The portal sometimes echoes the query back in error pages.
        let fragment = |text: &str| truncate_for_log(&text.replace(key.as_str(), "<key>"), LOG_FRAGMENT_LEN);
        let url = format!("{}{}", self.base_url, OPERATION_PATH);
        debug!("GET {} (selectdate = {})", url, selectdate);
        let resp = self.cli.get(&url)
            .query(&[
                ("serviceKey", key as &str),
                ("selectdate", selectdate),
                ("type", "json"),
                ("numOfRows", NUM_OF_ROWS),
                ("pageNo", "1"),
            ])
            .send()
            .map_err(|e| {
                let e = classify(e);
                warn!("Upstream request failed: {}", e);
                e
            })?;
        let status = resp.status();
        let text = resp.text().map_err(classify)?;
        if !status.is_success() {
            warn!("Upstream returned HTTP {}: {}", status.as_u16(), fragment(&text));
            Err(ProxyError::TransportError(format!("request failed with status code {}", status.as_u16())))?
        }
        let envelope: Value = serde_json::from_str(&text)
            .map_err(|e| {
                warn!("Upstream body isn't JSON ({}): {}", e, fragment(&text));
                ProxyError::UnknownError(e.to_string())
            })?;
        let parsed: Envelope = serde_json::from_value(envelope.clone())
            .map_err(|e| {
                warn!("Upstream envelope malformed ({}): {}", e, fragment(&text));
                ProxyError::UnknownError(e.to_string())
            })?;
        if !parsed.is_ok() {
            warn!("Upstream result code {}: {}", parsed.result_code(), parsed.result_msg());
            Err(ProxyError::from_result_code(parsed.result_code(), parsed.result_msg()))?
        }
        let records = parsed.into_records();
        debug!("Upstream returned {} records", records.len());
        Ok(UpstreamReply { envelope, records })
    }
}
