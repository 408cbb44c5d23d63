//! Main app context.

use rouille::{Request, Response, router};
use paxc_util::user_agent;
use paxc_util::http::HttpServer;
use log::*;

use crate::config::Config;
use crate::upstream::UpstreamClient;
use crate::errors::*;

pub struct App {
    cfg: Config,
    upstream: UpstreamClient
}

impl HttpServer for App {
    type Error = ProxyError;

    fn on_request(&self, req: &Request) -> ProxyResult<Response> {
        router!(req,
            (GET) (/) => {
                Ok(Response::text(user_agent!()))
            },
            (GET) (/api/passengers) => {
                let selectdate = req.get_param("selectdate")
                    .filter(|x| !x.is_empty())
                    .unwrap_or_else(|| "0".into());
                self.get_passengers(&selectdate)
            },
            _ => {
                Err(ProxyError::NotFound)
            }
        )
    }
}

impl App {
    pub fn new(cfg: Config) -> ProxyResult<Self> {
        let upstream = UpstreamClient::new(&cfg)?;
        Ok(Self { cfg, upstream })
    }
    fn get_passengers(&self, selectdate: &str) -> ProxyResult<Response> {
        match self.cfg.api_key() {
            Some(k) => debug!("Using service key ({} chars)", k.len()),
            None => {
                let state = if self.cfg.api_key.is_some() { "blank" } else { "not set" };
                error!("Service key missing (api_key {})", state);
                return Err(ProxyError::MissingCredential);
            }
        }
        let reply = self.upstream.fetch(selectdate)?;
        info!("Forecast for selectdate {}: {} time slots", selectdate, reply.records.len());
        Ok(Response::json(&reply.envelope))
    }
}
