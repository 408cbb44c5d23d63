//! Utility functions for HTTP servers.

pub use rouille::{Request, Response};
use std::fmt::Display;
use std::time::Instant;
use log::*;

/// Trait for errors that have an associated status code.
pub trait StatusCode {
    /// Returns the status code associated with this error.
    fn status_code(&self) -> u16;
}

/// Trait for errors that can describe themselves as a JSON error body.
///
/// The body always carries `error` (a message fit to show to users) and
/// `code` (a short machine-readable identifier); `context` may add more keys.
pub trait ErrorBody {
    /// Machine-readable error code.
    fn error_code(&self) -> String;
    /// Message suitable for end users.
    fn user_message(&self) -> String;
    /// Extra key/value pairs merged into the body.
    fn context(&self) -> Vec<(&'static str, String)> {
        vec![]
    }
    /// Builds the full JSON body.
    fn error_body(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("error".into(), self.user_message().into());
        map.insert("code".into(), self.error_code().into());
        for (k, v) in self.context() {
            map.insert(k.into(), v.into());
        }
        serde_json::Value::Object(map)
    }
}

/// Trait for HTTP server objects that can process requests.
pub trait HttpServer: Sync + Send + 'static {
    type Error: StatusCode + ErrorBody + Display;
    /// Handle the given HTTP request, returning either a HTTP response
    /// or an error.
    fn on_request(&self, req: &Request) -> Result<Response, Self::Error>;
    /// Helper method that actually returns a `Response` in all cases,
    /// calling `on_request` to do the actual work.
    ///
    /// Errors become a JSON body with the error's status code. Also
    /// provides handy logging.
    fn process_request(&self, req: &Request) -> Response {
        let start = Instant::now();
        let ret = self.on_request(req);
        let ret = match ret {
            Ok(r) => r,
            Err(e) => {
                let sc = e.status_code();
                warn!("Processing request failed ({}, code {}): {}", sc, e.error_code(), e);
                Response::json(&e.error_body())
                    .with_status_code(sc)
            }
        };
        let dur = start.elapsed();
        info!("{} {} \"{}\" - {} [{}.{:03}s]", req.remote_addr(), req.method(), req.raw_url(), ret.status_code, dur.as_secs(), dur.subsec_millis());
        ret
    }
}

/// Starts an HTTP server, listening on the provided address.
pub fn start_server<H: HttpServer>(listen_url: &str, srv: H) -> ! {
    info!("Starting HTTP server on {}", listen_url);
    rouille::start_server(listen_url, move |req| {
        srv.process_request(req)
    })
}
