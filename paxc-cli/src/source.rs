//! Where the controller gets its records from.

use paxc_types::{DateSelector, Envelope, RawRecord, result_code_message};
use paxc_util::rpc::{ServiceRpc, Method, RpcError};
use std::time::Duration;

use crate::errors::FetchError;

/// Something that can fetch the raw records for a day.
pub trait PassengerSource {
    fn fetch(&mut self, date: DateSelector) -> Result<Vec<RawRecord>, FetchError>;
}

/// Fetches from a running `paxc-proxy`.
pub struct ProxySource {
    rpc: ServiceRpc
}
impl ProxySource {
    pub fn new(ua: &str, address: &str, timeout: Duration) -> Result<Self, RpcError> {
        let rpc = ServiceRpc::new(ua, "paxc-proxy", address.into(), timeout)?;
        Ok(Self { rpc })
    }
}

impl PassengerSource for ProxySource {
    fn fetch(&mut self, date: DateSelector) -> Result<Vec<RawRecord>, FetchError> {
        let env: Envelope = self.rpc.req_with_query(Method::GET, "/api/passengers", &[("selectdate", date.as_param())])?;
        // The proxy passes the envelope through, so check the code again.
        if !env.is_ok() {
            return Err(FetchError::Api {
                code: env.result_code().into(),
                message: result_code_message(env.result_code()).into()
            });
        }
        Ok(env.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rouille::{Request, Response};
    use serde_json::json;
    use std::net::TcpListener;
    use std::thread;

    fn fake_proxy<F>(handler: F) -> String where F: Fn(&Request) -> Response + Send + Sync + 'static {
        let server = rouille::Server::new("127.0.0.1:0", handler).unwrap();
        let addr = server.server_addr();
        thread::spawn(move || server.run());
        format!("http://{}/", addr)
    }
    fn source(addr: &str) -> ProxySource {
        ProxySource::new("paxc-cli-test", addr, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn fetches_records_for_date() {
        let addr = fake_proxy(|req| {
            if req.url() != "/api/passengers" {
                return Response::empty_404();
            }
            let sd = req.get_param("selectdate").unwrap_or_default();
            Response::json(&json!({
                "response": {
                    "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
                    "body": {"items": {"adate": "20240102", "atime": "08_09", "t1egsum1": sd}}
                }
            }))
        });
        let recs = source(&addr).fetch(DateSelector::Tomorrow).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].t1egsum1, Some("1".into()));
    }

    #[test]
    fn proxy_error_body_becomes_message() {
        let addr = fake_proxy(|_| {
            Response::json(&json!({"error": "The service key is not registered.", "code": "30", "resultMsg": "x"}))
                .with_status_code(400)
        });
        assert_eq!(source(&addr).fetch(DateSelector::Today).unwrap_err(), FetchError::Api {
            code: "30".into(),
            message: "The service key is not registered.".into()
        });
    }

    #[test]
    fn non_ok_envelope_is_rechecked() {
        let addr = fake_proxy(|_| {
            Response::json(&json!({"response": {"header": {"resultCode": "11", "resultMsg": "x"}}}))
        });
        match source(&addr).fetch(DateSelector::Today).unwrap_err() {
            FetchError::Api { code, message } => {
                assert_eq!(code, "11");
                assert_eq!(message, "The request parameters are invalid.");
            },
            x => panic!("unexpected error {:?}", x)
        }
    }

    #[test]
    fn unreachable_proxy_is_network_error() {
        let port = {
            let l = TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let addr = format!("http://127.0.0.1:{}", port);
        assert_eq!(source(&addr).fetch(DateSelector::Today).unwrap_err(), FetchError::Network);
    }
}
