//! Proxies the airport's passenger forecast from the data portal, keeping the
//! service key on the server and turning upstream result codes into HTTP statuses.

pub mod errors;
pub mod config;
pub mod ctx;
pub mod upstream;


use log::*;
use paxc_util::ConfigExt;
use self::config::Config;
use self::ctx::App;
use errors::Result;

fn main() -> Result<()> {
    paxc_util::setup_logging()?;
    info!("paxc-proxy starting up");
    info!("loading config");
    let cfg = Config::load()?;
    match cfg.api_key() {
        Some(k) => info!("service key configured ({} chars)", k.len()),
        None => warn!("no service key configured; /api/passengers will answer MISSING_API_KEY")
    }
    info!("upstream: {} (timeout {}ms)", cfg.api_base, cfg.timeout_ms);
    let listen = cfg.listen.clone();
    let app = App::new(cfg)?;
    paxc_util::http::start_server(&listen, app);
}
