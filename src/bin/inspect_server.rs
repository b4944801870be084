use inspector::server::{self, SharedHook};
use inspector::{LogSink, ResponseInspector};
use log::*;
use std::net::SocketAddr;
use std::sync::Arc;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init_timed();

    let addr: SocketAddr = std::env::var("INSPECTOR_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let sink = LogSink::from_env();
    info!("Diagnostics go to log target {}", sink.target());
    let hook: SharedHook = Arc::new(ResponseInspector::new(sink));

    info!("Starting inspect server on {}", addr);
    warp::serve(server::routes(hook)).run(addr).await;
    Ok(())
}
