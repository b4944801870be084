use crate::inspector::{Proceed, ResponseHook};
use crate::response::Response;
use log::*;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::oneshot;
use warp::{Filter, Rejection, Reply};

/// Hook shape served over HTTP: no request or context travels with the exchange.
pub type SharedHook = Arc<dyn ResponseHook<(), (), ()>>;

pub fn routes(hook: SharedHook) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    // POST /inspect - Run the hook over one completed exchange
    let inspect = warp::path!("inspect")
        .and(warp::post())
        .and(warp::body::json::<Response>())
        .and(with_hook(hook))
        .and_then(inspect_handler);

    // Health check endpoint
    let health = warp::path("health").and(warp::get()).map(|| "OK");

    health.or(inspect.with(warp::log("inspect_server")))
}

fn with_hook(hook: SharedHook) -> impl Filter<Extract = (SharedHook,), Error = Infallible> + Clone {
    warp::any().map(move || hook.clone())
}

async fn inspect_handler(response: Response, hook: SharedHook) -> Result<impl Reply, Rejection> {
    let (tx, rx) = oneshot::channel();
    let proceed = Proceed::new(move || {
        let _ = tx.send(());
    });
    hook.after_response(&(), &response, &(), &(), proceed);

    if rx.await.is_err() {
        warn!("hook returned without signalling completion");
    }
    Ok(warp::http::StatusCode::NO_CONTENT)
}
