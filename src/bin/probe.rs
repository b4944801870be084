use futures::future::join_all;
use inspector::{LogSink, Proceed, Response, ResponseHook, ResponseInspector};
use log::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init_timed();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        return Err("usage: probe <url>...".into());
    }

    let client = reqwest::Client::new();
    let inspector = ResponseInspector::new(LogSink::from_env());

    let tasks = urls.iter().map(|url| {
        let client = &client;
        let inspector = &inspector;
        async move {
            let request = format!("GET {}", url);
            let response = client.get(url).send().await?;
            let response = Response::from_reqwest(response).await?;
            inspector.after_response(&request, &response, url, &(), Proceed::noop());
            Ok::<_, reqwest::Error>(())
        }
    });

    for (url, result) in urls.iter().zip(join_all(tasks).await) {
        if let Err(e) = result {
            error!("Request to {} failed: {}", url, e);
        }
    }
    Ok(())
}
