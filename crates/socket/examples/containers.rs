use std::error::Error;

use docker_socket::client::Client;
use docker_socket::protocol::{Method, RequestInit};
use http_body_util::BodyExt;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let client = Client::from_env();
    info!(socket = %client.connector().path().display(), "listing containers");

    if let Err(e) = list_containers(&client).await {
        error!(cause = %e, "list containers failed");
    }
}

async fn list_containers(client: &Client<docker_socket::client::UnixConnector>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let init = RequestInit::new(Method::Get).header("Accept", "application/json");
    let response = client.request("/containers/json", init).await?;
    info!(status = response.status(), status_text = response.status_text(), "received response");

    let body = response.into_body().collect().await?.to_bytes();
    println!("{}", String::from_utf8_lossy(&body));
    Ok(())
}
