mod api;
mod ledger;
mod network;
mod transaction;

use std::env;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use api::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let peer_timeout_ms: u64 = env::var("PEER_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);

    println!("⛓️ Starting ledger node at http://{host}:{port} (peer timeout {peer_timeout_ms} ms)");

    let state = web::Data::new(AppState::new(Duration::from_millis(peer_timeout_ms)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
