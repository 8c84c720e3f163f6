use actix_web::{web, App, HttpServer};
use std::io;
use tokio::signal;
use tokio::sync::{mpsc, Mutex};

mod api_error;
mod config;
mod http;
mod models;
mod observer;
mod service;
mod telemetry;

use crate::config::Config;
use crate::http::game_handler::AppState;
use crate::observer::{LogScoreboard, StateObserver};
use crate::service::MatchEngine;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    // Initialize telemetry
    init_telemetry();

    // Wire the engine to the observer: engine is the sole producer of
    // snapshots, the observer task the sole consumer.
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let state = web::Data::new(AppState {
        engine: Mutex::new(MatchEngine::new(events_tx)),
    });

    let observer = StateObserver::new(events_rx, LogScoreboard, config.observer.refresh_interval());
    tokio::spawn(observer.run());

    tracing::info!(
        "Starting rps-tournament server on {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(http::json_config())
            .wrap(actix_web::middleware::Logger::default())
            .configure(http::game_handler::configure_routes)
            .route("/health", web::get().to(http::health::health_check))
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for shutdown signal");
        tracing::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}
