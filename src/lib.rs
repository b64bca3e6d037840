pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::sync::{Arc, Mutex};

use actix_web::web;
use tracing::{error, info};

use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server, HttpState};

pub async fn run() -> std::io::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_else(|err| {
        error!(error = %err, "Failed to load configuration, using defaults");
        AppConfig::default()
    });

    let logs = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(HttpState::new(config.max_upload_bytes, logs.clone()));

    add_log(
        &logs,
        "INFO",
        "System",
        &format!("Backend starting on {}:{}", config.host, config.port),
    );
    info!(host = %config.host, port = config.port, "starting city directory server");

    start_server(&config, state)?.await
}
