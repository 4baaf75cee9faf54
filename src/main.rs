//! RAX Gallery - Entry Point
//!
//! A login-gated welcome page and photo gallery served over a line protocol.

use env_logger::Env;
use log::info;
use std::process::ExitCode;

use rax_gallery::error::AppError;
use rax_gallery::error::handlers::handle_error;
use rax_gallery::{AppConfig, Server};

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;

    info!("Launching gallery server...");

    let server = Server::bind(config).await?;
    server.start().await;
    Ok(())
}
