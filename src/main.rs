//! Bookmarks server binary.
//!
//! Reads configuration from flags and the environment, opens the database
//! and serves the JSON API until interrupted.

use std::process::ExitCode;

use clap::Parser;

use bookmarks::app::App;
use bookmarks::config::Config;
use bookmarks::server;

#[tokio::main]
async fn main() -> ExitCode {
    server::init_tracing();
    let config = Config::parse();

    let app = match App::new(config) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(error = %err, "failed to initialize bookmarks server");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = server::serve(app).await {
        tracing::error!(error = %err, "bookmarks server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
