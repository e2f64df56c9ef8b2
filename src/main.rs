//! Labelpress Service Entry Point
//!
//! This is the main entry point for the label service.
//! It initializes configuration, storage, services, and starts the HTTP server.

use labelpress::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
