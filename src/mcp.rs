//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the [`JobService`](crate::service::JobService) operations as MCP tools
//! over stdio. Scraping tools always answer with text, degrading failures to a
//! short message; persistence failures are reported as internal errors.

mod tools;

pub use tools::JobTools;

use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::service::JobService;

/// Serve the job tools on stdin/stdout until the client disconnects
#[instrument(skip(service))]
pub async fn run(service: JobService) -> std::io::Result<()> {
    info!("Starting jobscout MCP server v{}", env!("CARGO_PKG_VERSION"));

    let server = JobTools::new(Arc::new(service)).serve(stdio()).await?;

    info!("Server listening for tool invocations...");
    let reason = server.waiting().await.map_err(std::io::Error::other)?;
    info!("MCP server stopped: {:?}", reason);

    Ok(())
}
