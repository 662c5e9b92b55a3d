//! Ingredient Supply Monitor (ISM)
//!
//! An MCP server for ingredient usage and supply analysis.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use ism::build_info;
use ism::config::Config;
use ism::data::InventoryStore;
use ism::mcp::IsmService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ism=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Data directory: {}", config.data_dir.display());
    eprintln!("Sales directory: {}", config.sales_dir.display());

    // A bad name map file is fatal; missing inputs are reported per tool call
    let store = InventoryStore::from_config(config)?;
    if let Err(e) = store.analysis() {
        tracing::warn!("Initial inventory load failed: {}", e);
    }

    // Create the ISM service
    let service = IsmService::new(store);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
