//! Chowplan
//!
//! An MCP server for dog-food portion and purchase planning.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use chowplan::build_info;
use chowplan::feeding::{FeedingTables, TABLES_PATH_ENV};
use chowplan::mcp::ChowplanService;

/// Install feeding tables from `CHOWPLAN_TABLES_PATH`, or the built-in defaults
fn install_feeding_tables() -> Result<&'static FeedingTables, Box<dyn std::error::Error>> {
    match FeedingTables::load_from_env()? {
        Some((tables, path)) => {
            tracing::info!("Loaded feeding tables from {}", path);
            Ok(tables.install(path)?)
        }
        None => {
            tracing::info!("{} not set, using built-in feeding tables", TABLES_PATH_ENV);
            Ok(FeedingTables::default().install("defaults")?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr; stdout carries the MCP stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("chowplan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let tables = install_feeding_tables()?;

    build_info::print_startup_banner(FeedingTables::global_source());
    eprintln!("Starting MCP server on stdio...");

    let service = ChowplanService::new(tables);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
