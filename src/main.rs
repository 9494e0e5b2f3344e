use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stringsieve::config::Settings;
use stringsieve::interface::Analyzer;
use stringsieve::language::QueryParser;
use stringsieve::persist::open_store;
use stringsieve::server;

#[tokio::main]
async fn main() -> stringsieve::Result<()> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)))
        .init();

    let store = open_store(&settings.persistence_mode()?)?;
    // the rule catalog is compiled once and shared by every request
    let parser = Arc::new(QueryParser::default());
    info!(rules = parser.catalog().len(), "natural language rules loaded");
    let analyzer = Analyzer::new(store, parser);

    let listener = tokio::net::TcpListener::bind(&settings.server.address).await?;
    info!(address = %settings.server.address, "listening");
    axum::serve(listener, server::router(analyzer)).await?;
    Ok(())
}
