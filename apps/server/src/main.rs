use chumpstreet_server::{
    api::app_router, build_state, config::Config, init_tracing, SERVER_NAME,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format)?;
    let state = build_state(&config).await?;

    let router = app_router(state, &config);
    tracing::info!(
        "{} v{} serving MCP at http://{}/mcp",
        SERVER_NAME,
        env!("CARGO_PKG_VERSION"),
        config.listen_addr
    );
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
