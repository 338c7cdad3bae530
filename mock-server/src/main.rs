use clap::Parser;
use mock_server::config::Args;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&args.log_level).unwrap_or_else(|e| {
            eprintln!(
                "WARN: '{}' is not a valid tracing filter ({e}); falling back to 'info'",
                args.log_level
            );
            EnvFilter::new("info")
        }),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let addr = args.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, version = env!("CARGO_PKG_VERSION"), "mock server listening");

    mock_server::serve(listener, shutdown_signal()).await?;
    info!("mock server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
