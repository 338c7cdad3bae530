//! Command-line and environment configuration for the mock server binary.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "mock-server", version, about = "Serve canned workspace API fixtures")]
pub struct Args {
    /// Interface to bind.
    #[arg(long, env = "MOCK_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, env = "MOCK_SERVER_LOG_JSON")]
    pub log_json: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "MOCK_SERVER_LOG", default_value = "info,tower_http=debug")]
    pub log_level: String,
}

impl Args {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
