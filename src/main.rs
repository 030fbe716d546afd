use clap::Parser;
use runt_captcha::{server, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "runt-captcha-server")]
#[command(about = "Captcha solving service for the RUNT vehicle registry portal")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "CAPTCHA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CAPTCHA_PORT", default_value = "9292")]
    pub port: u16,

    /// Path to the pretrained captcha weights artifact
    #[arg(long, env = "CAPTCHA_MODEL", default_value = "models/runt.rten")]
    pub model: PathBuf,

    /// Maximum upload size in bytes (default: 5MB)
    #[arg(long, env = "CAPTCHA_MAX_FILE_SIZE", default_value = "5242880")]
    pub max_file_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            model_path: args.model,
            max_file_size: args.max_file_size,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from(args);

    tracing::info!(
        "Starting runt-captcha-server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Binding to {}:{}", config.host, config.port);

    server::run(config).await
}
