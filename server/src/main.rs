use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::{build_app, AppConfig, SiteConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Index directory path
    #[arg(long, default_value = "./index")]
    index: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Name shown in the side menu and on the about page
    #[arg(long, default_value_t = SiteConfig::default().author)]
    author: String,
    /// Sentence following the author's name
    #[arg(long, default_value_t = SiteConfig::default().bio)]
    bio: String,
    /// Path prefix the site is served under, e.g. /blog
    #[arg(long, default_value = "")]
    path_prefix: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = AppConfig {
        index_dir: args.index,
        site: SiteConfig { author: args.author, bio: args.bio, path_prefix: args.path_prefix },
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
