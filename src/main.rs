//! Giki - browse and edit a git working copy as a wiki
//!
//! # Usage
//! ```bash
//! giki                          # Serve the repository in the current directory
//! giki /path/to/repository -o   # Serve and open the browser
//! giki . --branch release       # Start on another branch
//! giki version                  # Print version information
//! ```

mod error;
mod git;
mod models;
mod routes;

use std::path::PathBuf;

use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git::LocalProvider;

/// Giki - turn any git repository into a browsable wiki
#[derive(Parser)]
#[command(name = "giki")]
#[command(about = "Turn any git repository into a browsable wiki", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the git working copy to serve
    #[arg(value_name = "REPO_PATH", default_value = ".")]
    repo_path: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "4242")]
    port: u16,

    /// Branch to browse (defaults to HEAD)
    #[arg(short, long)]
    branch: Option<String>,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Print version information
    Version,
}

fn version_line() -> String {
    format!("giki version {}", env!("CARGO_PKG_VERSION"))
}

fn is_remote_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("git@")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.command == Some(Commands::Version) {
        println!("{}", version_line());
        return Ok(());
    }

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if is_remote_url(&cli.repo_path) {
        eprintln!("✗ Remote repositories are not supported: {}", cli.repo_path);
        eprintln!("  Clone it locally and run: giki <REPO_PATH>");
        std::process::exit(1);
    }

    let repo_path = std::fs::canonicalize(&cli.repo_path).unwrap_or_else(|_| PathBuf::from(&cli.repo_path));
    if !repo_path.exists() {
        eprintln!("✗ Path does not exist: {}", repo_path.display());
        std::process::exit(1);
    }

    let provider = match LocalProvider::open(&repo_path, cli.branch.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("✗ {}", e);
            eprintln!("  Path: {}", repo_path.display());
            std::process::exit(1);
        }
    };
    let branch = provider.branch.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(git::shared(provider)))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://localhost:{}", cli.port);
    println!();
    println!("  Repository: {}", repo_path.display());
    println!("  Branch:     {}", branch);
    println!("  Server:     {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
            eprintln!("  Please visit {} manually", url);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
