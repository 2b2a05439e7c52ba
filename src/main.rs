//! BlockIdle host: starts the plugin boundary and feeds it surface events.

use std::io::BufRead;

use clap::Parser;
use tokio::sync::mpsc;

use blockidle_core::error::AppError;
use blockidle_host::bootstrap;
use blockidle_host::event_loop::{EventLoop, HostEvent};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "blockidle-host", version, about = "BlockIdle plugin host")]
struct Cli {
    /// Configuration environment overlay (`config/<env>.toml`).
    #[arg(long, env = "BLOCKIDLE_ENV", default_value = "development")]
    env: String,

    /// Open a surface with this identity tag after start (repeatable).
    #[arg(long = "surface", value_name = "TAG")]
    surfaces: Vec<String>,

    /// Read `open <tag>` / `close <tag>` / `list` / `quit` events from stdin.
    #[arg(long)]
    stdin: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match bootstrap::load_configuration(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    bootstrap::init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Host error: {}", e);
        std::process::exit(1);
    }
}

/// Main host run function
async fn run(cli: Cli, config: blockidle_core::config::AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BlockIdle host v{}", env!("CARGO_PKG_VERSION"));

    let (mut host, runtime) = bootstrap::build_host(&config)?;
    bootstrap::start(&mut host, runtime)?;

    let mut event_loop = EventLoop::new(host);
    event_loop.open_surfaces(cli.surfaces)?;

    let (tx, rx) = mpsc::channel(64);

    if cli.stdin {
        // Stdin is read off the runtime; a pending read never delays shutdown.
        let stdin_tx = tx.clone();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<HostEvent>() {
                    Ok(event) => {
                        if stdin_tx.blocking_send(event).is_err() {
                            return;
                        }
                    }
                    Err(e) => tracing::warn!("{}", e),
                }
            }
            let _ = stdin_tx.blocking_send(HostEvent::Shutdown);
        });

        let signal_tx = tx.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received");
            let _ = signal_tx.send(HostEvent::Shutdown).await;
        });
    } else {
        tx.send(HostEvent::Shutdown)
            .await
            .map_err(|e| AppError::internal(format!("Event channel closed: {e}")))?;
    }
    drop(tx);

    let summary = event_loop.run(rx).await?;
    tracing::info!(
        opened = summary.opened,
        closed = summary.closed,
        hook_failures = summary.hook_failures,
        "BlockIdle host stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
