mod routes;
mod state;
mod tick_loop;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use state::{AppState, SimState};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tycoon_daemon", about = "Paperclip Tycoon HTTP daemon")]
struct Args {
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Wall-clock milliseconds per simulation cycle.
    #[arg(long, default_value_t = 2000)]
    tick_ms: u64,
    /// Seed for a fresh game; ignored when a valid save exists.
    #[arg(long)]
    seed: Option<u64>,
    /// Save slot, written after every cycle and read back on startup.
    #[arg(long, default_value = "./save.json")]
    save: PathBuf,
    /// Optional economy overrides (JSON, partial fields allowed).
    #[arg(long, default_value = "./economy.json")]
    config: PathBuf,
    #[arg(long, default_value = "http://localhost:5173")]
    cors_origin: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = tycoon_world::load_config(&args.config)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let business = tycoon_world::load_or_default(&args.save, &config, &mut rng);
    tracing::info!(
        cycle = business.cycle,
        cash = business.cash,
        seed,
        "simulation ready"
    );

    let app_state = AppState {
        sim: Arc::new(Mutex::new(SimState {
            business,
            config,
            rng,
            profit_history: VecDeque::new(),
            save_path: args.save.clone(),
            save_warned: false,
        })),
        alert_tx: tokio::sync::broadcast::channel(64).0,
        paused: Arc::new(AtomicBool::new(false)),
        tick_ms: args.tick_ms,
    };

    tokio::spawn(tick_loop::run_tick_loop(
        app_state.sim.clone(),
        app_state.alert_tx.clone(),
        app_state.paused.clone(),
        app_state.tick_ms,
    ));

    let router = routes::make_router_with_cors(app_state, &args.cors_origin);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("binding port {}", args.port))?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
