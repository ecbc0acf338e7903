use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use tycoon_core::{classify_alert, AlertKind, BusinessState, EVENT_CATALOG};
use tycoon_world::{initial_state, load_config};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "tycoon_cli", about = "Paperclip Tycoon headless runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation for a fixed number of cycles.
    Run {
        #[arg(long)]
        cycles: u64,
        /// Seed for a fresh game. Mutually exclusive with --state.
        #[arg(long, conflicts_with = "state_file")]
        seed: Option<u64>,
        /// Resume from a saved snapshot. Mutually exclusive with --seed.
        #[arg(long = "state", conflicts_with = "seed")]
        state_file: Option<PathBuf>,
        /// Optional economy overrides (JSON, partial fields allowed).
        #[arg(long, default_value = "./economy.json")]
        config: PathBuf,
        #[arg(long, default_value_t = 10)]
        print_every: u64,
        /// Write the final snapshot here when the run ends.
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn run(
    cycles: u64,
    seed: Option<u64>,
    state_file: Option<PathBuf>,
    config_path: &Path,
    print_every: u64,
    save: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;

    let resolved_seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(resolved_seed);
    let mut state = if let Some(path) = state_file {
        tycoon_world::load_state(&path)
            .with_context(|| format!("resuming from {}", path.display()))?
    } else {
        initial_state(&config, &mut rng)
    };

    println!(
        "Starting run: cycles={cycles} seed={resolved_seed} cash=${:.0} workers={} lines={}",
        state.cash, state.workers, state.assembly_lines,
    );
    println!("{}", "-".repeat(80));
    print_alerts(&state, &[]);

    for _ in 0..cycles {
        let previous_alerts = std::mem::take(&mut state.alerts);
        state = tycoon_core::step(&state, EVENT_CATALOG, &config, &mut rng);

        if print_every > 0 && state.cycle % print_every == 0 {
            print_status(&state);
        }
        print_alerts(&state, &previous_alerts);

        if state.is_bankrupt() {
            println!("Bankrupt at cycle {}. Stopping.", state.cycle);
            break;
        }
    }

    println!("{}", "-".repeat(80));
    println!("Done. Final state at cycle {}:", state.cycle);
    print_status(&state);

    if let Some(path) = save {
        tycoon_world::save_state(&path, &state)?;
        println!("Snapshot saved to {}", path.display());
    }

    Ok(())
}

fn print_status(state: &BusinessState) {
    let event = state
        .active_event
        .as_ref()
        .map_or_else(|| "-".to_string(), |e| {
            format!("{} ({} left)", e.id, e.duration_remaining)
        });
    println!(
        "[cycle={cycle:04}]  cash=${cash:9.2}  profit=${profit:8.2}  \
         sold={sold:3}/{demand:3}  util={util:5.1}%  debt=${debt:.0}  event={event}",
        cycle = state.cycle,
        cash = state.cash,
        profit = state.profit_per_cycle,
        sold = state.units_sold,
        demand = state.demand,
        util = state.utilization_rate,
        debt = state.debt,
    );
}

/// Print alerts that were not already shown last cycle. The engine rebuilds
/// the alert list every step, so persistent conditions would otherwise repeat
/// on every line of output.
fn print_alerts(state: &BusinessState, previous: &[String]) {
    for alert in &state.alerts {
        if previous.contains(alert) {
            continue;
        }
        let tag = match classify_alert(alert) {
            AlertKind::Error => "ERROR",
            AlertKind::Warning => "WARN ",
            AlertKind::Info => "INFO ",
            AlertKind::Success => "OK   ",
        };
        println!("  {tag} {alert}");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            cycles,
            seed,
            state_file,
            config,
            print_every,
            save,
        } => {
            run(cycles, seed, state_file, &config, print_every, save)?;
        }
    }
    Ok(())
}
