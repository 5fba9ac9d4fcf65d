//! Headless battle simulation
//!
//! Loads a party and an enemy group from a content directory, lets the
//! automatic hero provider play every hero turn, and prints the battle log
//! as it happens.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::info;

use battle_content::ContentFactory;
use battle_core::BattleView;
use battle_runtime::{AutoHeroProvider, BattleRuntime, Event, RuntimeConfig, Topic};

use crate::utils;

/// Play a battle headlessly
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Enemy ids to fight, in roster order (e.g. goblin slime slime)
    #[arg(value_name = "ENEMY", required = true)]
    enemies: Vec<String>,

    /// Content directory (defaults to BATTLE_DATA_DIR or the bundled sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seed for enemy decisions (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pause before each enemy turn, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    delay_ms: u64,

    /// Output format for the final state
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Party and enemy hp after the battle
    Summary,
    /// Full JSON view after the battle
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        tokio::runtime::Runtime::new()?.block_on(self.execute_async())
    }

    async fn execute_async(self) -> Result<()> {
        let data_dir = utils::data_dir(self.data_dir);
        let factory = ContentFactory::new(&data_dir);

        let mut config = RuntimeConfig::from_env()
            .with_enemy_turn_delay(Duration::from_millis(self.delay_ms));
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        let mut runtime = BattleRuntime::builder()
            .config(config)
            .content(&factory, self.enemies.iter().cloned())
            .with_context(|| format!("Failed to load content from {}", data_dir.display()))?
            .hero_provider(AutoHeroProvider)
            .build()
            .await
            .context("Failed to start battle")?;
        info!(seed = runtime.seed(), enemies = ?self.enemies, "simulation started");

        println!(
            "{} {}",
            style("Encounter:").bold().cyan(),
            self.enemies.join(", ")
        );
        println!("{} {}", style("Seed:").bold().cyan(), runtime.seed());
        println!();

        let printer = tokio::spawn(print_log(runtime.subscribe(Topic::Log)));

        let victory = runtime.run_to_end().await?;
        let view = runtime.handle().query_view().await?;
        runtime.shutdown().await?;
        let lines = printer.await?;

        println!();
        if victory {
            println!("{}", style("VICTORY").bold().green());
        } else {
            println!("{}", style("DEFEAT").bold().red());
        }
        println!("{} {}", style("Log lines:").bold().cyan(), lines);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&view),
            OutputFormat::Json => print_json(&view)?,
        }

        Ok(())
    }
}

/// Prints log lines until the battle's event bus closes.
async fn print_log(mut logs: broadcast::Receiver<Event>) -> usize {
    let mut count = 0;
    loop {
        match logs.recv().await {
            Ok(Event::Log(event)) => {
                println!("  {} {}", style(format!("[{:>3}]", event.nonce)).dim(), event.line);
                count += 1;
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                eprintln!("{} {} log lines dropped", style("!").yellow().bold(), skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
    count
}

fn print_summary(view: &BattleView) {
    for (title, units) in [("Party:", &view.heroes), ("Enemies:", &view.enemies)] {
        println!("{}", style(title).bold().yellow());
        for unit in units {
            let hp = format!("{}/{}", unit.hp, unit.max_hp);
            let hp = if unit.is_alive() {
                style(hp).green()
            } else {
                style(hp).red()
            };
            println!("  {:<12} {:<10} HP {}", unit.name, unit.id, hp);
        }
        println!();
    }
}

fn print_json(view: &BattleView) -> Result<()> {
    let json = serde_json::to_string_pretty(view).context("Failed to serialize view to JSON")?;
    println!("{}", json);
    Ok(())
}
