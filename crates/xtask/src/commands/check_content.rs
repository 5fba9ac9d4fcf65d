//! Load and audit a content directory
//!
//! Parses every data file the way a battle would and reports template
//! problems that only surface mid-battle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use battle_content::{ContentFactory, audit_content};
use battle_core::BattleError;

use crate::utils;

/// Load and audit a content directory
#[derive(Parser, Debug)]
pub struct CheckContent {
    /// Content directory (defaults to BATTLE_DATA_DIR or the bundled sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let data_dir = utils::data_dir(self.data_dir);
        let factory = ContentFactory::new(&data_dir);

        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            data_dir.display()
        );

        let heroes = factory.load_heroes().context("Failed to load heroes")?;
        let enemies = factory.load_enemies().context("Failed to load enemies")?;
        let config = factory.load_config().context("Failed to load battle config")?;

        println!("  Heroes: {}", heroes.len());
        println!("  Enemies: {}", enemies.len());
        println!(
            "  Rules: evasion cap {}, enemy targeting {}",
            config.evasion_cap, config.enemy_targeting
        );
        println!();

        let issues = audit_content(&heroes, &enemies);
        if issues.is_empty() {
            println!("{} no issues found", style("✓").green().bold());
            return Ok(());
        }

        for issue in &issues {
            eprintln!(
                "{} {} {}",
                style("✗").red().bold(),
                style(issue.error_code()).dim(),
                issue
            );
        }
        anyhow::bail!("{} content issue(s) found", issues.len());
    }
}
