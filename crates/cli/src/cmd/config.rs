//! Show the effective configuration

use anyhow::Result;
use cli_lib::config::{Config, DEFAULT_CONFIG_FILE, MAX_COOLDOWN_MS, MAX_TIMEOUT_SECS};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(config: &Config, source: Option<&Path>) -> Result<()> {
    println!("{}", "Configuration".bold());
    match source {
        Some(path) => println!("{}: {}\n", "Location".dimmed(), path.display().dimmed()),
        None => println!(
            "{}: {}\n",
            "Location".dimmed(),
            format!("built-in defaults (no {} found)", DEFAULT_CONFIG_FILE).dimmed()
        ),
    }

    print!("{}", config.to_toml()?);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  watch.files: at least one file");
    println!("  watch.cooldown_ms: 0-{}", MAX_COOLDOWN_MS);
    println!("  server.port: 1-65535");
    println!("  server.site_dir: existing directory (unset = no site)");
    println!(
        "  generate/initialize.timeout_secs: 1-{} (unset = no limit)",
        MAX_TIMEOUT_SECS
    );

    Ok(())
}
