//! Regenerate the HTML output once

use anyhow::{Context, Result};
use cli_lib::{Config, Jobs};

pub async fn run(config: &Config) -> Result<()> {
    let jobs = Jobs::from_config(config);
    jobs.generate
        .run()
        .await
        .context("HTML generation failed")
}
