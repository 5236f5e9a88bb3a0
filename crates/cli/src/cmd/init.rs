//! Run the project initialization script once

use anyhow::{Context, Result};
use cli_lib::{Config, Jobs};

pub async fn run(config: &Config) -> Result<()> {
    let jobs = Jobs::from_config(config);
    jobs.initialize
        .run()
        .await
        .context("Project initialization failed")
}
