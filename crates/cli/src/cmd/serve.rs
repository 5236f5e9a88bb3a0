//! Run the watcher and HTTP server in the foreground

use anyhow::Result;
use cli_lib::{daemon, Config};

pub async fn run(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    no_watch: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let watch = config.watch.enabled && !no_watch;
    daemon::start(&config, watch).await
}
