use anyhow::Context;
use clap::Parser;

use shadowbox::{cli::Cli, ShadowboxApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    log::info!(
        "Starting {} ({}x{}, shadow map {})",
        config.title,
        config.width,
        config.height,
        config.render.shadow_map_size
    );

    let app = ShadowboxApp::new(config).context("failed to initialise shadowbox")?;
    app.run().context("shadowbox exited with an error")?;
    Ok(())
}
