mod config;
mod form;
mod server;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;

use config::PanelConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = PanelConfig::default();

    // The panel is useless without the bridge, so a failed open ends the process.
    let bus = i2cpanel_core::open(&config.bus)
        .with_context(|| format!("cannot open I2C bus {}", config.bus.selector))?;
    let bus = Arc::new(Mutex::new(bus));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start runtime")?;
    runtime
        .block_on(server::serve(config.listen, bus))
        .with_context(|| format!("cannot listen on {}", config.listen))?;

    Ok(())
}
