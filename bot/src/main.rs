mod config;
mod relay;
mod scheduler;
mod watermark;

use anyhow::Result;
use config::Config;
use env_logger::{Builder, Env};
use relay::Relay;
use scheduler::Scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    setup_env();

    let config = Config::from_env()?;
    let relay = Relay::from_config(config)?;

    Scheduler::new(relay).await?.start().await?;

    tokio::signal::ctrl_c().await?;
    Ok(())
}

fn setup_env() {
    dotenvy::dotenv().ok();
    Builder::from_env(Env::default().default_filter_or("info")).init();
}
