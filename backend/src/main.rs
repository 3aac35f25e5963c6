//! `mentorship` entry-point: loads configuration and runs one CLI command.

use std::ffi::OsString;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mentorship::inbound::cli::{Cli, run};
use mentorship::settings::MentorshipSettings;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = MentorshipSettings::load_from_iter([OsString::from("mentorship")])
        .map_err(|err| eyre!("load configuration: {err}"))?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(cli, &settings))?;
    Ok(())
}
