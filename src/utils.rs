use std::{
    fs::{create_dir_all, File},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};

use crate::config::Config;

pub fn init(config: &Config) -> Result<()> {
    create_dir_all(local_data_dir()?)?;
    init_logging(config)
}

pub fn local_data_dir() -> Result<PathBuf> {
    Ok(dirs::data_local_dir()
        .context("failed to get the local data directory")?
        .join(env!("CARGO_PKG_NAME")))
}

// The terminal belongs to the UI, so logs go to a file. Without the `ansi`
// feature the output is plain text.
fn init_logging(config: &Config) -> Result<()> {
    let path = local_data_dir()?.join(concat!(env!("CARGO_PKG_NAME"), ".log"));
    let file = File::create(&path).with_context(|| format!("failed to create {path:?}"))?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
