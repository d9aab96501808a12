mod app;
mod config;
mod store;
mod sync;
mod tui;
mod utils;
mod view;
mod wheel;
mod widgets;

use std::sync::Arc;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use tokio::{sync::mpsc, task};
use tracing::{event, Level};

use crate::{
    config::Config,
    store::{HttpStore, MemoryStore, OptionStore},
    sync::OptionSync,
};

fn main() -> Result<()> {
    let config = config::load()?;
    utils::init(&config)?;
    scopeguard::defer! {
        tui::exit().expect("failed to reset the terminal");
    }
    tui::enter()?;
    main_async(config)
}

#[tokio::main]
async fn main_async(config: Config) -> Result<()> {
    let store: Arc<dyn OptionStore> = match &config.store_url {
        Some(url) => Arc::new(HttpStore::new(url.as_str(), config.request_timeout())?),
        None => {
            event!(Level::WARN, "no store_url configured, options live in memory");
            Arc::new(MemoryStore::new())
        }
    };
    let (app_rng, sync_rng) = match config.seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };

    let (res_tx, res_rx) = mpsc::unbounded_channel();
    let (tui_tx, tui_rx) = mpsc::unbounded_channel();
    let (sync_tx, sync_rx) = mpsc::unbounded_channel();
    let tui_task = task::spawn(tui::handler(tui_rx, res_tx.clone(), config.frame_interval()));
    let sync_task = task::spawn(sync::handler(
        sync_rx,
        res_tx,
        OptionSync::new(store, sync_rng, config.request_timeout()),
    ));

    tokio::try_join!(
        app::start(res_rx, sync_tx, tui_tx, app_rng),
        flatten(tui_task),
        flatten(sync_task),
    )?;

    Ok(())
}

async fn flatten<T>(task: task::JoinHandle<Result<T>>) -> Result<T> {
    Ok(task.await??)
}
