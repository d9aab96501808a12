//! Keeps the local option list in step with the option store.

use std::{fmt, future::Future, time::Duration};

use anyhow::Result;
use rand::Rng;
use tokio::{sync::mpsc, time::timeout};
use tracing::{event, Level};

use crate::{
    app,
    store::{OptionStore, StoreError, StoreResult},
    wheel::Choices,
};

pub type RequestTx = mpsc::UnboundedSender<Request>;
pub type RequestRx = mpsc::UnboundedReceiver<Request>;

#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    Refresh,
    Add(OptionText),
    Remove(String),
}

#[derive(Debug)]
pub enum Response {
    Choices(Choices),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("option text is empty")]
    Empty,
}

/// Text accepted for a new option. Never blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionText(String);

impl OptionText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OptionText {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for OptionText {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl fmt::Display for OptionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns the local copy of the options. The copy is only ever replaced as a
/// whole by [`OptionSync::refresh`]; add and remove go to the store and are
/// followed by a refresh.
pub struct OptionSync<S, R> {
    store: S,
    rng: R,
    timeout: Duration,
    choices: Choices,
}

impl<S: OptionStore, R: Rng> OptionSync<S, R> {
    pub fn new(store: S, rng: R, timeout: Duration) -> Self {
        Self {
            store,
            rng,
            timeout,
            choices: Choices::default(),
        }
    }

    async fn bounded<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        timeout(self.timeout, fut)
            .await
            .unwrap_or(Err(StoreError::Timeout(self.timeout)))
    }

    /// Fetches the full list. Falls back to placeholder options when the
    /// store cannot be used.
    pub async fn refresh(&mut self) -> &Choices {
        let fetched = self.bounded(self.store.list()).await;
        self.choices = match fetched {
            Ok(options) => {
                event!(Level::INFO, "fetched {} options", options.len());
                Choices::new(options, &mut self.rng)
            }
            Err(err) => {
                event!(Level::WARN, "failed to load options, using placeholders: {err}");
                Choices::placeholder(&mut self.rng)
            }
        };
        &self.choices
    }

    pub async fn add(&mut self, text: &OptionText) -> &Choices {
        if let Err(err) = self.bounded(self.store.add(text.as_str())).await {
            event!(Level::WARN, "failed to add {text:?}: {err}");
        }
        self.refresh().await
    }

    pub async fn remove(&mut self, text: &str) -> &Choices {
        if let Err(err) = self.bounded(self.store.remove(text)).await {
            event!(Level::WARN, "failed to remove {text:?}: {err}");
        }
        self.refresh().await
    }
}

/// Serves sync requests one at a time and reports every resulting option
/// list back to the app.
pub async fn handler<S: OptionStore, R: Rng>(
    mut rx: RequestRx,
    tx: mpsc::UnboundedSender<app::Response>,
    mut sync: OptionSync<S, R>,
) -> Result<()> {
    while let Some(request) = rx.recv().await {
        event!(Level::DEBUG, "sync request: {request:?}");
        let choices = match request {
            Request::Refresh => sync.refresh().await,
            Request::Add(text) => sync.add(&text).await,
            Request::Remove(text) => sync.remove(&text).await,
        };

        if tx
            .send(app::Response::Sync(Response::Choices(choices.clone())))
            .is_err()
        {
            break;
        }
    }

    event!(Level::INFO, "stop sync handler");
    Ok(())
}
