use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{OptionStore, StoreError, StoreResult};

const LIST: &str = "get-opciones";
const ADD: &str = "add-opcion";
const REMOVE: &str = "delete-opcion";

#[derive(Serialize)]
struct OptionBody<'a> {
    texto: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the option functions over HTTP with JSON bodies.
#[derive(Clone, Debug)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    async fn send_text(&self, method: Method, endpoint: &str, text: &str) -> StoreResult<()> {
        let res = self
            .client
            .request(method, self.url(endpoint))
            .json(&OptionBody { texto: text })
            .send()
            .await
            .map_err(unreachable_store)?;
        let status = res.status();
        let body = res.text().await?;
        check_status(status, &body)
    }
}

#[async_trait]
impl OptionStore for HttpStore {
    #[instrument(name = "list_options", err, skip(self))]
    async fn list(&self) -> StoreResult<Vec<String>> {
        let res = self
            .client
            .get(self.url(LIST))
            .send()
            .await
            .map_err(unreachable_store)?;
        let status = res.status();
        let body = res.text().await?;
        check_status(status, &body)?;
        parse_options(&body)
    }

    #[instrument(name = "add_option", err, skip(self))]
    async fn add(&self, text: &str) -> StoreResult<()> {
        self.send_text(Method::POST, ADD, text).await
    }

    #[instrument(name = "remove_option", err, skip(self))]
    async fn remove(&self, text: &str) -> StoreResult<()> {
        self.send_text(Method::DELETE, REMOVE, text).await
    }
}

fn unreachable_store(err: reqwest::Error) -> StoreError {
    if err.is_connect() {
        StoreError::Unavailable(err.to_string())
    } else {
        err.into()
    }
}

fn check_status(status: StatusCode, body: &str) -> StoreResult<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(match status {
        StatusCode::METHOD_NOT_ALLOWED => StoreError::MethodNotAllowed,
        StatusCode::BAD_REQUEST => StoreError::BadRequest(body.to_string()),
        s if s.is_server_error() => StoreError::Server(
            serde_json::from_str::<ErrorBody>(body)
                .map(|e| e.error)
                .unwrap_or_else(|_| body.to_string()),
        ),
        s => StoreError::UnexpectedStatus(s.as_u16()),
    })
}

fn parse_options(body: &str) -> StoreResult<Vec<String>> {
    Ok(serde_json::from_str(body)?)
}
