use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use shared::{
    domain::{Task, TaskId},
    error::StoreErrorBody,
    protocol::{NewTask, StatusQuery, TaskList},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::StoreError;

/// The remote task store as seen by the board. Implementations only move
/// payloads over the wire; lane logic lives elsewhere.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError>;
    async fn create(&self, task: &NewTask) -> Result<(), StoreError>;
    async fn remove(&self, id: &TaskId) -> Result<(), StoreError>;
    async fn set_status(&self, id: &TaskId, remote_status: &str) -> Result<(), StoreError>;
}

pub struct HttpTaskStore {
    http: Client,
    tasks_url: Url,
}

impl HttpTaskStore {
    /// `tasks_url` is the collection endpoint, e.g. `http://127.0.0.1:8000/tasks`.
    pub fn new(tasks_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let parsed = Url::parse(tasks_url)
            .with_context(|| format!("invalid task store url '{tasks_url}'"))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            bail!("task store url '{tasks_url}' must be an http(s) url");
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client for the task store")?;
        Ok(Self {
            http,
            tasks_url: parsed,
        })
    }

    pub fn tasks_url(&self) -> &Url {
        &self.tasks_url
    }

    fn task_url(&self, id: &TaskId, tail: Option<&str>) -> Url {
        let mut url = self.tasks_url.clone();
        // `new` rejects cannot-be-a-base urls, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        url
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(|err| {
            let reason = error_chain(&err);
            warn!(operation, error = %reason, "task store unreachable");
            StoreError::Network(reason)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(operation, status = status.as_u16(), "task store request ok");
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        warn!(operation, status = status.as_u16(), body = %raw, "task store rejected request");
        Err(StoreError::Http {
            status: status.as_u16(),
            body: StoreErrorBody::summarize(&raw),
        })
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError> {
        let response = self
            .send(self.http.get(self.tasks_url.clone()), "fetch_all")
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| StoreError::Network(error_chain(&err)))?;
        let tasks: TaskList = serde_json::from_slice(&bytes).map_err(|err| {
            warn!(error = %err, "task list payload could not be decoded");
            StoreError::Decode(err.to_string())
        })?;
        debug!(count = tasks.len(), "fetched task list");
        Ok(tasks)
    }

    async fn create(&self, task: &NewTask) -> Result<(), StoreError> {
        self.send(self.http.post(self.tasks_url.clone()).json(task), "create")
            .await?;
        Ok(())
    }

    async fn remove(&self, id: &TaskId) -> Result<(), StoreError> {
        self.send(self.http.delete(self.task_url(id, None)), "remove")
            .await?;
        Ok(())
    }

    async fn set_status(&self, id: &TaskId, remote_status: &str) -> Result<(), StoreError> {
        let query = StatusQuery {
            status: remote_status.to_string(),
        };
        self.send(
            self.http
                .patch(self.task_url(id, Some("status")))
                .query(&query),
            "set_status",
        )
        .await?;
        Ok(())
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
