use crate::domain::operation::Operation;
use crate::domain::ports::{HttpBackend, RawResponse};
use crate::error::{Result, SatimError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(RawResponse),
    Unreachable(String),
}

/// A scripted backend that never touches the network.
///
/// Each operation is answered with whatever was last scripted for it, and
/// every requested URL is recorded. Clones share the same script and log,
/// so a handle kept by a test still observes calls made by the client that
/// owns the boxed copy. Unscripted operations get a 404.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    replies: Arc<RwLock<HashMap<&'static str, Scripted>>>,
    requests: Arc<RwLock<Vec<Url>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `operation` with the given status and body.
    pub async fn respond(&self, operation: Operation, status: u16, body: impl Into<Vec<u8>>) {
        let mut replies = self.replies.write().await;
        replies.insert(
            operation.path(),
            Scripted::Reply(RawResponse::new(status, body)),
        );
    }

    /// Answers `operation` with `200 OK` and the given JSON body.
    pub async fn respond_json(&self, operation: Operation, body: &str) {
        self.respond(operation, 200, body.as_bytes()).await;
    }

    /// Makes `operation` fail as if the gateway could not be reached.
    pub async fn fail(&self, operation: Operation, reason: impl Into<String>) {
        let mut replies = self.replies.write().await;
        replies.insert(operation.path(), Scripted::Unreachable(reason.into()));
    }

    /// URLs requested so far, oldest first.
    pub async fn requests(&self) -> Vec<Url> {
        self.requests.read().await.clone()
    }

    pub async fn last_request(&self) -> Option<Url> {
        self.requests.read().await.last().cloned()
    }
}

#[async_trait]
impl HttpBackend for InMemoryBackend {
    async fn get(&self, url: &Url) -> Result<RawResponse> {
        self.requests.write().await.push(url.clone());

        let path = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();

        let replies = self.replies.read().await;
        match replies.get(path) {
            Some(Scripted::Reply(response)) => Ok(response.clone()),
            Some(Scripted::Unreachable(reason)) => Err(SatimError::Http(reason.clone().into())),
            None => Ok(RawResponse::new(404, Vec::new())),
        }
    }
}
