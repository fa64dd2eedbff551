//! Background log tailing — implements `LogStreamer` over the cluster API.

use std::sync::Mutex;

use futures_util::StreamExt as _;
use reqwest::Method;
use tokio::task::JoinHandle;

use crate::application::ports::LogStreamer;
use crate::infra::cluster::HttpClusterClient;

/// Streams `GET /v1/apps/{name}/logs?follow=true` to stdout on a tokio task.
pub struct ClusterLogStreamer {
    cluster: HttpClusterClient,
    enabled: bool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ClusterLogStreamer {
    /// `enabled == false` turns `start` into a no-op (e.g. under `--quiet`).
    #[must_use]
    pub fn new(cluster: HttpClusterClient, enabled: bool) -> Self {
        Self {
            cluster,
            enabled,
            task: Mutex::new(None),
        }
    }
}

impl LogStreamer for ClusterLogStreamer {
    fn start(&self, app: &str) {
        if !self.enabled {
            return;
        }
        let req = match self.cluster.request(Method::GET, &["v1", "apps", app, "logs"]) {
            Ok(req) => req.query(&[("follow", "true")]),
            Err(e) => {
                tracing::debug!(error = %e, "cannot build log request");
                return;
            }
        };
        let app = app.to_string();
        let handle = tokio::spawn(async move {
            let resp = match req.send().await.and_then(reqwest::Response::error_for_status) {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::debug!(app, error = %e, "log stream unavailable");
                    return;
                }
            };
            let mut stream = resp.bytes_stream();
            let mut pending: Vec<u8> = Vec::new();
            while let Some(chunk) = stream.next().await {
                let Ok(chunk) = chunk else { break };
                pending.extend_from_slice(&chunk);
                while let Some(pos) = pending.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = pending.drain(..=pos).collect();
                    println!("[{app}] {}", String::from_utf8_lossy(&line).trim_end());
                }
            }
        });

        if let Ok(mut slot) = self.task.lock()
            && let Some(previous) = slot.replace(handle)
        {
            previous.abort();
        }
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.task.lock()
            && let Some(handle) = slot.take()
        {
            handle.abort();
        }
    }
}
