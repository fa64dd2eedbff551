//! HTTP client for the cluster API — implements `ClusterApi` and `TaskRunner`.

use std::time::Duration;

use anyhow::{Context, Result};
use convoy_common::{
    ActualInstance, DesiredApp, InstanceState, RouteOverride, RoutesRequest, ScaleRequest,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::application::ports::{ClusterApi, InstanceSummary, TaskRunner};
use crate::domain::ConvoyConfig;

/// Per-request timeout for API calls (log streams are exempt).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cluster API client sharing one connection pool.
#[derive(Clone)]
pub struct HttpClusterClient {
    client: Client,
    base: Url,
    auth: Option<(String, Option<String>)>,
}

impl HttpClusterClient {
    /// Build a client for the API configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if no target is configured, the API URL is invalid,
    /// or the HTTP client cannot be constructed.
    pub fn new(config: &ConvoyConfig) -> Result<Self> {
        let base = config.api_base()?;
        let base = Url::parse(&base).with_context(|| format!("invalid API URL {base}"))?;
        let client = Client::builder()
            .user_agent(concat!("convoy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        let auth = config
            .credentials()
            .map(|(user, pass)| (user.to_string(), pass.map(str::to_string)));
        Ok(Self { client, base, auth })
    }

    /// Start a request to the API path made of `segments`.
    ///
    /// Segments are percent-encoded, so app names cannot escape their path slot.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("API URL {} cannot have a path", self.base))?
            .pop_if_empty()
            .extend(segments);
        tracing::debug!(%method, %url, "cluster request");
        let req = self.client.request(method, url);
        Ok(match &self.auth {
            Some((user, pass)) => req.basic_auth(user, pass.as_ref()),
            None => req,
        })
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("cluster API unreachable")?;
        ensure_success(resp).await
    }
}

/// Turn a non-2xx response into an error carrying status and body.
async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        anyhow::bail!("cluster API returned {status}");
    }
    anyhow::bail!("cluster API returned {status}: {body}")
}

/// Collapse per-instance reports into running count and placement status.
#[must_use]
pub fn summarize(instances: &[ActualInstance]) -> InstanceSummary {
    InstanceSummary {
        running: u32::try_from(
            instances
                .iter()
                .filter(|i| i.state == InstanceState::Running)
                .count(),
        )
        .unwrap_or(u32::MAX),
        placement_error: instances.iter().any(|i| !i.placement_error.is_empty()),
    }
}

impl ClusterApi for HttpClusterClient {
    async fn create_app(&self, app: &DesiredApp) -> Result<()> {
        let req = self.request(Method::POST, &["v1", "apps"])?.json(app);
        self.send(req).await?;
        Ok(())
    }

    async fn scale_app(&self, name: &str, instances: u32) -> Result<()> {
        let req = self
            .request(Method::PUT, &["v1", "apps", name, "instances"])?
            .json(&ScaleRequest { instances });
        self.send(req).await?;
        Ok(())
    }

    async fn update_routes(&self, name: &str, routes: &[RouteOverride]) -> Result<()> {
        let req = self
            .request(Method::PUT, &["v1", "apps", name, "routes"])?
            .json(&RoutesRequest {
                routes: routes.to_vec(),
            });
        self.send(req).await?;
        Ok(())
    }

    async fn remove_app(&self, name: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &["v1", "apps", name])?;
        self.send(req).await?;
        Ok(())
    }

    async fn instance_summary(&self, name: &str) -> Result<InstanceSummary> {
        let req = self.request(Method::GET, &["v1", "apps", name, "instances"])?;
        let instances: Vec<ActualInstance> = self
            .send(req)
            .await?
            .json()
            .await
            .context("decoding instance list")?;
        Ok(summarize(&instances))
    }

    async fn app_exists(&self, name: &str) -> Result<bool> {
        let resp = self
            .request(Method::GET, &["v1", "apps", name])?
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("cluster API unreachable")?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        ensure_success(resp).await?;
        Ok(true)
    }
}

impl TaskRunner for HttpClusterClient {
    async fn submit_task(&self, definition: &serde_json::Value) -> Result<()> {
        let req = self.request(Method::POST, &["v1", "tasks"])?.json(definition);
        self.send(req).await?;
        Ok(())
    }

    async fn delete_task(&self, guid: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &["v1", "tasks", guid])?;
        self.send(req).await?;
        Ok(())
    }
}
