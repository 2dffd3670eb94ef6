use std::{collections::BTreeMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use sdp_model::ContainerId;
use tracing::{debug, trace, warn};

use super::{ContainerEngine, ContainerInfo, CreateContainer, EngineConnector};
use crate::{
    endpoint::parse_engine_url,
    error::EngineError,
    wire::{
        CreateContainerBody, CreateContainerResponse, EmptyObject, ErrorBody, HostConfigBody,
        InspectResponse,
    },
};

/// Default Docker Engine API version used in request paths.
pub const DEFAULT_API_VERSION: &str = "1.41";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// API version, without the leading `v`.
    pub api_version: String,
    /// Per-request timeout. `None` waits for the engine indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: None,
        }
    }
}

/// Docker Engine API client for one engine.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: Client,
    base: Url,
    api_version: String,
}

impl HttpEngine {
    pub fn new(engine_url: &str, config: &EngineConfig) -> Result<Self, EngineError> {
        Self::with_client(build_client(config)?, engine_url, &config.api_version)
    }

    pub fn with_client(client: Client, engine_url: &str, api_version: &str) -> Result<Self, EngineError> {
        Ok(Self {
            client,
            base: parse_engine_url(engine_url)?,
            api_version: api_version.trim_start_matches('v').to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, EngineError> {
        self.base
            .join(&format!("v{}/{}", self.api_version, path))
            .map_err(|e| EngineError::InvalidEndpoint {
                url: self.base.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ContainerEngine for HttpEngine {
    async fn create_container(&self, request: &CreateContainer) -> Result<ContainerId, EngineError> {
        let binds = request.binds.iter().map(ToString::to_string).collect();
        let body = CreateContainerBody {
            image: &request.image,
            cmd: &request.cmd,
            volumes: request
                .volumes
                .iter()
                .map(|v| (v.as_str(), EmptyObject::default()))
                .collect::<BTreeMap<_, _>>(),
            host_config: HostConfigBody { binds },
        };

        let url = self.url("containers/create")?;
        trace!(target: "sdp.engine.http", %url, image = %request.image, cmd = ?request.cmd, "create container");

        let response = self.client.post(url).json(&body).send().await?;
        let response = check_status("create container", response).await?;
        let created: CreateContainerResponse = read_json(response).await?;

        for warning in created.warnings.iter().flatten() {
            warn!(target: "sdp.engine.http", container = %created.id, "engine warning: {warning}");
        }
        Ok(ContainerId::from(created.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let url = self.url(&format!("containers/{id}/start"))?;
        trace!(target: "sdp.engine.http", %url, "start container");

        let response = self.client.post(url).send().await?;
        if response.status() == StatusCode::NOT_MODIFIED {
            debug!(target: "sdp.engine.http", container = %id, "container already started");
            return Ok(());
        }
        check_status("start container", response).await?;
        Ok(())
    }

    async fn inspect_container(&self, id: &ContainerId) -> Result<ContainerInfo, EngineError> {
        let url = self.url(&format!("containers/{id}/json"))?;
        trace!(target: "sdp.engine.http", %url, "inspect container");

        let response = self.client.get(url).send().await?;
        let response = check_status("inspect container", response).await?;
        let inspected: InspectResponse = read_json(response).await?;

        Ok(ContainerInfo {
            id: ContainerId::from(inspected.id),
            ip_address: inspected
                .network_settings
                .and_then(|n| n.ip_address)
                .unwrap_or_default(),
        })
    }
}

/// [`EngineConnector`] creating [`HttpEngine`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: Client,
    api_version: String,
}

impl HttpConnector {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            client: build_client(config)?,
            api_version: config.api_version.clone(),
        })
    }
}

impl EngineConnector for HttpConnector {
    fn connect(&self, engine_url: &str) -> Result<Arc<dyn ContainerEngine>, EngineError> {
        let engine = HttpEngine::with_client(self.client.clone(), engine_url, &self.api_version)?;
        debug!(target: "sdp.engine.http", base = %engine.base_url(), "engine client ready");
        Ok(Arc::new(engine))
    }
}

fn build_client(config: &EngineConfig) -> Result<Client, EngineError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

async fn check_status(op: &'static str, response: Response) -> Result<Response, EngineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    Err(EngineError::Status {
        op,
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T>(response: Response) -> Result<T, EngineError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        EngineError::InvalidResponse(format!("failed to parse response: {}, body: {}", e, body))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_urls_carry_api_version() {
        let engine = HttpEngine::new("tcp://host:2375", &EngineConfig::default()).unwrap();
        assert_eq!(
            engine.url("containers/create").unwrap().as_str(),
            "http://host:2375/v1.41/containers/create"
        );
    }

    #[test]
    fn leading_v_in_version_is_ignored() {
        let cfg = EngineConfig {
            api_version: "v1.21".into(),
            request_timeout: Some(Duration::from_secs(5)),
        };
        let engine = HttpEngine::new("tcp://host:2375", &cfg).unwrap();
        assert_eq!(
            engine.url("containers/abc/json").unwrap().as_str(),
            "http://host:2375/v1.21/containers/abc/json"
        );
    }

    #[test]
    fn connector_rejects_unix_socket() {
        let connector = HttpConnector::new(&EngineConfig::default()).unwrap();
        let err = connector.connect("unix:///var/run/docker.sock").err().unwrap();
        assert!(matches!(err, EngineError::UnsupportedEndpoint(_)));
    }
}
