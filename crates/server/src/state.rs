use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use std::sync::Arc;
use ticket_cluster::{ClusterService, ModelError};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Loaded inference context; `None` only for a state built without models
    service: Option<Arc<ClusterService>>,
}

impl ServerState {
    /// Load the models named by `config.models` and build the state.
    /// Any load failure is returned; no partial state is constructed.
    pub fn new(config: ServerConfig) -> Result<Self, ModelError> {
        let service = ClusterService::load(config.models.clone())?;
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Build state around an already constructed service
    pub fn with_service(config: ServerConfig, service: Arc<ClusterService>) -> Self {
        Self {
            config: Arc::new(config),
            service: Some(service),
        }
    }

    /// State with no models; every model-backed endpoint answers 503
    pub fn unloaded(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            service: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.service.is_some()
    }

    /// The loaded service, or `ModelsUnavailable`
    pub fn service(&self) -> ServerResult<&ClusterService> {
        self.service.as_deref().ok_or(ServerError::ModelsUnavailable)
    }
}
