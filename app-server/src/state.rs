//! Shared state handed to every request handler.

use std::sync::Arc;

use finsolve_ollama::{GenerationClient, OllamaClient};
use finsolve_retrieval::RoleScopedRetriever;

use crate::auth::{CredentialStore, StaticCredentialStore};
use crate::config::ServerConfig;
use crate::error::Result;

/// Read-only dependencies of the HTTP handlers.
pub struct AppState {
    retriever: RoleScopedRetriever,
    credentials: Arc<dyn CredentialStore>,
    generator: Arc<dyn GenerationClient>,
}

impl AppState {
    pub fn new(
        retriever: RoleScopedRetriever,
        credentials: Arc<dyn CredentialStore>,
        generator: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            retriever,
            credentials,
            generator,
        }
    }

    /// Open the index and build the clients named in `config`.
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let retriever = RoleScopedRetriever::from_config(&config.retrieval).await?;
        let credentials = Arc::new(StaticCredentialStore::new(config.users.clone()));
        let generator = Arc::new(OllamaClient::new(config.generation.clone()));
        Ok(Self::new(retriever, credentials, generator))
    }

    pub fn retriever(&self) -> &RoleScopedRetriever {
        &self.retriever
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    pub fn generator(&self) -> &dyn GenerationClient {
        self.generator.as_ref()
    }
}
