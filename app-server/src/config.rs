//! Server configuration, loadable from TOML.

use std::path::Path;

use finsolve_ollama::OllamaConfig;
use finsolve_retrieval::RetrievalConfig;
use serde::{Deserialize, Serialize};

use crate::auth::{UserRecord, default_users};
use crate::error::{Result, ServerError};

/// Configuration for the chat service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Index location and query embedding.
    pub retrieval: RetrievalConfig,

    /// Generation backend.
    pub generation: OllamaConfig,

    /// Accounts accepted by HTTP Basic authentication.
    pub users: Vec<UserRecord>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            retrieval: RetrievalConfig::default(),
            generation: OllamaConfig::default(),
            users: default_users(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys take defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Set the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.retrieval.index_dir, PathBuf::from("chroma_db"));
        assert_eq!(config.generation.model, "llama3");
        assert_eq!(config.users.len(), 8);
    }

    #[test]
    fn test_toml_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("server.toml");
        std::fs::write(
            &path,
            r#"
port = 9000

[generation]
base_url = "http://ollama:11434"

[[users]]
username = "Tony"
password = "password123"
role = "engineering"
"#,
        )
        .unwrap();

        let config = ServerConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.generation.base_url, "http://ollama:11434");
        assert_eq!(config.generation.model, "llama3");
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].role, "engineering");
    }
}
