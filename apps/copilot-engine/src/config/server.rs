//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port for the OpenClaw callback API.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
        }
    }
}

pub(crate) const fn default_http_port() -> u16 {
    8088
}

pub(crate) fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
