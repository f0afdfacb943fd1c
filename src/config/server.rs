//! HTTP server bind configuration.

use super::env_or;
use std::{env, path::Path};

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl ServerConfig {
    /// Resolve the bind address from `BIND_ADDRESS`, or from `PORT` plus
    /// container detection.
    pub fn from_env() -> Self {
        let port = env_or("PORT", DEFAULT_PORT);
        let bind_override = env::var("BIND_ADDRESS").ok();
        let in_container = is_container_environment(
            env::var("KUBERNETES_SERVICE_HOST").ok().as_deref(),
            env::var("DOCKER_CONTAINER").ok().as_deref(),
            Path::new("/.dockerenv").exists(),
        );

        Self {
            bind_address: detect_bind_address(bind_override.as_deref(), in_container, port),
        }
    }
}

/// Kubernetes sets `KUBERNETES_SERVICE_HOST`; Docker images either set
/// `DOCKER_CONTAINER` or carry `/.dockerenv`.
pub fn is_container_environment(
    k8s_service_host: Option<&str>,
    docker_container: Option<&str>,
    dockerenv_exists: bool,
) -> bool {
    k8s_service_host.is_some() || docker_container.is_some() || dockerenv_exists
}

/// Containers must listen on all interfaces; local development stays on
/// loopback. An explicit override always wins.
pub fn detect_bind_address(bind_override: Option<&str>, in_container: bool, port: u16) -> String {
    match bind_override {
        Some(bind) if !bind.trim().is_empty() => bind.trim().to_string(),
        _ if in_container => format!("0.0.0.0:{port}"),
        _ => format!("127.0.0.1:{port}"),
    }
}
