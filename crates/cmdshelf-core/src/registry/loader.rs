//! Registry loading with a single-slot cache.
//!
//! The loader picks a source (local file in development mode, fixed
//! remote URL in production), parses and validates the document, and
//! keeps the last validated registry for the lifetime of the loader. A
//! load either fully succeeds and replaces the cache or fails and leaves
//! it untouched.

use parking_lot::Mutex;
use reqwest::Client;
use serde_yaml::Value;
use std::time::Duration;
use tracing::debug;

use super::error::{HttpStatus, RegistryError};
use super::locator;
use super::schema::{self, Registry, RegistryCommand};
use crate::USER_AGENT;

/// Production registry document URL.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/cmdshelf/cmdshelf-registry/main/registry.yml";

pub struct RegistryLoader {
    url: String,
    client: Client,
    cache: Mutex<Option<Registry>>,
}

impl RegistryLoader {
    /// Create a loader against the production registry URL.
    pub fn new() -> Self {
        Self::with_url(DEFAULT_REGISTRY_URL)
    }

    /// Create a loader against a custom registry URL.
    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            cache: Mutex::new(None),
        }
    }

    /// Synchronous load: serves the cache or reads the local registry
    /// file. Never performs network I/O; without a local registry this
    /// fails with [`RegistryError::AsyncRequired`].
    pub fn load(&self) -> Result<Registry, RegistryError> {
        if let Some(registry) = self.cache.lock().clone() {
            return Ok(registry);
        }
        if !locator::local_registry_available() {
            return Err(RegistryError::AsyncRequired);
        }
        let registry = self.load_local_sync()?;
        *self.cache.lock() = Some(registry.clone());
        Ok(registry)
    }

    /// Load from the local registry file when one exists, otherwise
    /// fetch the production document.
    pub async fn load_async(&self) -> Result<Registry, RegistryError> {
        if let Some(registry) = self.cache.lock().clone() {
            return Ok(registry);
        }
        let registry = if locator::local_registry_available() {
            self.load_local().await?
        } else {
            self.fetch_remote().await?
        };
        *self.cache.lock() = Some(registry.clone());
        Ok(registry)
    }

    /// Reset the cache slot. Meant for test harnesses that need a clean
    /// state between load attempts.
    pub fn clear_cache(&self) {
        *self.cache.lock() = None;
    }

    /// Exact-match lookup by command name, via the synchronous load
    /// path. `Ok(None)` means the registry loaded but holds no such
    /// command.
    pub fn find_command(&self, name: &str) -> Result<Option<RegistryCommand>, RegistryError> {
        let registry = self.load()?;
        Ok(registry
            .commands
            .into_iter()
            .find(|command| command.name() == name))
    }

    /// Exact-match lookup by command name, via the asynchronous load
    /// path.
    pub async fn find_command_async(
        &self,
        name: &str,
    ) -> Result<Option<RegistryCommand>, RegistryError> {
        let registry = self.load_async().await?;
        Ok(registry
            .commands
            .into_iter()
            .find(|command| command.name() == name))
    }

    fn load_local_sync(&self) -> Result<Registry, RegistryError> {
        let path = locator::registry_path();
        // The availability check and this read can race with deletion.
        if !path.exists() {
            return Err(RegistryError::SourceNotFound { path });
        }
        debug!("loading registry from {}", path.display());
        let descriptor = path.display().to_string();
        let content = std::fs::read_to_string(&path).map_err(|cause| RegistryError::ParseFailed {
            descriptor: descriptor.clone(),
            cause: Box::new(cause),
        })?;
        parse_and_validate(&content, &descriptor)
    }

    async fn load_local(&self) -> Result<Registry, RegistryError> {
        let path = locator::registry_path();
        if !path.exists() {
            return Err(RegistryError::SourceNotFound { path });
        }
        debug!("loading registry from {}", path.display());
        let descriptor = path.display().to_string();
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|cause| RegistryError::ParseFailed {
                    descriptor: descriptor.clone(),
                    cause: Box::new(cause),
                })?;
        parse_and_validate(&content, &descriptor)
    }

    async fn fetch_remote(&self) -> Result<Registry, RegistryError> {
        debug!("fetching registry from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|cause| RegistryError::Request {
                url: self.url.clone(),
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::FetchFailed {
                url: self.url.clone(),
                status: Some(HttpStatus {
                    code: status.as_u16(),
                    text: status.canonical_reason().unwrap_or_default().to_string(),
                }),
                cause: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|cause| RegistryError::Request {
                url: self.url.clone(),
                cause,
            })?;
        // An unparseable body falls back to the generic fetch failure;
        // validation failures keep their own kind.
        match parse_and_validate(&body, &self.url) {
            Err(RegistryError::ParseFailed { cause, .. }) => Err(RegistryError::FetchFailed {
                url: self.url.clone(),
                status: None,
                cause: Some(cause),
            }),
            other => other,
        }
    }
}

impl Default for RegistryLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_and_validate(content: &str, descriptor: &str) -> Result<Registry, RegistryError> {
    let raw: Value = serde_yaml::from_str(content).map_err(|cause| RegistryError::ParseFailed {
        descriptor: descriptor.to_string(),
        cause: Box::new(cause),
    })?;
    schema::validate_registry(&raw, descriptor)
}
