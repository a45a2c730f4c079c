//! Pinboard client implementation.
//!
//! This module provides the main client interface and its builder.

use crate::config::PinboardConfig;
use crate::error::PinboardError;
use crate::services::{BookmarksService, NotesService, RequestPipeline, TagsService};
use crate::transport::{HttpTransport, ReqwestTransport};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Pinboard client trait.
pub trait PinboardClient: Send + Sync {
    /// Get the bookmarks service.
    fn bookmarks(&self) -> &BookmarksService;

    /// Get the tags service.
    fn tags(&self) -> &TagsService;

    /// Get the notes service.
    fn notes(&self) -> &NotesService;

    /// Get the client configuration.
    fn config(&self) -> &PinboardConfig;
}

/// Pinboard client implementation.
///
/// Cheap to share: every service reads the same configuration and transport,
/// and calls may run concurrently.
pub struct PinboardClientImpl {
    config: Arc<PinboardConfig>,
    pipeline: RequestPipeline,

    bookmarks: OnceCell<BookmarksService>,
    tags: OnceCell<TagsService>,
    notes: OnceCell<NotesService>,
}

impl PinboardClientImpl {
    /// Create a new client with the given configuration and transport.
    pub fn new(config: PinboardConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Arc::new(config);
        let pipeline = RequestPipeline::new(config.clone(), transport);

        Self {
            config,
            pipeline,
            bookmarks: OnceCell::new(),
            tags: OnceCell::new(),
            notes: OnceCell::new(),
        }
    }
}

impl PinboardClient for PinboardClientImpl {
    fn bookmarks(&self) -> &BookmarksService {
        self.bookmarks
            .get_or_init(|| BookmarksService::with_pipeline(self.pipeline.clone()))
    }

    fn tags(&self) -> &TagsService {
        self.tags
            .get_or_init(|| TagsService::with_pipeline(self.pipeline.clone()))
    }

    fn notes(&self) -> &NotesService {
        self.notes
            .get_or_init(|| NotesService::with_pipeline(self.pipeline.clone()))
    }

    fn config(&self) -> &PinboardConfig {
        &self.config
    }
}

impl std::fmt::Debug for PinboardClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinboardClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for the Pinboard client.
pub struct PinboardClientBuilder {
    config: Option<PinboardConfig>,
    from_env: bool,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl PinboardClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            from_env: false,
            transport: None,
        }
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: PinboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// Fails with a configuration error when neither a configuration nor a
    /// token in the environment is available.
    pub fn build(self) -> Result<PinboardClientImpl, PinboardError> {
        let config = match self.config {
            Some(config) => config,
            None if self.from_env => PinboardConfig::builder().from_env().build()?,
            None => PinboardConfig::builder().build()?,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let transport = ReqwestTransport::builder()
                    .connect_timeout(config.connect_timeout)
                    .read_timeout(config.read_timeout)
                    .pool_max_idle_per_host(config.max_connections as usize)
                    .pool_idle_timeout(Some(config.idle_timeout))
                    .verify_ssl(config.verify_ssl)
                    .user_agent(config.user_agent.clone())
                    .build()?;
                Arc::new(transport) as Arc<dyn HttpTransport>
            }
        };

        debug!(
            base_url = %config.base_url,
            user = config.username().unwrap_or("-"),
            "built Pinboard client"
        );
        Ok(PinboardClientImpl::new(config, transport))
    }
}

impl Default for PinboardClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::mocks::{MockResponse, MockTransport, TestFixtures};

    #[test]
    fn test_builder_requires_token() {
        let err = PinboardClientBuilder::new().build().unwrap_err();
        assert!(matches!(
            err,
            PinboardError::Configuration(ConfigurationError::MissingAuthToken)
        ));
    }

    #[test]
    fn test_builder_with_config() {
        let config = PinboardConfig::builder()
            .auth_token("alice:ABC123")
            .base_url("http://localhost:9999/v1/")
            .build()
            .unwrap();

        let client = PinboardClientBuilder::new().config(config).build().unwrap();
        assert_eq!(client.config().base_url.as_str(), "http://localhost:9999/v1/");
    }

    #[test]
    fn test_services_are_initialised_once() {
        let config = PinboardConfig::new("alice:ABC123").unwrap();
        let client = PinboardClientImpl::new(config, Arc::new(MockTransport::new()));

        assert!(std::ptr::eq(client.tags(), client.tags()));
        assert!(std::ptr::eq(client.bookmarks(), client.bookmarks()));
        assert!(std::ptr::eq(client.notes(), client.notes()));
    }

    #[tokio::test]
    async fn test_services_share_transport() {
        let transport = Arc::new(MockTransport::with_default(MockResponse::ok_with_body(
            TestFixtures::done_xml(),
        )));
        let config = PinboardConfig::new("alice:ABC123").unwrap();
        let client = PinboardClientBuilder::new()
            .config(config)
            .transport(transport.clone())
            .build()
            .unwrap();

        client.tags().delete("rust").await.unwrap();
        client.bookmarks().delete("https://example.com/").await.unwrap();
        assert_eq!(transport.request_count(), 2);
    }
}
