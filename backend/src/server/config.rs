//! HTTP server configuration object and helpers.

use std::sync::Arc;
use std::time::Duration;

use user_service::domain::ports::UserRepository;
use user_service::settings::ListenTarget;

/// Default deadline for receiving request headers and for client disconnects.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) listen: ListenTarget,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) client_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration around the user repository.
    #[must_use]
    pub fn new(listen: ListenTarget, users: Arc<dyn UserRepository>) -> Self {
        Self {
            listen,
            users,
            client_timeout: CLIENT_TIMEOUT,
        }
    }

    /// Override the client request and disconnect timeouts.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by bootstrap tests only")
    )]
    #[must_use]
    pub fn with_client_timeout(mut self, timeout: Duration) -> Self {
        self.client_timeout = timeout;
        self
    }
}
