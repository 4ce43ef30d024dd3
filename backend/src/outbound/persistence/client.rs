//! Connection factory for the MongoDB document store.
//!
//! Builds a driver client from host, port and optional credentials, then
//! proves the server is reachable with a `ping` before handing out the
//! [`Database`] handle. The handle is cheap to clone and safe to share across
//! concurrent requests.
//!
//! # Design
//!
//! - Construction and verification fail with distinct [`ConnectionError`]
//!   variants so bootstrap logs say which step broke.
//! - Credentials are attached only when a username or password is set; the
//!   authentication database defaults to the target database.
//! - Short connect and server-selection timeouts make an unreachable server
//!   fail at startup instead of on the first request.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use tracing::{Instrument, debug, info, info_span};

/// Errors that can occur while establishing a database connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// Client options or the client itself could not be built.
    #[error("failed to build MongoDB client: {message}")]
    Build {
        /// Driver error text.
        message: String,
    },

    /// The client was built but the server did not answer a ping.
    #[error("MongoDB ping failed: {message}")]
    Ping {
        /// Driver error text.
        message: String,
    },
}

impl ConnectionError {
    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create a ping error with the given message.
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }
}

/// Parameters for connecting to MongoDB.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use user_service::outbound::persistence::ConnectionConfig;
///
/// let config = ConnectionConfig::new("localhost", 27017, "user_service")
///     .with_credentials("svc", "secret")
///     .with_auth_database("admin")
///     .with_connect_timeout(Duration::from_secs(2));
/// assert_eq!(config.auth_source(), "admin");
/// ```
#[derive(Clone)]
pub struct ConnectionConfig {
    host: String,
    port: u16,
    database: String,
    username: String,
    password: String,
    auth_database: String,
    app_name: String,
    connect_timeout: Duration,
    server_selection_timeout: Duration,
}

impl ConnectionConfig {
    /// Create a configuration without credentials.
    ///
    /// Uses these defaults:
    /// - `app_name`: `user-service`
    /// - `connect_timeout`: 5 seconds
    /// - `server_selection_timeout`: 5 seconds
    pub fn new(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            username: String::new(),
            password: String::new(),
            auth_database: String::new(),
            app_name: "user-service".to_owned(),
            connect_timeout: Duration::from_secs(5),
            server_selection_timeout: Duration::from_secs(5),
        }
    }

    /// Set the username and password used for SCRAM authentication.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Authenticate against a database other than the target database.
    pub fn with_auth_database(mut self, auth_database: impl Into<String>) -> Self {
        self.auth_database = auth_database.into();
        self
    }

    /// Name reported to the server in its connection logs.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Set the TCP connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set how long the driver waits for a usable server.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Target database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Whether credentials are attached to the connection.
    pub fn uses_credentials(&self) -> bool {
        !(self.username.is_empty() && self.password.is_empty())
    }

    /// Database credentials are checked against.
    pub fn auth_source(&self) -> &str {
        if self.auth_database.is_empty() {
            &self.database
        } else {
            &self.auth_database
        }
    }

    /// Connection string without credentials.
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }

    fn credential(&self) -> Option<Credential> {
        self.uses_credentials().then(|| {
            Credential::builder()
                .username(self.username.clone())
                .password(self.password.clone())
                .source(self.auth_source().to_owned())
                .build()
        })
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("auth_database", &self.auth_source())
            .field("app_name", &self.app_name)
            .field("connect_timeout", &self.connect_timeout)
            .field("server_selection_timeout", &self.server_selection_timeout)
            .finish_non_exhaustive()
    }
}

/// Connect to MongoDB and verify the server answers before returning.
///
/// # Errors
///
/// Returns [`ConnectionError::Build`] if the options or client cannot be
/// constructed, and [`ConnectionError::Ping`] if the server is unreachable
/// or rejects the credentials.
pub async fn connect(config: &ConnectionConfig) -> Result<Database, ConnectionError> {
    let span = info_span!(
        "mongodb_connect",
        host = %config.host,
        port = config.port,
        database = %config.database,
    );

    async move {
        let client = build_client(config).await?;
        let database = client.database(&config.database);

        debug!("pinging MongoDB");
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| ConnectionError::ping(err.to_string()))?;

        info!(
            authenticated = config.uses_credentials(),
            "MongoDB connection verified"
        );
        Ok(database)
    }
    .instrument(span)
    .await
}

async fn build_client(config: &ConnectionConfig) -> Result<Client, ConnectionError> {
    if config.host.trim().is_empty() {
        return Err(ConnectionError::build("host must not be empty"));
    }
    if config.database.trim().is_empty() {
        return Err(ConnectionError::build("database name must not be empty"));
    }

    let uri = config.uri();
    let mut options = ClientOptions::parse(uri.as_str())
        .await
        .map_err(|err| ConnectionError::build(err.to_string()))?;
    options.app_name = Some(config.app_name.clone());
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    options.credential = config.credential();

    debug!(
        authenticated = config.uses_credentials(),
        auth_source = config.auth_source(),
        "building MongoDB client"
    );
    Client::with_options(options).map_err(|err| ConnectionError::build(err.to_string()))
}
