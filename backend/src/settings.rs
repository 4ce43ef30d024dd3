//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_SERVICE_*` environment variables and an
//! optional configuration file, in that order of precedence. Numeric fields
//! carry loader defaults; the remaining optional fields fall back to the
//! documented defaults in their accessors.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::ConnectionConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MONGODB_HOST: &str = "localhost";
const DEFAULT_MONGODB_PORT: u16 = 27017;
const DEFAULT_MONGODB_DATABASE: &str = "user_service";
const DEFAULT_MONGODB_COLLECTION: &str = "users";
const DEFAULT_MONGODB_TIMEOUT_SECS: u64 = 5;
const SOCKET_FILE_NAME: &str = "app.sock";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `listen_type` was neither `port` nor `sock`.
    #[error("unsupported listen type `{value}`; expected `port` or `sock`")]
    UnsupportedListenType {
        /// The rejected listen type.
        value: String,
    },
}

/// Where the HTTP listener binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    /// TCP socket address.
    Tcp(SocketAddr),
    /// Unix domain socket path.
    Unix(PathBuf),
}

/// Configuration values for the HTTP listener and MongoDB connection.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServiceSettings {
    /// Listener kind: `port` for TCP or `sock` for a Unix socket.
    pub listen_type: Option<String>,
    /// Address the TCP listener binds to.
    pub bind_ip: Option<IpAddr>,
    /// Port the TCP listener binds to.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Unix socket path used when `listen_type` is `sock`.
    pub socket_path: Option<PathBuf>,
    /// MongoDB host name.
    pub mongodb_host: Option<String>,
    /// MongoDB port.
    #[ortho_config(default = 27017)]
    pub mongodb_port: u16,
    /// Database holding the users collection.
    pub mongodb_database: Option<String>,
    /// Database credentials are checked against; defaults to the target.
    pub mongodb_auth_db: Option<String>,
    /// MongoDB user; leave unset together with the password to skip auth.
    pub mongodb_username: Option<String>,
    /// MongoDB password.
    pub mongodb_password: Option<String>,
    /// Collection storing user documents.
    pub mongodb_collection: Option<String>,
    /// Deadline in seconds for connecting and for each store operation.
    #[ortho_config(default = 5)]
    pub mongodb_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            listen_type: None,
            bind_ip: None,
            port: DEFAULT_PORT,
            socket_path: None,
            mongodb_host: None,
            mongodb_port: DEFAULT_MONGODB_PORT,
            mongodb_database: None,
            mongodb_auth_db: None,
            mongodb_username: None,
            mongodb_password: None,
            mongodb_collection: None,
            mongodb_timeout_secs: DEFAULT_MONGODB_TIMEOUT_SECS,
        }
    }
}

impl ServiceSettings {
    /// Resolve the listener address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnsupportedListenType`] for any listen type
    /// other than `port` or `sock`.
    pub fn listen_target(&self) -> Result<ListenTarget, SettingsError> {
        match self.listen_type.as_deref().map(str::trim) {
            None | Some("port") => {
                let ip = self.bind_ip.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
                Ok(ListenTarget::Tcp(SocketAddr::new(ip, self.port)))
            }
            Some("sock") => Ok(ListenTarget::Unix(
                self.socket_path.clone().unwrap_or_else(default_socket_path),
            )),
            Some(other) => Err(SettingsError::UnsupportedListenType {
                value: other.to_owned(),
            }),
        }
    }

    /// Collection storing user documents.
    pub fn collection(&self) -> &str {
        self.mongodb_collection
            .as_deref()
            .unwrap_or(DEFAULT_MONGODB_COLLECTION)
    }

    /// Deadline applied to connecting and to each repository operation.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.mongodb_timeout_secs)
    }

    /// Connection parameters for [`connect`](crate::outbound::persistence::connect).
    pub fn connection_config(&self) -> ConnectionConfig {
        let timeout = self.operation_timeout();
        let mut config = ConnectionConfig::new(
            self.mongodb_host
                .as_deref()
                .unwrap_or(DEFAULT_MONGODB_HOST),
            self.mongodb_port,
            self.mongodb_database
                .as_deref()
                .unwrap_or(DEFAULT_MONGODB_DATABASE),
        )
        .with_credentials(
            self.mongodb_username.clone().unwrap_or_default(),
            self.mongodb_password.clone().unwrap_or_default(),
        )
        .with_connect_timeout(timeout)
        .with_server_selection_timeout(timeout);

        if let Some(auth_db) = self.mongodb_auth_db.as_deref() {
            config = config.with_auth_database(auth_db);
        }
        config
    }
}

/// `app.sock` beside the running executable, or in the working directory
/// when the executable path is unavailable.
fn default_socket_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SOCKET_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(SOCKET_FILE_NAME))
}
