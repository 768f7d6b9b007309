//! Configuration options for the Triagely client

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration options for the Triagely client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether to persist the session across process restarts
    pub persist_session: bool,

    /// Directory holding the persisted session entries
    pub session_dir: PathBuf,

    /// The request timeout
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            session_dir: default_session_dir(),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ClientOptions {
    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the directory holding the persisted session entries
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}

/// Return the platform-standard directory for the persisted session
fn default_session_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("triagely")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".triagely")
    }
}
