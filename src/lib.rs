//! Triagely Rust Client Library
//!
//! A Rust client for the Triagely bug report triage service, covering
//! authentication with durable session persistence, report triage, tenant
//! management, and issue tracker integrations.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod integrations;
pub mod reports;
pub mod tenants;
pub mod users;
pub mod views;

use reqwest::Client;

use crate::auth::{Auth, SessionStore};
use crate::config::ClientOptions;
use crate::integrations::IntegrationsClient;
use crate::reports::ReportsClient;
use crate::tenants::TenantsClient;
use crate::users::UsersClient;

/// The main entry point for the Triagely client
pub struct Triagely {
    /// The base URL of the Triagely deployment
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client and the session it maintains
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
    session: SessionStore,
}

impl Triagely {
    /// Create a new Triagely client and restore any persisted session.
    ///
    /// # Example
    ///
    /// ```
    /// use triagely_client::Triagely;
    ///
    /// let triagely = Triagely::new("https://triage.example.com");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new Triagely client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use triagely_client::{Triagely, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_persist_session(false);
    /// let triagely = Triagely::new_with_options("https://triage.example.com", options);
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Self {
        let http_client = match options.request_timeout {
            Some(timeout) => Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            None => Client::new(),
        };

        let storage_dir = options.persist_session.then(|| options.session_dir.clone());
        let session = SessionStore::new(storage_dir);
        // One restore per process, before any view reads the session.
        session.restore();

        let auth = Auth::new(url, http_client.clone(), session.clone());

        Self {
            url: url.to_string(),
            http_client,
            auth,
            options,
            session,
        }
    }

    /// Get a reference to the auth client for login, logout, and session state
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a client for report listing and triage operations
    pub fn reports(&self) -> ReportsClient {
        ReportsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Create a client for tenant records and API keys
    pub fn tenants(&self) -> TenantsClient {
        TenantsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Create a client for user administration
    pub fn users(&self) -> UsersClient {
        UsersClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Create a client for issue tracker integrations
    pub fn integrations(&self) -> IntegrationsClient {
        IntegrationsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// The session store shared by every sub-client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Session, SessionStore, User, UserRole};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::reports::{BugReport, ReportFilter, ReportStatus};
    pub use crate::Triagely;
}
