//! Authentication and session management for the Triagely admin API

mod session;
mod types;

use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::error::Error;
use crate::fetch::Fetch;

pub use session::*;
pub use types::*;

/// Client for the authentication endpoints plus the session it maintains
pub struct Auth {
    /// The base URL of the Triagely deployment
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The session store shared with every other sub-client
    session: SessionStore,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/api/auth{}", self.url, path)
    }

    /// Log in with email and password.
    ///
    /// On success the held session is replaced wholesale and persisted. On
    /// failure the server-provided reason text is surfaced and any prior
    /// session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.get_auth_url("/login");

        let body = json!({
            "email": email,
            "password": password,
        });

        let result = Fetch::post(&self.client, &url)
            .json(&body)?
            .execute::<Session>()
            .await;

        let session = match result {
            Ok(session) => session,
            // Bad credentials come back as 401; that is an authentication
            // failure, not an expired session.
            Err(Error::Unauthorized(detail)) => return Err(Error::auth(detail)),
            Err(Error::Api { message, .. }) => return Err(Error::auth(message)),
            Err(err) => return Err(err),
        };

        self.session.set(session.clone())?;
        info!(user_id = session.user.id, "logged in");

        Ok(session)
    }

    /// Drop the current session from memory and storage.
    ///
    /// The server keeps no session state, so no remote call is made.
    pub fn logout(&self) {
        self.session.clear();
        info!("logged out");
    }

    /// Restore a previously persisted session, if any
    pub fn restore(&self) {
        self.session.restore();
    }

    /// Fetch the user record for the currently held token
    pub async fn me(&self) -> Result<User, Error> {
        let url = self.get_auth_url("/me");

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<User>()
            .await
    }

    /// Get the currently held identity without a remote call
    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    /// Get the session store shared by every sub-client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
