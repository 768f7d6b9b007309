//! User administration (admin tiers only)
//!
//! Super admins manage every account; client admins are scoped server-side
//! to their own tenant and cannot mint super admins.

use reqwest::Client;
use serde::Serialize;

use crate::auth::{SessionStore, User, UserRole};
use crate::error::Error;
use crate::fetch::Fetch;

/// Payload for creating a new user account
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub tenant_id: Option<i64>,
}

/// Editable account fields; unset fields are left as they are
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Client for the user administration endpoints
pub struct UsersClient {
    url: String,
    client: Client,
    session: SessionStore,
}

impl UsersClient {
    /// Create a new UsersClient
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api/users{}", self.url, path)
    }

    /// List users visible to the caller: everyone for a super admin, the
    /// caller's tenant for a client admin
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        let url = self.get_url("");

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<Vec<User>>()
            .await
    }

    /// Create a user account
    pub async fn create(&self, new: &NewUser) -> Result<User, Error> {
        let url = self.get_url("");

        Fetch::post(&self.client, &url)
            .with_session(&self.session)
            .json(new)?
            .execute::<User>()
            .await
    }

    /// Get a single user by ID
    pub async fn get(&self, id: i64) -> Result<User, Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<User>()
            .await
    }

    /// Update an account, returning the updated user
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User, Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::put(&self.client, &url)
            .with_session(&self.session)
            .json(update)?
            .execute::<User>()
            .await
    }

    /// Deactivate an account. The server soft-deletes: the record stays but
    /// the account can no longer log in.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::delete(&self.client, &url)
            .with_session(&self.session)
            .execute_raw()
            .await?;

        Ok(())
    }
}
