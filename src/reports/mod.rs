//! Bug report listing, inspection, and triage operations

mod types;

use reqwest::Client;

use crate::auth::SessionStore;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Client for the report endpoints
pub struct ReportsClient {
    /// The base URL of the Triagely deployment
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The shared session store
    session: SessionStore,
}

impl ReportsClient {
    /// Create a new ReportsClient
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api/reports{}", self.url, path)
    }

    /// List reports with pagination and optional filters.
    ///
    /// Results are scoped server-side to the caller's tenant unless they are
    /// a super admin.
    pub async fn list(&self, filter: &ReportFilter) -> Result<ReportPage, Error> {
        let url = self.get_url("");

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .query(filter.to_query())
            .execute::<ReportPage>()
            .await
    }

    /// Get a single report by ID
    pub async fn get(&self, id: i64) -> Result<BugReport, Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<BugReport>()
            .await
    }

    /// Update a report's description and labels, returning the updated report
    pub async fn update(&self, id: i64, update: &ReportUpdate) -> Result<BugReport, Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::put(&self.client, &url)
            .with_session(&self.session)
            .json(update)?
            .execute::<BugReport>()
            .await
    }

    /// Update a report's triage state (status, sync flag, external ticket)
    pub async fn update_status(&self, id: i64, update: &StatusUpdate) -> Result<BugReport, Error> {
        let url = self.get_url(&format!("/{}/status", id));

        Fetch::put(&self.client, &url)
            .with_session(&self.session)
            .json(update)?
            .execute::<BugReport>()
            .await
    }

    /// Delete a report permanently
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::delete(&self.client, &url)
            .with_session(&self.session)
            .execute_raw()
            .await?;

        Ok(())
    }

    /// Download the recorded session video for a report
    pub async fn video(&self, id: i64) -> Result<Vec<u8>, Error> {
        let url = self.get_url(&format!("/{}/video", id));

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute_bytes()
            .await
    }

    /// Dashboard statistics, scoped to the caller's tenant like `list`
    pub async fn stats(&self) -> Result<DashboardStats, Error> {
        let url = self.get_url("/stats");

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<DashboardStats>()
            .await
    }
}
