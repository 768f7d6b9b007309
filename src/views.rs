//! Client-side state for the admin console screens
//!
//! Each view holds its own cached copy of server data and reconciles it after
//! successful mutations. Nothing is shared between views except the session
//! store the sub-clients already carry.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::auth::UserRole;
use crate::error::Error;
use crate::reports::{
    BugReport, ReportFilter, ReportPage, ReportStatus, ReportUpdate, ReportsClient, StatusUpdate,
};

/// Monotonic sequence for in-flight requests.
///
/// Rapid repeated actions can complete out of order; a response is applied
/// only while its sequence is still the latest one begun, so stale responses
/// are dropped instead of clobbering newer state.
#[derive(Debug, Default)]
pub struct SeqGuard {
    latest: AtomicU64,
}

impl SeqGuard {
    /// Start a new request, superseding any earlier one
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a request begun with `seq` is still the latest
    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

/// The paginated report list screen
pub struct ReportList {
    /// The currently displayed reports
    pub reports: Vec<BugReport>,

    /// Total matching reports across all pages
    pub total: i64,

    /// The displayed page (1-based)
    pub page: u32,

    /// Page size used for every load
    pub page_size: u32,

    seq: SeqGuard,
}

impl ReportList {
    pub fn new(page_size: u32) -> Self {
        Self {
            reports: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            seq: SeqGuard::default(),
        }
    }

    /// Fetch a page, tagged with a fresh sequence number.
    ///
    /// The caller hands the result to [`apply`](Self::apply), which drops it
    /// if a newer load has begun in the meantime.
    pub async fn load_page(
        &self,
        client: &ReportsClient,
        page: u32,
    ) -> Result<(u64, ReportPage), Error> {
        let seq = self.seq.begin();
        let filter = ReportFilter::default()
            .with_page(page)
            .with_page_size(self.page_size);
        let result = client.list(&filter).await?;
        Ok((seq, result))
    }

    /// Apply a fetched page unless it has been superseded. Returns whether
    /// the page was applied.
    pub fn apply(&mut self, seq: u64, page: ReportPage) -> bool {
        if !self.seq.is_current(seq) {
            return false;
        }
        self.total = page.total;
        self.page = page.page;
        self.reports = page.reports;
        true
    }
}

/// The report detail screen: a locally cached report reconciled after each
/// successful mutation
#[derive(Default)]
pub struct ReportDetail {
    report: Option<BugReport>,
}

impl ReportDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached report; `None` renders the "not found" branch
    pub fn report(&self) -> Option<&BugReport> {
        self.report.as_ref()
    }

    /// Fetch the report once, on mount. A missing report leaves the view in
    /// its "not found" state rather than failing.
    pub async fn load(&mut self, client: &ReportsClient, id: i64) -> Result<(), Error> {
        match client.get(id).await {
            Ok(report) => {
                self.report = Some(report);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                self.report = None;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Change the status. On success the cached report's status field is
    /// patched in place without refetching; on failure the cache is
    /// unchanged.
    pub async fn set_status(
        &mut self,
        client: &ReportsClient,
        status: ReportStatus,
    ) -> Result<(), Error> {
        let id = self.require_id()?;
        client
            .update_status(id, &StatusUpdate::status(status))
            .await?;
        if let Some(report) = &mut self.report {
            report.status = status;
        }
        Ok(())
    }

    /// Save edited description and labels, replacing the cache with the
    /// server's updated report
    pub async fn save(
        &mut self,
        client: &ReportsClient,
        update: &ReportUpdate,
    ) -> Result<(), Error> {
        let id = self.require_id()?;
        let updated = client.update(id, update).await?;
        self.report = Some(updated);
        Ok(())
    }

    /// Delete the report. On success the view empties and the caller
    /// navigates away; on failure it stays as it was.
    pub async fn delete(&mut self, client: &ReportsClient) -> Result<(), Error> {
        let id = self.require_id()?;
        client.delete(id).await?;
        self.report = None;
        Ok(())
    }

    fn require_id(&self) -> Result<i64, Error> {
        self.report
            .as_ref()
            .map(|r| r.id)
            .ok_or_else(|| Error::general("no report loaded"))
    }
}

/// A navigation shell menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Dashboard,
    Reports,
    Tenants,
    Users,
    Integrations,
}

/// Build the role-gated navigation menu. Every role is handled explicitly.
pub fn menu_for(role: UserRole) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::Dashboard, MenuEntry::Reports];
    match role {
        UserRole::SuperAdmin => {
            entries.push(MenuEntry::Tenants);
            entries.push(MenuEntry::Users);
            entries.push(MenuEntry::Integrations);
        }
        UserRole::ClientAdmin => {
            entries.push(MenuEntry::Users);
            entries.push(MenuEntry::Integrations);
        }
        UserRole::ClientUser => {}
    }
    entries
}
