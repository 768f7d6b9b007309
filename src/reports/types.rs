//! Wire types for bug reports

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Triage status of a bug report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

impl ReportStatus {
    /// Every status, in triage order
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::New,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Closed,
    ];

    /// The wire representation of this status
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::New => "NEW",
            ReportStatus::InProgress => "IN_PROGRESS",
            ReportStatus::Resolved => "RESOLVED",
            ReportStatus::Closed => "CLOSED",
        }
    }
}

/// A bug report as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugReport {
    /// The report ID
    pub id: i64,

    /// The tenant this report belongs to
    pub tenant_id: i64,

    /// Transcribed or user-entered description
    pub description: Option<String>,

    /// AI-assigned labels
    #[serde(default)]
    pub label: Vec<String>,

    /// Inferred user frustration, 0-100
    pub struggle_score: Option<f64>,

    /// Current triage status
    pub status: ReportStatus,

    /// Whether the report has been pushed to an external tracker
    pub synced_to_integration: bool,

    /// Ticket ID in the external tracker, once synced
    pub external_ticket_id: Option<String>,

    /// Free-form technical metadata, serialized as a JSON blob
    #[serde(default)]
    pub metadata_json: String,

    /// Captured DOM snapshot text
    #[serde(default)]
    pub dom_snapshot: String,

    /// Where the recorded session video lives, if one exists
    #[serde(default)]
    pub video_url: Option<String>,

    /// The creation time
    pub created_at: String,
}

impl BugReport {
    /// Parse the free-form technical metadata blob. An empty or malformed
    /// blob yields an empty map.
    pub fn metadata(&self) -> HashMap<String, serde_json::Value> {
        serde_json::from_str(&self.metadata_json).unwrap_or_default()
    }
}

/// One page of the report listing
#[derive(Debug, Clone, Deserialize)]
pub struct ReportPage {
    /// Total matching reports across all pages
    pub total: i64,

    /// The page number (1-based)
    pub page: u32,

    /// The requested page size
    pub page_size: u32,

    /// The reports on this page
    pub reports: Vec<BugReport>,
}

/// Editable report details
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Vec<String>>,
}

/// Triage state changes: status, sync flag, external ticket reference
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_to_integration: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ticket_id: Option<String>,
}

impl StatusUpdate {
    /// A plain status change
    pub fn status(status: ReportStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Dashboard statistics
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStats {
    pub total_reports: i64,
    pub active_tenants: i64,
    pub resolved_this_week: i64,
    pub avg_struggle_score: f64,
}

/// Filters for the report listing. Page numbering starts at 1.
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub page: u32,
    pub page_size: u32,
    pub status: Option<ReportStatus>,
    pub tenant_id: Option<i64>,
    pub search: Option<String>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            status: None,
            tenant_id: None,
            search: None,
        }
    }
}

impl ReportFilter {
    /// Set the page number (1-based)
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Filter by triage status
    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by tenant (super admin only; other roles are scoped server-side)
    pub fn with_tenant(mut self, tenant_id: i64) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Full-text search over description and metadata
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub(crate) fn to_query(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("page".to_string(), self.page.to_string());
        params.insert("page_size".to_string(), self.page_size.to_string());
        if let Some(status) = self.status {
            params.insert("status".to_string(), status.as_str().to_string());
        }
        if let Some(tenant_id) = self.tenant_id {
            params.insert("tenant_id".to_string(), tenant_id.to_string());
        }
        if let Some(search) = &self.search {
            params.insert("search".to_string(), search.clone());
        }
        params
    }
}
