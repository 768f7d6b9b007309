//! Tenant records and API keys (super admin surface)

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::SessionStore;
use crate::error::Error;
use crate::fetch::Fetch;

/// A client organization whose reports are isolated from other tenants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// The tenant ID
    pub id: i64,

    /// Display name
    pub name: String,

    /// Legal company name, if provided
    pub company_name: Option<String>,

    /// The ingestion API key, issued server-side at creation
    pub api_key: String,

    /// Whether the tenant is active
    pub is_active: bool,

    /// The creation time
    pub created_at: String,
}

/// Client for the tenant endpoints.
///
/// Tenants are created and read through this client but never updated or
/// deleted by the admin console.
pub struct TenantsClient {
    url: String,
    client: Client,
    session: SessionStore,
}

impl TenantsClient {
    /// Create a new TenantsClient
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api/tenants{}", self.url, path)
    }

    /// List all tenants. The server rejects anything but a super admin.
    pub async fn list(&self) -> Result<Vec<Tenant>, Error> {
        let url = self.get_url("");

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<Vec<Tenant>>()
            .await
    }

    /// Create a tenant. The API key is issued server-side.
    pub async fn create(&self, name: &str, company_name: Option<&str>) -> Result<Tenant, Error> {
        let url = self.get_url("");

        let body = json!({
            "name": name,
            "company_name": company_name,
        });

        Fetch::post(&self.client, &url)
            .with_session(&self.session)
            .json(&body)?
            .execute::<Tenant>()
            .await
    }

    /// Get a single tenant by ID
    pub async fn get(&self, id: i64) -> Result<Tenant, Error> {
        let url = self.get_url(&format!("/{}", id));

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<Tenant>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Session, User, UserRole};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn super_admin_store() -> SessionStore {
        let store = SessionStore::new(None);
        store
            .set(Session {
                access_token: "root-token".to_string(),
                token_type: "bearer".to_string(),
                user: User {
                    id: 1,
                    email: "root@triagely.test".to_string(),
                    role: UserRole::SuperAdmin,
                    tenant_id: None,
                    is_active: true,
                    created_at: "2024-11-01T00:00:00Z".to_string(),
                },
            })
            .unwrap();
        store
    }

    fn tenant_json(id: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "company_name": "Acme Corp",
            "api_key": "tk_live_abc123",
            "is_active": true,
            "created_at": "2025-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_tenants() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tenants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                tenant_json(1, "acme"),
                tenant_json(2, "globex"),
            ])))
            .mount(&mock_server)
            .await;

        let tenants = TenantsClient::new(&mock_server.uri(), Client::new(), super_admin_store());
        let list = tenants.list().await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "globex");
    }

    #[tokio::test]
    async fn test_create_tenant_receives_issued_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tenants"))
            .and(body_json(serde_json::json!({
                "name": "initech",
                "company_name": "Initech LLC"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3,
                "name": "initech",
                "company_name": "Initech LLC",
                "api_key": "tk_live_fresh",
                "is_active": true,
                "created_at": "2025-06-01T00:00:00Z"
            })))
            .mount(&mock_server)
            .await;

        let tenants = TenantsClient::new(&mock_server.uri(), Client::new(), super_admin_store());
        let tenant = tenants.create("initech", Some("Initech LLC")).await.unwrap();

        assert_eq!(tenant.id, 3);
        assert_eq!(tenant.api_key, "tk_live_fresh");
    }

    #[tokio::test]
    async fn test_non_admin_listing_is_an_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tenants"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"detail": "Insufficient permissions"})),
            )
            .mount(&mock_server)
            .await;

        let tenants = TenantsClient::new(&mock_server.uri(), Client::new(), super_admin_store());
        let err = tenants.list().await.unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Insufficient permissions");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
