//! Third-party issue tracker integrations

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::SessionStore;
use crate::error::Error;
use crate::fetch::Fetch;

/// Supported issue trackers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationType {
    Jira,
    Clickup,
    Linear,
}

/// A configured tracker integration for a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    /// The integration ID
    pub id: i64,

    /// The tenant this integration belongs to
    pub tenant_id: i64,

    /// Which tracker this talks to
    pub integration_type: IntegrationType,

    /// Tracker-specific configuration
    #[serde(default)]
    pub config_json: serde_json::Value,

    /// Whether report syncing is enabled
    pub enabled: bool,

    /// The creation time
    pub created_at: String,
}

/// Payload for creating a new integration
#[derive(Debug, Clone, Serialize)]
pub struct NewIntegration {
    pub tenant_id: i64,
    pub integration_type: IntegrationType,
    pub config_json: serde_json::Value,
    pub enabled: bool,
}

/// Result of a connection test
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationTestResult {
    pub status: String,
    pub message: String,
}

impl IntegrationTestResult {
    /// Whether the connection test passed
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Client for the integration endpoints
pub struct IntegrationsClient {
    url: String,
    client: Client,
    session: SessionStore,
}

impl IntegrationsClient {
    /// Create a new IntegrationsClient
    pub(crate) fn new(url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api/integrations{}", self.url, path)
    }

    /// List integrations visible to the caller: all of them for a super
    /// admin, the caller's tenant otherwise
    pub async fn list(&self) -> Result<Vec<Integration>, Error> {
        let url = self.get_url("");

        Fetch::get(&self.client, &url)
            .with_session(&self.session)
            .execute::<Vec<Integration>>()
            .await
    }

    /// Create an integration for a tenant
    pub async fn create(&self, new: &NewIntegration) -> Result<Integration, Error> {
        let url = self.get_url("");

        Fetch::post(&self.client, &url)
            .with_session(&self.session)
            .json(new)?
            .execute::<Integration>()
            .await
    }

    /// Test an integration's connection to its tracker
    pub async fn test(&self, id: i64) -> Result<IntegrationTestResult, Error> {
        let url = self.get_url(&format!("/{}/test", id));

        Fetch::post(&self.client, &url)
            .with_session(&self.session)
            .execute::<IntegrationTestResult>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Session, User, UserRole};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn admin_store() -> SessionStore {
        let store = SessionStore::new(None);
        store
            .set(Session {
                access_token: "integration-token".to_string(),
                token_type: "bearer".to_string(),
                user: User {
                    id: 4,
                    email: "admin@acme.test".to_string(),
                    role: UserRole::ClientAdmin,
                    tenant_id: Some(2),
                    is_active: true,
                    created_at: "2025-01-01T00:00:00Z".to_string(),
                },
            })
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_integrations() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/integrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 1,
                "tenant_id": 2,
                "integration_type": "JIRA",
                "config_json": {"project_key": "BUG"},
                "enabled": true,
                "created_at": "2025-02-01T00:00:00Z"
            }])))
            .mount(&mock_server)
            .await;

        let integrations =
            IntegrationsClient::new(&mock_server.uri(), Client::new(), admin_store());
        let list = integrations.list().await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].integration_type, IntegrationType::Jira);
        assert_eq!(list[0].config_json["project_key"], "BUG");
    }

    #[tokio::test]
    async fn test_connection_test_ack() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/integrations/1/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "message": "JIRA connection test successful"
            })))
            .mount(&mock_server)
            .await;

        let integrations =
            IntegrationsClient::new(&mock_server.uri(), Client::new(), admin_store());
        let result = integrations.test(1).await.unwrap();

        assert!(result.is_success());
        assert!(result.message.contains("JIRA"));
    }

    #[tokio::test]
    async fn test_create_integration() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/integrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 8,
                "tenant_id": 2,
                "integration_type": "LINEAR",
                "config_json": {},
                "enabled": true,
                "created_at": "2025-07-01T00:00:00Z"
            })))
            .mount(&mock_server)
            .await;

        let integrations =
            IntegrationsClient::new(&mock_server.uri(), Client::new(), admin_store());
        let created = integrations
            .create(&NewIntegration {
                tenant_id: 2,
                integration_type: IntegrationType::Linear,
                config_json: serde_json::json!({}),
                enabled: true,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 8);
        assert_eq!(created.integration_type, IntegrationType::Linear);
    }
}
