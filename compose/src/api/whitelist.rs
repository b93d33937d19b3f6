//! Deployment whitelist API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::common::{path_segment, Embedded};
use super::{ApiError, Client};

/// A whitelist entry as reported by `GET /deployments/{id}/whitelist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub id: String,
    pub ip: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct WhitelistList {
    #[serde(default)]
    whitelist: Vec<WhitelistEntry>,
}

/// Request body for `POST /deployments/{id}/whitelist`
#[derive(Debug, Serialize)]
pub struct AddWhitelistRequest {
    pub deployment: AddWhitelistDeployment,
}

#[derive(Debug, Serialize)]
pub struct AddWhitelistDeployment {
    pub whitelist: NewWhitelistEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWhitelistEntry {
    pub ip: String,
    pub description: String,
}

impl AddWhitelistRequest {
    pub fn new(ip: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            deployment: AddWhitelistDeployment {
                whitelist: NewWhitelistEntry {
                    ip: ip.into(),
                    description: description.into(),
                },
            },
        }
    }
}

/// Compose acknowledges writes with a recipe describing the queued job.
/// The recipe says nothing about when the read path will reflect the write.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_detail: Option<String>,
    #[serde(default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn collection_path(deployment_id: &str) -> String {
    format!("/deployments/{}/whitelist", path_segment(deployment_id))
}

/// Whitelist API for a client
pub struct WhitelistApi<'a> {
    client: &'a Client,
}

impl<'a> WhitelistApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /deployments/{deployment_id}/whitelist
    pub async fn list(&self, deployment_id: &str) -> Result<Vec<WhitelistEntry>, ApiError> {
        let response: Embedded<WhitelistList> =
            self.client.get(&collection_path(deployment_id)).await?;
        Ok(response.embedded.whitelist)
    }

    /// POST /deployments/{deployment_id}/whitelist
    pub async fn add(
        &self,
        deployment_id: &str,
        request: &AddWhitelistRequest,
    ) -> Result<Recipe, ApiError> {
        self.client
            .post(&collection_path(deployment_id), request)
            .await
    }

    /// DELETE /deployments/{deployment_id}/whitelist/{whitelist_id}
    pub async fn delete(&self, deployment_id: &str, whitelist_id: &str) -> Result<Recipe, ApiError> {
        let path = format!(
            "{}/{}",
            collection_path(deployment_id),
            path_segment(whitelist_id)
        );
        self.client.delete(&path).await
    }
}

/// Read side of the whitelist: everything the reconciler needs.
#[async_trait]
pub trait WhitelistSource: Send + Sync {
    async fn list_whitelist(&self, deployment_id: &str) -> Result<Vec<WhitelistEntry>, ApiError>;
}

#[async_trait]
impl WhitelistSource for Client {
    async fn list_whitelist(&self, deployment_id: &str) -> Result<Vec<WhitelistEntry>, ApiError> {
        self.whitelist().list(deployment_id).await
    }
}
