//! `compose_whitelist` resource
//!
//! Every attribute forces replacement, so there is no update: the host
//! deletes and recreates. Create and delete only report success once the
//! whitelist listing agrees with the write.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use thiserror::Error;

use crate::api::whitelist::AddWhitelistRequest;
use crate::api::{ApiError, Client, WhitelistEntry};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::provider_data::ComposeProviderData;
use crate::reconcile::{Expect, MatchKey, ReconcileError, WhitelistReconciler};

pub const TYPE_NAME: &str = "compose_whitelist";

/// User-supplied attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistConfig {
    pub deployment_id: String,
    pub ip: String,
    pub description: String,
}

/// Persisted state; `id` is assigned by Compose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistState {
    pub id: String,
    pub deployment_id: String,
    pub ip: String,
    pub description: String,
}

impl WhitelistState {
    fn from_entry(deployment_id: &str, entry: WhitelistEntry) -> Self {
        Self {
            id: entry.id,
            deployment_id: deployment_id.to_string(),
            ip: entry.ip,
            description: entry.description,
        }
    }
}

#[derive(Debug, Error)]
pub enum WhitelistError {
    #[error("Error adding whitelist entry: {0}")]
    Add(#[source] ApiError),

    #[error("Error deleting whitelist entry: {0}")]
    Delete(#[source] ApiError),

    #[error("Error querying whitelist entries: {0}")]
    Query(#[source] ApiError),

    #[error(transparent)]
    Confirm(#[from] ReconcileError<ApiError>),

    #[error("Failed to find newly created whitelist entry for {ip} on deployment {deployment_id}")]
    MissingAfterCreate { deployment_id: String, ip: String },

    #[error("Whitelist item not found: no entry for {ip} on deployment {deployment_id}")]
    NotFound { deployment_id: String, ip: String },

    #[error("Invalid import ID '{0}': expected '<deployment_id>@<ip>'")]
    InvalidImportId(String),
}

impl WhitelistError {
    fn summary(&self) -> &'static str {
        match self {
            WhitelistError::Add(_) => "Failed to create whitelist entry",
            WhitelistError::Delete(_) => "Failed to delete whitelist entry",
            WhitelistError::Query(_) => "Failed to read whitelist entries",
            WhitelistError::Confirm(e) if e.is_timeout() => {
                "Timed out waiting for whitelist change"
            }
            WhitelistError::Confirm(_) => "Failed to confirm whitelist change",
            WhitelistError::MissingAfterCreate { .. } => "Whitelist entry missing after create",
            WhitelistError::NotFound { .. } => "Whitelist entry not found",
            WhitelistError::InvalidImportId(_) => "Invalid import ID",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WhitelistError::NotFound { .. })
    }
}

impl From<&WhitelistError> for Diagnostic {
    fn from(err: &WhitelistError) -> Self {
        Diagnostic::error(err.summary(), err.to_string())
    }
}

pub struct ValidateWhitelistRequest {
    pub config: WhitelistConfig,
}

pub struct ValidateWhitelistResponse {
    pub diagnostics: Diagnostics,
}

pub struct CreateWhitelistRequest {
    pub config: WhitelistConfig,
}

pub struct CreateWhitelistResponse {
    pub new_state: Option<WhitelistState>,
    pub diagnostics: Diagnostics,
}

pub struct ReadWhitelistRequest {
    pub current_state: WhitelistState,
}

pub struct ReadWhitelistResponse {
    /// `None` when the entry no longer exists remotely
    pub new_state: Option<WhitelistState>,
    pub diagnostics: Diagnostics,
}

pub struct DeleteWhitelistRequest {
    pub prior_state: WhitelistState,
}

pub struct DeleteWhitelistResponse {
    pub diagnostics: Diagnostics,
}

pub struct ImportWhitelistRequest {
    /// `<deployment_id>@<ip>`
    pub id: String,
}

pub struct ImportWhitelistResponse {
    pub imported: Vec<WhitelistState>,
    pub diagnostics: Diagnostics,
}

#[derive(Clone)]
pub struct WhitelistResource {
    provider_data: ComposeProviderData,
}

impl WhitelistResource {
    pub fn new(provider_data: ComposeProviderData) -> Self {
        Self { provider_data }
    }

    pub fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn client(&self) -> &Client {
        &self.provider_data.client
    }

    fn reconciler(&self) -> WhitelistReconciler<'_, Client> {
        WhitelistReconciler::new(self.client(), self.provider_data.wait.clone())
    }

    pub async fn validate(&self, request: ValidateWhitelistRequest) -> ValidateWhitelistResponse {
        ValidateWhitelistResponse {
            diagnostics: validate_config(&request.config),
        }
    }

    pub async fn create(&self, request: CreateWhitelistRequest) -> CreateWhitelistResponse {
        let mut diagnostics = validate_config(&request.config);
        if diagnostics.has_errors() {
            return CreateWhitelistResponse {
                new_state: None,
                diagnostics,
            };
        }

        match self.create_entry(&request.config).await {
            Ok(state) => CreateWhitelistResponse {
                new_state: Some(state),
                diagnostics,
            },
            Err(e) => {
                diagnostics.push(Diagnostic::from(&e));
                CreateWhitelistResponse {
                    new_state: None,
                    diagnostics,
                }
            }
        }
    }

    pub async fn read(&self, request: ReadWhitelistRequest) -> ReadWhitelistResponse {
        let mut diagnostics = Diagnostics::new();
        let state = &request.current_state;
        let result = self.read_entry(&state.deployment_id, &state.id).await;

        match result {
            Ok(Some(new_state)) => ReadWhitelistResponse {
                new_state: Some(new_state),
                diagnostics,
            },
            Ok(None) => {
                tracing::info!(
                    "Whitelist entry {} is gone from deployment {}, removing from state",
                    state.id,
                    state.deployment_id
                );
                ReadWhitelistResponse {
                    new_state: None,
                    diagnostics,
                }
            }
            Err(WhitelistError::Query(e)) if e.is_not_found() => {
                tracing::info!(
                    "Deployment {} no longer exists, removing whitelist entry {} from state",
                    state.deployment_id,
                    state.id
                );
                ReadWhitelistResponse {
                    new_state: None,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::from(&e));
                ReadWhitelistResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                }
            }
        }
    }

    pub async fn delete(&self, request: DeleteWhitelistRequest) -> DeleteWhitelistResponse {
        let mut diagnostics = Diagnostics::new();

        if let Err(e) = self.delete_entry(&request.prior_state).await {
            diagnostics.push(Diagnostic::from(&e));
        }

        DeleteWhitelistResponse { diagnostics }
    }

    pub async fn import_state(&self, request: ImportWhitelistRequest) -> ImportWhitelistResponse {
        let mut diagnostics = Diagnostics::new();

        match self.import_entry(&request.id).await {
            Ok(state) => ImportWhitelistResponse {
                imported: vec![state],
                diagnostics,
            },
            Err(e) => {
                if e.is_not_found() {
                    tracing::warn!("Import ID {} matched no whitelist entry", request.id);
                }
                diagnostics.push(Diagnostic::from(&e));
                ImportWhitelistResponse {
                    imported: vec![],
                    diagnostics,
                }
            }
        }
    }

    async fn create_entry(&self, config: &WhitelistConfig) -> Result<WhitelistState, WhitelistError> {
        let recipe = self
            .client()
            .whitelist()
            .add(
                &config.deployment_id,
                &AddWhitelistRequest::new(&config.ip, &config.description),
            )
            .await
            .map_err(WhitelistError::Add)?;

        tracing::info!(
            "Whitelist add for {} on deployment {} accepted (recipe {}, status {:?})",
            config.ip,
            config.deployment_id,
            recipe.id,
            recipe.status
        );

        let missing = || WhitelistError::MissingAfterCreate {
            deployment_id: config.deployment_id.clone(),
            ip: config.ip.clone(),
        };

        let entry = self
            .reconciler()
            .wait_for(&config.deployment_id, MatchKey::Ip(&config.ip), Expect::Present)
            .await?
            .ok_or_else(missing)?;

        tracing::info!(
            "Whitelist entry {} for {} visible on deployment {}",
            entry.id,
            entry.ip,
            config.deployment_id
        );

        self.read_entry(&config.deployment_id, &entry.id)
            .await?
            .ok_or_else(missing)
    }

    async fn read_entry(
        &self,
        deployment_id: &str,
        id: &str,
    ) -> Result<Option<WhitelistState>, WhitelistError> {
        let entries = self
            .client()
            .whitelist()
            .list(deployment_id)
            .await
            .map_err(WhitelistError::Query)?;

        Ok(entries
            .into_iter()
            .find(|entry| entry.id == id)
            .map(|entry| WhitelistState::from_entry(deployment_id, entry)))
    }

    async fn delete_entry(&self, state: &WhitelistState) -> Result<(), WhitelistError> {
        match self
            .client()
            .whitelist()
            .delete(&state.deployment_id, &state.id)
            .await
        {
            Ok(recipe) => {
                tracing::info!(
                    "Whitelist delete of {} on deployment {} accepted (recipe {}, status {:?})",
                    state.id,
                    state.deployment_id,
                    recipe.id,
                    recipe.status
                );
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(
                    "Whitelist entry {} already absent from deployment {}",
                    state.id,
                    state.deployment_id
                );
                return Ok(());
            }
            Err(e) => return Err(WhitelistError::Delete(e)),
        }

        self.reconciler()
            .wait_for(&state.deployment_id, MatchKey::Id(&state.id), Expect::Absent)
            .await?;

        Ok(())
    }

    async fn import_entry(&self, import_id: &str) -> Result<WhitelistState, WhitelistError> {
        let (deployment_id, ip) = parse_import_id(import_id)?;
        tracing::debug!("Importing whitelist entry {} on deployment {}", ip, deployment_id);

        let entries = self
            .client()
            .whitelist()
            .list(deployment_id)
            .await
            .map_err(WhitelistError::Query)?;

        entries
            .into_iter()
            .find(|entry| entry.ip == ip)
            .map(|entry| WhitelistState::from_entry(deployment_id, entry))
            .ok_or_else(|| WhitelistError::NotFound {
                deployment_id: deployment_id.to_string(),
                ip: ip.to_string(),
            })
    }
}

/// Split `<deployment_id>@<ip>` into its parts.
pub fn parse_import_id(id: &str) -> Result<(&str, &str), WhitelistError> {
    match id.split_once('@') {
        Some((deployment_id, ip)) if !deployment_id.is_empty() && !ip.is_empty() => {
            Ok((deployment_id, ip))
        }
        _ => Err(WhitelistError::InvalidImportId(id.to_string())),
    }
}

/// Parse an `address/prefix` network. The address may be IPv4 or IPv6; the
/// prefix must fit the address family.
pub fn parse_cidr(value: &str) -> Result<(IpAddr, u8), String> {
    let (addr, prefix) = value
        .split_once('/')
        .ok_or_else(|| format!("invalid CIDR address: {}", value))?;

    let addr: IpAddr = addr
        .parse()
        .map_err(|_| format!("invalid CIDR address: {}", value))?;

    let max = if addr.is_ipv4() { 32 } else { 128 };
    let prefix: u8 = match prefix.parse() {
        Ok(p) if p <= max && !prefix.starts_with('+') => p,
        _ => return Err(format!("invalid CIDR address: {}", value)),
    };

    Ok((addr, prefix))
}

pub fn validate_config(config: &WhitelistConfig) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if let Err(e) = parse_cidr(&config.ip) {
        diagnostics.push(
            Diagnostic::error(
                "Invalid network",
                format!("Provided value '{}' is not a valid network: {}", config.ip, e),
            )
            .with_attribute("ip"),
        );
    }

    if config.deployment_id.trim().is_empty() {
        diagnostics.push(
            Diagnostic::error("Missing deployment_id", "deployment_id must not be empty")
                .with_attribute("deployment_id"),
        );
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::WaitConfig;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn quick_wait() -> WaitConfig {
        WaitConfig {
            timeout: Duration::from_secs(2),
            delay: Duration::ZERO,
            min_interval: Duration::from_millis(20),
        }
    }

    fn resource_for(url: &str) -> WhitelistResource {
        let client = Client::new(url, "test-token").unwrap();
        WhitelistResource::new(ComposeProviderData::new(client, quick_wait()))
    }

    fn config(ip: &str) -> WhitelistConfig {
        WhitelistConfig {
            deployment_id: "d1".to_string(),
            ip: ip.to_string(),
            description: "office".to_string(),
        }
    }

    const LISTING: &str = r#"{"_embedded":{"whitelist":[
        {"id":"abc123","ip":"10.0.0.0/24","description":"office"},
        {"id":"def456","ip":"192.168.1.1/32","description":"vpn"}
    ]}}"#;

    const EMPTY_LISTING: &str = r#"{"_embedded":{"whitelist":[]}}"#;

    #[test]
    fn parse_cidr_accepts_networks() {
        assert!(parse_cidr("10.0.0.0/24").is_ok());
        assert!(parse_cidr("0.0.0.0/0").is_ok());
        assert!(parse_cidr("192.168.1.1/32").is_ok());
        assert!(parse_cidr("2001:db8::/32").is_ok());
    }

    #[test]
    fn parse_cidr_rejects_malformed_values() {
        assert!(parse_cidr("10.0.0.0").is_err());
        assert!(parse_cidr("10.0.0.0/33").is_err());
        assert!(parse_cidr("10.0.0/24").is_err());
        assert!(parse_cidr("10.0.0.0/+8").is_err());
        assert!(parse_cidr("2001:db8::/129").is_err());
        assert!(parse_cidr("office/24").is_err());
    }

    #[test]
    fn validate_flags_invalid_ip_on_attribute() {
        let diags = validate_config(&config("not-a-network"));
        assert!(diags.has_errors());
        assert_eq!(diags.errors[0].attribute.as_deref(), Some("ip"));
        assert!(diags.errors[0].detail.contains("not-a-network"));

        assert!(!validate_config(&config("10.0.0.0/24")).has_errors());
    }

    #[test]
    fn validate_requires_deployment() {
        let mut cfg = config("10.0.0.0/24");
        cfg.deployment_id = " ".to_string();
        let diags = validate_config(&cfg);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].attribute.as_deref(), Some("deployment_id"));
    }

    #[test]
    fn import_id_splits_on_first_at() {
        assert_eq!(
            parse_import_id("d1@10.0.0.0/24").unwrap(),
            ("d1", "10.0.0.0/24")
        );
        assert!(matches!(
            parse_import_id("d1"),
            Err(WhitelistError::InvalidImportId(_))
        ));
        assert!(parse_import_id("@10.0.0.0/24").is_err());
        assert!(parse_import_id("d1@").is_err());
    }

    #[tokio::test]
    async fn validate_entry_point_reports_config_problems() {
        let resource = resource_for("http://127.0.0.1:1");
        let response = resource
            .validate(ValidateWhitelistRequest {
                config: config("10.0.0.0/24"),
            })
            .await;
        assert!(response.diagnostics.is_empty());

        let response = resource
            .validate(ValidateWhitelistRequest {
                config: config("10.0.0.0/40"),
            })
            .await;
        assert!(response.diagnostics.has_errors());
    }

    #[tokio::test]
    async fn create_waits_for_entry_and_returns_state() {
        let mut server = Server::new_async().await;
        let add = server
            .mock("POST", "/deployments/d1/whitelist")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "deployment": {"whitelist": {"ip": "10.0.0.0/24"}}
            })))
            .with_status(202)
            .with_body(r#"{"id":"recipe-1","status":"running"}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(LISTING)
            .expect_at_least(2)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .create(CreateWhitelistRequest {
                config: config("10.0.0.0/24"),
            })
            .await;

        assert!(response.diagnostics.is_empty());
        assert_eq!(
            response.new_state,
            Some(WhitelistState {
                id: "abc123".to_string(),
                deployment_id: "d1".to_string(),
                ip: "10.0.0.0/24".to_string(),
                description: "office".to_string(),
            })
        );

        add.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn create_skips_api_when_config_is_invalid() {
        let mut server = Server::new_async().await;
        let add = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .create(CreateWhitelistRequest {
                config: config("10.0.0.0"),
            })
            .await;

        assert!(response.new_state.is_none());
        assert!(response.diagnostics.has_errors());
        add.assert_async().await;
    }

    #[tokio::test]
    async fn create_reports_write_failure_without_polling() {
        let mut server = Server::new_async().await;
        let _add = server
            .mock("POST", "/deployments/d1/whitelist")
            .with_status(422)
            .with_body(r#"{"errors":{"ip":["already whitelisted"]}}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/deployments/d1/whitelist")
            .expect(0)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .create(CreateWhitelistRequest {
                config: config("10.0.0.0/24"),
            })
            .await;

        assert!(response.new_state.is_none());
        assert_eq!(
            response.diagnostics.errors[0].summary,
            "Failed to create whitelist entry"
        );
        list.assert_async().await;
    }

    #[tokio::test]
    async fn create_times_out_when_entry_never_shows_up() {
        let mut server = Server::new_async().await;
        let _add = server
            .mock("POST", "/deployments/d1/whitelist")
            .with_status(202)
            .with_body(r#"{"id":"recipe-1"}"#)
            .create_async()
            .await;
        let _list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(EMPTY_LISTING)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "test-token").unwrap();
        let wait = WaitConfig {
            timeout: Duration::from_millis(200),
            delay: Duration::ZERO,
            min_interval: Duration::from_millis(50),
        };
        let resource = WhitelistResource::new(ComposeProviderData::new(client, wait));

        let response = resource
            .create(CreateWhitelistRequest {
                config: config("10.0.0.0/24"),
            })
            .await;

        assert!(response.new_state.is_none());
        let diag = &response.diagnostics.errors[0];
        assert_eq!(diag.summary, "Timed out waiting for whitelist change");
        assert!(diag.detail.contains("timeout while waiting"));
    }

    #[tokio::test]
    async fn read_refreshes_state_from_listing() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(
                r#"{"_embedded":{"whitelist":[
                    {"id":"abc123","ip":"10.0.0.0/24","description":"renamed"}
                ]}}"#,
            )
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .read(ReadWhitelistRequest {
                current_state: WhitelistState {
                    id: "abc123".to_string(),
                    deployment_id: "d1".to_string(),
                    ip: "10.0.0.0/24".to_string(),
                    description: "office".to_string(),
                },
            })
            .await;

        assert!(response.diagnostics.is_empty());
        assert_eq!(response.new_state.unwrap().description, "renamed");
    }

    #[tokio::test]
    async fn read_drops_state_when_entry_is_gone() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(LISTING)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .read(ReadWhitelistRequest {
                current_state: WhitelistState {
                    id: "gone999".to_string(),
                    deployment_id: "d1".to_string(),
                    ip: "10.9.9.0/24".to_string(),
                    description: "old".to_string(),
                },
            })
            .await;

        assert!(response.diagnostics.is_empty());
        assert!(response.new_state.is_none());
    }

    #[tokio::test]
    async fn read_keeps_state_on_query_failure() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_status(400)
            .with_body(r#"{"errors":"bad request"}"#)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let state = WhitelistState {
            id: "abc123".to_string(),
            deployment_id: "d1".to_string(),
            ip: "10.0.0.0/24".to_string(),
            description: "office".to_string(),
        };
        let response = resource
            .read(ReadWhitelistRequest {
                current_state: state.clone(),
            })
            .await;

        assert!(response.diagnostics.has_errors());
        assert_eq!(response.new_state, Some(state));
    }

    #[tokio::test]
    async fn delete_waits_until_id_is_absent() {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", "/deployments/d1/whitelist/abc123")
            .with_status(202)
            .with_body(r#"{"id":"recipe-2","status":"running"}"#)
            .create_async()
            .await;
        // IP reused by a different entry; only the id matters.
        let list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(
                r#"{"_embedded":{"whitelist":[
                    {"id":"new456","ip":"10.0.0.0/24","description":"office"}
                ]}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .delete(DeleteWhitelistRequest {
                prior_state: WhitelistState {
                    id: "abc123".to_string(),
                    deployment_id: "d1".to_string(),
                    ip: "10.0.0.0/24".to_string(),
                    description: "office".to_string(),
                },
            })
            .await;

        assert!(response.diagnostics.is_empty());
        delete.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn delete_of_missing_entry_succeeds() {
        let mut server = Server::new_async().await;
        let _delete = server
            .mock("DELETE", "/deployments/d1/whitelist/abc123")
            .with_status(404)
            .with_body(r#"{"errors":"not found"}"#)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .delete(DeleteWhitelistRequest {
                prior_state: WhitelistState {
                    id: "abc123".to_string(),
                    deployment_id: "d1".to_string(),
                    ip: "10.0.0.0/24".to_string(),
                    description: "office".to_string(),
                },
            })
            .await;

        assert!(response.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn import_populates_state_from_matching_ip() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(LISTING)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let response = resource
            .import_state(ImportWhitelistRequest {
                id: "d1@10.0.0.0/24".to_string(),
            })
            .await;

        assert!(response.diagnostics.is_empty());
        assert_eq!(
            response.imported,
            vec![WhitelistState {
                id: "abc123".to_string(),
                deployment_id: "d1".to_string(),
                ip: "10.0.0.0/24".to_string(),
                description: "office".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn import_reports_not_found() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/deployments/d1/whitelist")
            .with_body(EMPTY_LISTING)
            .create_async()
            .await;

        let resource = resource_for(&server.url());
        let err = resource.import_entry("d1@10.0.0.0/24").await.unwrap_err();
        assert!(err.is_not_found());

        let response = resource
            .import_state(ImportWhitelistRequest {
                id: "d1@10.0.0.0/24".to_string(),
            })
            .await;
        assert!(response.imported.is_empty());
        assert_eq!(
            response.diagnostics.errors[0].summary,
            "Whitelist entry not found"
        );
    }
}
