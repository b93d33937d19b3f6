//! Terraform provider for Compose deployments.
//!
//! Serves the `compose_whitelist` resource. Writes to the Compose API are
//! only reported as done once the whitelist listing reflects them; see
//! [`reconcile`].

pub mod api;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod provider_data;
pub mod reconcile;
pub mod resources;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{ProviderError, Result};
pub use logging::init_logging;
pub use provider_data::ComposeProviderData;
pub use reconcile::{Expect, PollState, ReconcileError, WaitConfig};
pub use resources::{ComposeResource, WhitelistResource};

use serde::Deserialize;
use std::time::Duration;

pub const ENV_API_TOKEN: &str = "COMPOSE_API_TOKEN";
pub const ENV_API_ENDPOINT: &str = "COMPOSE_API_ENDPOINT";

/// Upper bound for each whitelist wait setting
pub const MAX_WAIT_SECS: u64 = 24 * 60 * 60;

/// Provider block as supplied by the host
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
    pub whitelist_timeout_secs: Option<u64>,
    pub whitelist_delay_secs: Option<u64>,
    pub whitelist_min_interval_secs: Option<u64>,
}

impl ProviderConfig {
    fn wait_config(&self) -> std::result::Result<WaitConfig, String> {
        let defaults = WaitConfig::default();
        let wait = WaitConfig {
            timeout: self
                .whitelist_timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            delay: self
                .whitelist_delay_secs
                .map_or(defaults.delay, Duration::from_secs),
            min_interval: self
                .whitelist_min_interval_secs
                .map_or(defaults.min_interval, Duration::from_secs),
        };

        if wait.timeout.is_zero() {
            return Err("whitelist_timeout_secs must be greater than zero".to_string());
        }
        if wait.min_interval.is_zero() {
            return Err("whitelist_min_interval_secs must be greater than zero".to_string());
        }

        let limit = Duration::from_secs(MAX_WAIT_SECS);
        for (name, value) in [
            ("whitelist_timeout_secs", wait.timeout),
            ("whitelist_delay_secs", wait.delay),
            ("whitelist_min_interval_secs", wait.min_interval),
        ] {
            if value > limit {
                return Err(format!(
                    "{} must be at most {}s ({}s given)",
                    name,
                    MAX_WAIT_SECS,
                    value.as_secs()
                ));
            }
        }
        Ok(wait)
    }
}

#[derive(Default)]
pub struct ComposeProvider {
    provider_data: Option<ComposeProviderData>,
}

impl ComposeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.provider_data.is_some()
    }

    pub fn configure(&mut self, config: ProviderConfig) -> Diagnostics {
        let endpoint = config
            .endpoint
            .clone()
            .or_else(|| std::env::var(ENV_API_ENDPOINT).ok())
            .unwrap_or_else(|| api::DEFAULT_ENDPOINT.to_string());

        let api_token = config
            .api_token
            .clone()
            .or_else(|| std::env::var(ENV_API_TOKEN).ok())
            .filter(|token| !token.is_empty());

        let mut diags = Diagnostics::new();

        let wait = match config.wait_config() {
            Ok(wait) => wait,
            Err(e) => {
                diags.add_error("Invalid whitelist wait settings", e);
                return diags;
            }
        };

        if wait.delay > wait.timeout {
            diags.push(
                Diagnostic::warning(
                    "Whitelist delay exceeds timeout",
                    format!(
                        "whitelist_delay_secs ({}s) is longer than whitelist_timeout_secs ({}s); \
                         only one poll will run, at the timeout",
                        wait.delay.as_secs(),
                        wait.timeout.as_secs()
                    ),
                )
                .with_attribute("whitelist_delay_secs"),
            );
        }

        match api_token {
            Some(api_token) => match api::Client::new(&endpoint, &api_token) {
                Ok(client) => {
                    tracing::debug!("Configured Compose client for {}", client.base_url());
                    self.provider_data = Some(ComposeProviderData::new(client, wait));
                }
                Err(e) => {
                    diags.add_error("Failed to create API client", e.to_string());
                }
            },
            None => {
                diags.add_error(
                    "api_token is required",
                    format!(
                        "set api_token in the provider config or the {} env var",
                        ENV_API_TOKEN
                    ),
                );
            }
        }

        diags
    }

    pub fn resource_types(&self) -> &'static [&'static str] {
        resources::RESOURCE_TYPES
    }

    pub fn create_resource(&self, name: &str) -> Result<ComposeResource> {
        let provider_data = self
            .provider_data
            .as_ref()
            .ok_or(ProviderError::ProviderNotConfigured)?
            .clone();

        match name {
            resources::whitelist::TYPE_NAME => Ok(ComposeResource::Whitelist(
                WhitelistResource::new(provider_data),
            )),
            _ => Err(ProviderError::ResourceNotFound(name.to_string())),
        }
    }
}
