//! Provider data handed to resources when they are created

use crate::api::Client;
use crate::reconcile::WaitConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct ComposeProviderData {
    pub client: Arc<Client>,
    /// How long resources wait for writes to show up on the read path
    pub wait: WaitConfig,
}

impl ComposeProviderData {
    pub fn new(client: Client, wait: WaitConfig) -> Self {
        Self {
            client: Arc::new(client),
            wait,
        }
    }
}
