//! Resource implementations

pub mod whitelist;

pub use whitelist::WhitelistResource;

/// Resources served by the provider, keyed by type name
pub enum ComposeResource {
    Whitelist(WhitelistResource),
}

impl ComposeResource {
    pub fn type_name(&self) -> &str {
        match self {
            ComposeResource::Whitelist(r) => r.type_name(),
        }
    }
}

/// Type names of every resource the provider can create
pub const RESOURCE_TYPES: &[&str] = &[whitelist::TYPE_NAME];
