use thiserror::Error;

/// Errors surfaced by the registry core and its downstream collaborators.
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    /// Lookup of an id that is absent from the cache, or registered under
    /// the other entry variant.
    #[error("adapter `{0}` does not exist")]
    AdapterNotFound(String),

    #[error("adapter `{0}` already exists")]
    AdapterExists(String),

    /// A filtered proxy request named a replica group the adapter is not a
    /// member of.
    #[error("adapter is not a member of replica group `{0}`")]
    InvalidReplicaGroup(String),

    /// Illegal operation sequencing by the caller, e.g. registering a
    /// group member before the group itself.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("server `{0}` does not exist")]
    ServerNotExist(String),

    #[error("node `{0}` does not exist")]
    NodeNotExist(String),

    #[error("node `{0}` is unreachable")]
    NodeUnreachable(String),
}

impl RegistryError {
    /// Downstream failures that are recovered locally instead of surfaced:
    /// load sampling reports them as the sentinel load, replica-group
    /// resolution skips the affected member.
    ///
    /// These come up when an application is updated or a node restarts
    /// while a resolution is in flight.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RegistryError::ServerNotExist(_)
                | RegistryError::NodeNotExist(_)
                | RegistryError::NodeUnreachable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
