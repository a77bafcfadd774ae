//! Cache entry for a single server-hosted adapter.

use std::sync::Arc;

use gridloc_common::{AdapterInfo, AdapterProxy, LoadSample, RegistryError, Result};
use tracing::warn;

use crate::entry::ResolvedAdapters;
use crate::server::{ServerHandle, UNAVAILABLE_LOAD};

/// A single adapter hosted by one server.
///
/// Immutable after construction: the cache builds it from its descriptor
/// and only the hosting server's state changes underneath it. The server
/// handle is shared with the rest of the registry and outlives the entry.
pub struct ServerAdapterEntry {
    id: String,
    application: String,
    replica_group_id: Option<String>,
    priority: i32,
    server: Arc<dyn ServerHandle>,
}

impl std::fmt::Debug for ServerAdapterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerAdapterEntry")
            .field("id", &self.id)
            .field("application", &self.application)
            .field("replica_group_id", &self.replica_group_id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl ServerAdapterEntry {
    pub(crate) fn new(
        id: String,
        application: String,
        replica_group_id: Option<String>,
        priority: i32,
        server: Arc<dyn ServerHandle>,
    ) -> Self {
        ServerAdapterEntry {
            id,
            application,
            replica_group_id,
            priority,
            server,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Application the adapter was deployed by.
    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn replica_group_id(&self) -> Option<&str> {
        self.replica_group_id.as_deref()
    }

    /// Priority used by ordered balancing; lower is preferred.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Resolves this adapter alone: a single candidate, never reordered.
    ///
    /// A direct request for one adapter reports downstream failures instead
    /// of masking them, so any server error propagates unchanged.
    pub async fn get_proxies(&self) -> Result<ResolvedAdapters> {
        let proxy = self.get_proxy(None).await?;
        Ok(ResolvedAdapters {
            adapters: vec![(self.id.clone(), proxy)],
            n_replicas: 1,
            replica_group: false,
        })
    }

    /// Fetches the current direct proxy from the hosting server.
    ///
    /// When a replica group filter is given, the adapter must be a member
    /// of that group.
    pub async fn get_proxy(&self, replica_group_id: Option<&str>) -> Result<AdapterProxy> {
        if let Some(group_id) = replica_group_id {
            if self.replica_group_id.as_deref() != Some(group_id) {
                return Err(RegistryError::InvalidReplicaGroup(group_id.to_string()));
            }
        }
        self.server.get_adapter(&self.id, true).await
    }

    /// Samples the hosting node's load.
    ///
    /// Never fails: a sample that cannot be obtained is reported as
    /// [`UNAVAILABLE_LOAD`], which keeps load orderings total and sorts the
    /// member behind every reachable one.
    pub async fn get_least_loaded_node_load(&self, sample: LoadSample) -> f32 {
        match self.server.get_load(sample).await {
            Ok(load) => load,
            // Expected while an application update or node restart is in
            // flight.
            Err(err) if err.is_transient() => UNAVAILABLE_LOAD,
            Err(err) => {
                warn!(adapter = %self.id, error = %err, "unexpected error while sampling node load");
                UNAVAILABLE_LOAD
            }
        }
    }

    /// Best-effort directory record; the proxy field is left empty when the
    /// server cannot be reached.
    pub async fn get_adapter_info(&self) -> Vec<AdapterInfo> {
        vec![AdapterInfo {
            id: self.id.clone(),
            replica_group_id: self.replica_group_id.clone().unwrap_or_default(),
            proxy: self.get_proxy(None).await.ok(),
        }]
    }
}
