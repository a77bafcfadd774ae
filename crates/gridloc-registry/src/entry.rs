//! The two entry variants of the adapter cache, under one dispatch type.

use std::sync::Arc;

use gridloc_common::{AdapterInfo, AdapterProxy, LoadSample, Result};

use crate::replica_group::ReplicaGroupEntry;
use crate::server_adapter::ServerAdapterEntry;

/// Ordered candidate set produced by one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAdapters {
    /// `(adapter id, proxy)` pairs in preference order. May be shorter than
    /// `n_replicas` when members were transiently unresolvable.
    pub adapters: Vec<(String, AdapterProxy)>,
    /// Number of candidates the locator should hand out per request. The
    /// resolver never truncates the list itself.
    pub n_replicas: i32,
    /// Whether the resolved id names a replica group.
    pub replica_group: bool,
}

/// An entry of the adapter cache: a single server-hosted adapter, or a
/// replica group aggregating several of them.
///
/// Shared fields (`id`, `application`) live on each variant; callers
/// dispatch by match, and the cache offers variant-specific lookups for the
/// sites that need one shape only.
#[derive(Debug, Clone)]
pub enum AdapterEntry {
    Server(Arc<ServerAdapterEntry>),
    ReplicaGroup(Arc<ReplicaGroupEntry>),
}

impl AdapterEntry {
    pub fn id(&self) -> &str {
        match self {
            AdapterEntry::Server(entry) => entry.id(),
            AdapterEntry::ReplicaGroup(entry) => entry.id(),
        }
    }

    pub fn application(&self) -> &str {
        match self {
            AdapterEntry::Server(entry) => entry.application(),
            AdapterEntry::ReplicaGroup(entry) => entry.application(),
        }
    }

    /// Whether the entry may be removed from the cache. Adapter entries are
    /// not pinned by anything, so removal is always allowed.
    pub fn can_remove(&self) -> bool {
        true
    }

    /// Resolves the entry into an ordered list of proxy candidates.
    pub async fn get_proxies(&self) -> Result<ResolvedAdapters> {
        match self {
            AdapterEntry::Server(entry) => entry.get_proxies().await,
            AdapterEntry::ReplicaGroup(entry) => entry.get_proxies().await,
        }
    }

    /// Best-effort directory records for the entry (one per member for a
    /// replica group).
    pub async fn get_adapter_info(&self) -> Vec<AdapterInfo> {
        match self {
            AdapterEntry::Server(entry) => entry.get_adapter_info().await,
            AdapterEntry::ReplicaGroup(entry) => entry.get_adapter_info().await,
        }
    }

    /// Least loaded hosting node over the given sample window.
    pub async fn get_least_loaded_node_load(&self, sample: LoadSample) -> f32 {
        match self {
            AdapterEntry::Server(entry) => entry.get_least_loaded_node_load(sample).await,
            AdapterEntry::ReplicaGroup(entry) => entry.get_least_loaded_node_load(sample).await,
        }
    }
}
