//! The process-wide adapter cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gridloc_common::{AdapterDescriptor, RegistryError, ReplicaGroupDescriptor, Result};
use tracing::debug;

use crate::entry::AdapterEntry;
use crate::policy::parse_leading_i32;
use crate::replica_group::ReplicaGroupEntry;
use crate::server::ServerHandle;
use crate::server_adapter::ServerAdapterEntry;

/// Authoritative map of adapter ids to cache entries.
///
/// One exclusive guard protects the whole map. Every operation is a short
/// insert, lookup or removal; no server is ever contacted while the guard
/// is held. When an operation also touches a replica group's own guard
/// (membership cross-linking), the cache guard is taken first — group
/// methods never take the cache guard, so the ordering cannot invert.
pub struct AdapterCache {
    entries: Mutex<HashMap<String, AdapterEntry>>,
}

impl AdapterCache {
    pub fn new() -> Self {
        AdapterCache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a single server-hosted adapter.
    ///
    /// When the descriptor names a replica group, the new entry joins that
    /// group atomically with its insertion. The group must already be
    /// registered — descriptor validation adds groups before their members,
    /// so an unknown group id is a caller bug, not a race.
    pub fn add_server_adapter(
        &self,
        desc: &AdapterDescriptor,
        server: Arc<dyn ServerHandle>,
        application: &str,
    ) -> Result<Arc<ServerAdapterEntry>> {
        let mut entries = self.entries.lock().unwrap();

        if entries.contains_key(&desc.id) {
            return Err(RegistryError::AdapterExists(desc.id.clone()));
        }

        // Resolve the group before inserting, so a failed registration
        // leaves nothing behind.
        let group = match desc.replica_group_id.as_str() {
            "" => None,
            group_id => match entries.get(group_id) {
                Some(AdapterEntry::ReplicaGroup(group)) => Some(group.clone()),
                _ => {
                    return Err(RegistryError::InvariantViolation(format!(
                        "adapter `{}` references unknown replica group `{}`",
                        desc.id, group_id
                    )))
                }
            },
        };

        let priority = parse_leading_i32(&desc.priority).unwrap_or(0);
        let replica_group_id =
            (!desc.replica_group_id.is_empty()).then(|| desc.replica_group_id.clone());

        let entry = Arc::new(ServerAdapterEntry::new(
            desc.id.clone(),
            application.to_string(),
            replica_group_id,
            priority,
            server,
        ));
        entries.insert(desc.id.clone(), AdapterEntry::Server(entry.clone()));
        if let Some(group) = group {
            group.add_replica(entry.clone());
        }

        debug!(adapter = %desc.id, "added adapter");
        Ok(entry)
    }

    /// Registers a replica group.
    pub fn add_replica_group(
        &self,
        desc: &ReplicaGroupDescriptor,
        application: &str,
    ) -> Result<Arc<ReplicaGroupEntry>> {
        let mut entries = self.entries.lock().unwrap();

        if entries.contains_key(&desc.id) {
            return Err(RegistryError::AdapterExists(desc.id.clone()));
        }

        let entry = Arc::new(ReplicaGroupEntry::new(
            desc.id.clone(),
            application.to_string(),
            &desc.load_balancing,
        ));
        entries.insert(desc.id.clone(), AdapterEntry::ReplicaGroup(entry.clone()));

        debug!(adapter = %desc.id, "added adapter");
        Ok(entry)
    }

    /// Looks up an entry of either variant.
    pub fn get(&self, id: &str) -> Result<AdapterEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::AdapterNotFound(id.to_string()))
    }

    /// Looks up a server adapter; a replica group registered under the same
    /// id counts as absent.
    pub fn get_server_adapter(&self, id: &str) -> Result<Arc<ServerAdapterEntry>> {
        match self.get(id)? {
            AdapterEntry::Server(entry) => Ok(entry),
            AdapterEntry::ReplicaGroup(_) => Err(RegistryError::AdapterNotFound(id.to_string())),
        }
    }

    /// Looks up a replica group; a server adapter registered under the same
    /// id counts as absent.
    pub fn get_replica_group(&self, id: &str) -> Result<Arc<ReplicaGroupEntry>> {
        match self.get(id)? {
            AdapterEntry::ReplicaGroup(entry) => Ok(entry),
            AdapterEntry::Server(_) => Err(RegistryError::AdapterNotFound(id.to_string())),
        }
    }

    /// Unregisters a server adapter and detaches it from its replica group.
    pub fn remove_server_adapter(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();

        let entry = match entries.get(id) {
            Some(AdapterEntry::Server(entry)) => entry.clone(),
            _ => return Err(RegistryError::AdapterNotFound(id.to_string())),
        };
        entries.remove(id);

        if let Some(group_id) = entry.replica_group_id() {
            // The group may have been removed before its members; in that
            // case there is nothing left to detach from.
            if let Some(AdapterEntry::ReplicaGroup(group)) = entries.get(group_id) {
                group.remove_replica(id);
            }
        }

        debug!(adapter = %id, "removed adapter");
        Ok(())
    }

    /// Unregisters a replica group.
    ///
    /// Member adapters stay registered and keep their group id; they are
    /// detached individually when they are removed themselves.
    pub fn remove_replica_group(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(id) {
            Some(AdapterEntry::ReplicaGroup(_)) => {
                entries.remove(id);
                debug!(adapter = %id, "removed adapter");
                Ok(())
            }
            _ => Err(RegistryError::AdapterNotFound(id.to_string())),
        }
    }

    /// Ids of every registered entry, for administrative listings. The
    /// order is unspecified.
    pub fn ids(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for AdapterCache {
    fn default() -> Self {
        AdapterCache::new()
    }
}
