//! Cache entry for a replica group.

use std::sync::{Arc, Mutex};

use gridloc_common::{AdapterInfo, LoadBalancingSpec, LoadSample, RegistryError, Result};
use rand::seq::SliceRandom;

use crate::entry::ResolvedAdapters;
use crate::policy::{LoadBalancing, LoadBalancingPolicy};
use crate::server::UNAVAILABLE_LOAD;
use crate::server_adapter::ServerAdapterEntry;

/// Mutable state of a replica group, guarded as one unit.
#[derive(Debug)]
struct GroupState {
    load_balancing: LoadBalancing,
    /// Member entries, in registration order. References, not owners: each
    /// member also lives in the cache under its own id.
    replicas: Vec<Arc<ServerAdapterEntry>>,
    /// Starting offset of the next round-robin ordering. Kept below
    /// `replicas.len()` whenever the group is non-empty.
    cursor: usize,
}

/// A named collection of server adapters acting as interchangeable replicas
/// under a load-balancing policy.
///
/// The group's guard covers policy, membership and the round-robin cursor,
/// and is only ever held for brief snapshot operations: the resolution path
/// computes its candidate order under the guard, then releases it before
/// any server is contacted.
#[derive(Debug)]
pub struct ReplicaGroupEntry {
    id: String,
    application: String,
    state: Mutex<GroupState>,
}

impl ReplicaGroupEntry {
    pub(crate) fn new(id: String, application: String, spec: &LoadBalancingSpec) -> Self {
        ReplicaGroupEntry {
            id,
            application,
            state: Mutex::new(GroupState {
                load_balancing: LoadBalancing::from_spec(spec),
                replicas: Vec::new(),
                cursor: 0,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Application the group was deployed by.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Current load-balancing configuration.
    pub fn load_balancing(&self) -> LoadBalancing {
        self.state.lock().unwrap().load_balancing
    }

    /// Replaces the load-balancing configuration, re-normalizing the
    /// descriptor fields (replica count, adaptive sample window).
    pub fn update_policy(&self, spec: &LoadBalancingSpec) {
        self.state.lock().unwrap().load_balancing = LoadBalancing::from_spec(spec);
    }

    pub fn replica_count(&self) -> usize {
        self.state.lock().unwrap().replicas.len()
    }

    /// Adds a member. Called by the cache with the cache guard held; the
    /// cache guard is always taken before the group guard, never after.
    pub(crate) fn add_replica(&self, adapter: Arc<ServerAdapterEntry>) {
        self.state.lock().unwrap().replicas.push(adapter);
    }

    /// Removes a member by id and keeps the round-robin cursor in bounds.
    pub(crate) fn remove_replica(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        state.replicas.retain(|replica| replica.id() != id);
        state.cursor = if state.replicas.is_empty() {
            0
        } else {
            state.cursor % state.replicas.len()
        };
    }

    /// Resolves the group into an ordered list of proxy candidates.
    ///
    /// Runs in phases so no guard is held while a server is contacted:
    /// the candidate order is computed under the guard from the policy
    /// alone; adaptive load sampling and proxy retrieval happen after it is
    /// released.
    pub async fn get_proxies(&self) -> Result<ResolvedAdapters> {
        let (mut ordered, n_replicas, adaptive_sample) = {
            let mut state = self.state.lock().unwrap();

            if state.replicas.is_empty() {
                return Ok(ResolvedAdapters {
                    adapters: Vec::new(),
                    n_replicas: state.load_balancing.n_replicas,
                    replica_group: true,
                });
            }

            let len = state.replicas.len();
            let n_replicas = if state.load_balancing.n_replicas > 0 {
                state.load_balancing.n_replicas
            } else {
                len as i32
            };

            let mut adaptive_sample = None;
            let ordered: Vec<Arc<ServerAdapterEntry>> = match state.load_balancing.policy {
                LoadBalancingPolicy::RoundRobin => {
                    let start = state.cursor;
                    let rotated = (0..len)
                        .map(|i| state.replicas[(start + i) % len].clone())
                        .collect();
                    // One step per resolution, however many candidates the
                    // caller ends up consuming.
                    state.cursor = (start + 1) % len;
                    rotated
                }
                LoadBalancingPolicy::Random => {
                    let mut shuffled = state.replicas.clone();
                    shuffled.shuffle(&mut rand::thread_rng());
                    shuffled
                }
                LoadBalancingPolicy::Ordered => {
                    let mut sorted = state.replicas.clone();
                    sorted.sort_by_key(|replica| replica.priority());
                    sorted
                }
                LoadBalancingPolicy::Adaptive { sample } => {
                    // Shuffle first so equally loaded members tie-break at
                    // random once the loads come in.
                    let mut shuffled = state.replicas.clone();
                    shuffled.shuffle(&mut rand::thread_rng());
                    adaptive_sample = Some(sample);
                    shuffled
                }
            };

            (ordered, n_replicas, adaptive_sample)
        };

        if let Some(sample) = adaptive_sample {
            // Loads are not stable, so sample a snapshot and sort that.
            // Members whose sample cannot be obtained carry the sentinel
            // load and sort to the back.
            let mut by_load = Vec::with_capacity(ordered.len());
            for replica in ordered {
                let load = replica.get_least_loaded_node_load(sample).await;
                by_load.push((load, replica));
            }
            by_load.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
            ordered = by_load.into_iter().map(|(_, replica)| replica).collect();
        }

        // The adapter might not exist anymore at this point, or its node
        // might be unreachable; the group's job is to mask those members.
        let mut adapters = Vec::with_capacity(ordered.len());
        for replica in &ordered {
            match replica.get_proxy(Some(&self.id)).await {
                Ok(proxy) => adapters.push((replica.id().to_string(), proxy)),
                Err(RegistryError::AdapterNotFound(_))
                | Err(RegistryError::InvalidReplicaGroup(_))
                | Err(RegistryError::NodeUnreachable(_)) => {}
                Err(err) => return Err(err),
            }
        }

        Ok(ResolvedAdapters {
            adapters,
            n_replicas,
            replica_group: true,
        })
    }

    /// Load of the least loaded hosting node, or [`UNAVAILABLE_LOAD`] for
    /// an empty group.
    pub async fn get_least_loaded_node_load(&self, sample: LoadSample) -> f32 {
        let mut replicas = {
            let state = self.state.lock().unwrap();
            state.replicas.clone()
        };

        match replicas.len() {
            0 => UNAVAILABLE_LOAD,
            1 => replicas[0].get_least_loaded_node_load(sample).await,
            _ => {
                replicas.shuffle(&mut rand::thread_rng());
                let mut least = UNAVAILABLE_LOAD;
                for replica in &replicas {
                    least = least.min(replica.get_least_loaded_node_load(sample).await);
                }
                least
            }
        }
    }

    /// Best-effort directory records of every member.
    pub async fn get_adapter_info(&self) -> Vec<AdapterInfo> {
        let replicas = {
            let state = self.state.lock().unwrap();
            state.replicas.clone()
        };

        let mut infos = Vec::with_capacity(replicas.len());
        for replica in &replicas {
            infos.extend(replica.get_adapter_info().await);
        }
        infos
    }
}
