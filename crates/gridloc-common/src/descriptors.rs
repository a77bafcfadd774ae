//! Deployment-descriptor forms of adapters and replica groups.
//!
//! Descriptors are validated and applied by the admin facade; the registry
//! receives them as-is. Numeric fields (`priority`, `n_replicas`) are
//! carried as strings because descriptor attributes arrive untyped; the
//! registry parses and normalizes them at registration time.

use serde::{Deserialize, Serialize};

/// Descriptor for a single server-hosted adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDescriptor {
    pub id: String,
    /// Replica group the adapter joins; empty when the adapter stands alone.
    #[serde(default)]
    pub replica_group_id: String,
    /// Decimal priority used by ordered balancing, read as a leading
    /// integer. Values with no leading integer are read as 0.
    #[serde(default)]
    pub priority: String,
}

impl AdapterDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        AdapterDescriptor {
            id: id.into(),
            replica_group_id: String::new(),
            priority: String::new(),
        }
    }

    pub fn with_replica_group(mut self, group_id: impl Into<String>) -> Self {
        self.replica_group_id = group_id.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }
}

/// Descriptor for a replica group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaGroupDescriptor {
    pub id: String,
    pub load_balancing: LoadBalancingSpec,
}

impl ReplicaGroupDescriptor {
    pub fn new(id: impl Into<String>, load_balancing: LoadBalancingSpec) -> Self {
        ReplicaGroupDescriptor {
            id: id.into(),
            load_balancing,
        }
    }
}

/// Strategy tag of a load-balancing specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadBalancingKind {
    Random,
    RoundRobin,
    Ordered,
    Adaptive,
}

/// Raw load-balancing specification as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancingSpec {
    pub kind: LoadBalancingKind,
    /// Number of replicas to report to the locator, as a decimal string.
    pub n_replicas: String,
    /// Load-sample window for adaptive balancing (`"1"`, `"5"` or `"15"`);
    /// ignored by the other kinds.
    #[serde(default)]
    pub load_sample: String,
}

impl LoadBalancingSpec {
    pub fn new(kind: LoadBalancingKind, n_replicas: impl Into<String>) -> Self {
        LoadBalancingSpec {
            kind,
            n_replicas: n_replicas.into(),
            load_sample: String::new(),
        }
    }

    pub fn with_load_sample(mut self, load_sample: impl Into<String>) -> Self {
        self.load_sample = load_sample.into();
        self
    }
}
