//! Gridloc Shared Data Model
//!
//! This crate provides the data model shared between the gridloc registry
//! core and its administrative callers:
//!
//! - **Descriptors**: the deployment-descriptor form of adapters and replica
//!   groups, with numeric fields carried as strings the way descriptor files
//!   spell them ([`descriptors`])
//! - **Directory records**: proxies and per-adapter info reported back to
//!   locators and admin tooling ([`types`])
//! - **Errors**: the [`RegistryError`] enum and the crate-wide [`Result`]
//!   alias ([`error`])
//!
//! # Example
//!
//! ```
//! use gridloc_common::{AdapterDescriptor, LoadBalancingKind, LoadBalancingSpec};
//!
//! let adapter = AdapterDescriptor::new("Hello.Adapter")
//!     .with_replica_group("HelloGroup")
//!     .with_priority("10");
//!
//! let balancing = LoadBalancingSpec::new(LoadBalancingKind::Adaptive, "2")
//!     .with_load_sample("5");
//! # let _ = (adapter, balancing);
//! ```

pub mod descriptors;
pub mod error;
pub mod types;

pub use descriptors::{
    AdapterDescriptor, LoadBalancingKind, LoadBalancingSpec, ReplicaGroupDescriptor,
};
pub use error::{RegistryError, Result};
pub use types::{AdapterInfo, AdapterProxy, LoadSample};
