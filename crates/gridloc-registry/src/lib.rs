//! Gridloc Registry Core
//!
//! This crate provides the adapter cache and replica-group resolver of the
//! gridloc object-location service. The cache holds the authoritative
//! mapping from symbolic adapter ids to live server endpoints; locators
//! resolve ids against it while admin sessions register and unregister
//! entries concurrently.
//!
//! # Architecture
//!
//! The registry has no threads of its own — all work runs on caller tasks:
//!
//! 1. **Adapter cache**: one guarded id → entry map with insert, lookup and
//!    remove. Server-hosted adapters are cross-linked into their replica
//!    group atomically with registration.
//! 2. **Entries**: a single server-hosted adapter resolves through its
//!    server handle; a replica group orders its members by policy and
//!    resolves each of them, masking members that are transiently gone.
//! 3. **Load balancing**: random, round-robin, ordered (by per-adapter
//!    priority) and adaptive (by sampled node load) candidate orderings.
//!
//! # Key Design Decisions
//!
//! ## No guard across server calls
//!
//! Calls into the server layer are slow I/O. Every resolution snapshots
//! what it needs under a guard, releases it, and only then contacts
//! servers, so a hung node can never stall registration or other lookups.
//! Lock ordering is fixed (cache guard before group guard, never inverted).
//!
//! ## Failure masking is the group's job
//!
//! A replica group exists to hide partial failure: members whose adapter
//! moved away or whose node is unreachable are skipped during resolution,
//! and an unobtainable load sample is reported as [`UNAVAILABLE_LOAD`] so
//! adaptive ordering stays total and pushes those members to the back. A
//! standalone adapter does the opposite and reports its failures — a direct
//! resolution is the caller's request, not a pool to pick from.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gridloc_common::{AdapterDescriptor, LoadBalancingKind, LoadBalancingSpec,
//!     ReplicaGroupDescriptor};
//! use gridloc_registry::{AdapterCache, ServerHandle};
//!
//! # async fn example(server: Arc<dyn ServerHandle>) -> gridloc_common::Result<()> {
//! let cache = AdapterCache::new();
//!
//! let group = ReplicaGroupDescriptor::new(
//!     "HelloGroup",
//!     LoadBalancingSpec::new(LoadBalancingKind::RoundRobin, "0"),
//! );
//! cache.add_replica_group(&group, "HelloApp")?;
//!
//! let member = AdapterDescriptor::new("Hello.Adapter-1").with_replica_group("HelloGroup");
//! cache.add_server_adapter(&member, server, "HelloApp")?;
//!
//! let resolved = cache.get("HelloGroup")?.get_proxies().await?;
//! for (id, proxy) in resolved.adapters {
//!     println!("{id} -> {proxy:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod entry;
pub mod policy;
pub mod replica_group;
pub mod server;
pub mod server_adapter;

#[cfg(test)]
mod test_util;

pub use cache::AdapterCache;
pub use entry::{AdapterEntry, ResolvedAdapters};
pub use policy::{LoadBalancing, LoadBalancingPolicy};
pub use replica_group::ReplicaGroupEntry;
pub use server::{ServerHandle, UNAVAILABLE_LOAD};
pub use server_adapter::ServerAdapterEntry;
