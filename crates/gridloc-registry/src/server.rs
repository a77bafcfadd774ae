//! The seam between the registry and the server layer.

use async_trait::async_trait;
use gridloc_common::{AdapterProxy, LoadSample, Result};

/// Load reported in place of a sample that could not be obtained.
///
/// Strictly greater than any realistic load average, so adaptive ordering
/// keeps a total order and pushes unreachable members to the back of the
/// candidate list instead of dropping them.
pub const UNAVAILABLE_LOAD: f32 = 999.9;

/// Handle onto the server hosting one or more adapters.
///
/// The registry does not talk to nodes itself; every outbound call goes
/// through this trait, and every call is treated as slow I/O that may block
/// on the network. No registry guard is ever held across one of these calls.
///
/// Handles are shared between entries and must tolerate concurrent calls;
/// their lifetime is owned by the server registry, not the adapter cache.
#[async_trait]
pub trait ServerHandle: Send + Sync {
    /// Returns the current direct proxy for the named adapter.
    ///
    /// With `up_to_date` set, the server must not answer from a stale
    /// activation state.
    ///
    /// # Errors
    ///
    /// [`AdapterNotFound`](gridloc_common::RegistryError::AdapterNotFound)
    /// when the adapter is no longer deployed on this server,
    /// [`ServerNotExist`](gridloc_common::RegistryError::ServerNotExist),
    /// [`NodeNotExist`](gridloc_common::RegistryError::NodeNotExist) or
    /// [`NodeUnreachable`](gridloc_common::RegistryError::NodeUnreachable)
    /// when the hosting side is gone or cannot be contacted.
    async fn get_adapter(&self, adapter_id: &str, up_to_date: bool) -> Result<AdapterProxy>;

    /// Returns the hosting node's load average over the given window.
    async fn get_load(&self, sample: LoadSample) -> Result<f32>;
}
