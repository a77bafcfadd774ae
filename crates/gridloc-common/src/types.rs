//! Directory records reported to locators and admin tooling.

use serde::{Deserialize, Serialize};

/// Averaging window of a node load sample.
///
/// The semantics of what an N-minute average means are owned by the node;
/// the registry only selects which window to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSample {
    /// 1-minute load average
    Avg1,
    /// 5-minute load average
    Avg5,
    /// 15-minute load average
    Avg15,
}

impl LoadSample {
    /// Reads the descriptor spelling of a sample window.
    ///
    /// Only the exact strings `"1"`, `"5"` and `"15"` select a window;
    /// anything else, including an empty field, falls back to the 1-minute
    /// average.
    pub fn parse(value: &str) -> Self {
        match value {
            "1" => LoadSample::Avg1,
            "5" => LoadSample::Avg5,
            "15" => LoadSample::Avg15,
            _ => LoadSample::Avg1,
        }
    }
}

/// Opaque handle onto a remote adapter endpoint.
///
/// The registry never inspects the endpoint contents; it only hands proxies
/// from servers through to locator clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterProxy(pub String);

impl AdapterProxy {
    pub fn new(endpoint: impl Into<String>) -> Self {
        AdapterProxy(endpoint.into())
    }
}

/// Directory record for one registered adapter.
///
/// Returned by the best-effort info queries; `proxy` is `None` when the
/// hosting server could not be reached at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterInfo {
    pub id: String,
    /// Replica group the adapter belongs to; empty for standalone adapters.
    pub replica_group_id: String,
    pub proxy: Option<AdapterProxy>,
}
