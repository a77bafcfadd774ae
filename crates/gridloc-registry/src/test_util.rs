//! Shared test doubles for the registry's unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gridloc_common::{AdapterProxy, LoadSample, RegistryError, Result};

use crate::server::ServerHandle;
use crate::server_adapter::ServerAdapterEntry;

/// Scripted server handle: one fixed outcome per operation.
pub(crate) struct MockServer {
    proxy: Mutex<Result<AdapterProxy>>,
    load: Mutex<Result<f32>>,
}

impl MockServer {
    /// Healthy server returning the given proxy endpoint and a zero load.
    pub(crate) fn healthy(endpoint: &str) -> Arc<Self> {
        Arc::new(MockServer {
            proxy: Mutex::new(Ok(AdapterProxy::new(endpoint))),
            load: Mutex::new(Ok(0.0)),
        })
    }

    /// Healthy server whose node reports the given load.
    pub(crate) fn with_load(endpoint: &str, load: f32) -> Arc<Self> {
        Arc::new(MockServer {
            proxy: Mutex::new(Ok(AdapterProxy::new(endpoint))),
            load: Mutex::new(Ok(load)),
        })
    }

    /// Server whose node is gone for both operations.
    pub(crate) fn unreachable(node: &str) -> Arc<Self> {
        Arc::new(MockServer {
            proxy: Mutex::new(Err(RegistryError::NodeUnreachable(node.into()))),
            load: Mutex::new(Err(RegistryError::NodeUnreachable(node.into()))),
        })
    }

    /// Server failing only proxy retrieval.
    pub(crate) fn failing_proxy(err: RegistryError) -> Arc<Self> {
        Arc::new(MockServer {
            proxy: Mutex::new(Err(err)),
            load: Mutex::new(Ok(0.0)),
        })
    }

    /// Server failing only load sampling.
    pub(crate) fn failing_load(err: RegistryError) -> Arc<Self> {
        Arc::new(MockServer {
            proxy: Mutex::new(Ok(AdapterProxy::new("tcp -h mock -p 0"))),
            load: Mutex::new(Err(err)),
        })
    }
}

#[async_trait]
impl ServerHandle for MockServer {
    async fn get_adapter(&self, _adapter_id: &str, _up_to_date: bool) -> Result<AdapterProxy> {
        self.proxy.lock().unwrap().clone()
    }

    async fn get_load(&self, _sample: LoadSample) -> Result<f32> {
        self.load.lock().unwrap().clone()
    }
}

/// Member entry for a replica group test, with default priority.
pub(crate) fn group_member(
    id: &str,
    group_id: &str,
    server: Arc<MockServer>,
) -> Arc<ServerAdapterEntry> {
    adapter(id, Some(group_id), 0, server)
}

pub(crate) fn adapter(
    id: &str,
    group_id: Option<&str>,
    priority: i32,
    server: Arc<MockServer>,
) -> Arc<ServerAdapterEntry> {
    Arc::new(ServerAdapterEntry::new(
        id.into(),
        "TestApp".into(),
        group_id.map(str::to_string),
        priority,
        server,
    ))
}
