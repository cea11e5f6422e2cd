// In-Memory RPC Root

use crate::procedure::{MemoryProcedure, MemoryProcedureBuilder};
use crate::router::MemoryRouter;
use tracing::debug;
use trellis_core::port::rpc::{RouteEntry, RpcRoot};
use uuid::Uuid;

/// In-memory RPC root; one identity per construction
pub struct MemoryRpcRoot {
    id: Uuid,
}

impl MemoryRpcRoot {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(root_id = %id, "created in-memory RPC root");
        Self { id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for MemoryRpcRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcRoot for MemoryRpcRoot {
    type Builder = MemoryProcedureBuilder;
    type Procedure = MemoryProcedure;
    type Router = MemoryRouter;

    fn procedure(&self) -> MemoryProcedureBuilder {
        MemoryProcedureBuilder::default()
    }

    fn router(
        &self,
        entries: Vec<(String, RouteEntry<MemoryProcedure, MemoryRouter>)>,
    ) -> MemoryRouter {
        MemoryRouter::from_entries(entries)
    }
}
