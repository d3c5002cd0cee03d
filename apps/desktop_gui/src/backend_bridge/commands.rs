//! Backend commands queued from UI to backend worker.

use shared::protocol::OrderRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    LoadCatalog,
    SubmitOrder { request: OrderRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCatalog => "load_catalog",
            Self::SubmitOrder { .. } => "submit_order",
        }
    }
}
