use std::sync::Arc;

use gateway::GatewayClient;
use services::services::editing_session::EditingSessionManager;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayClient>,
    pub editing: Arc<EditingSessionManager>,
}

impl AppState {
    pub fn new(gateway: GatewayClient, editing: EditingSessionManager) -> Self {
        Self {
            gateway: Arc::new(gateway),
            editing: Arc::new(editing),
        }
    }
}
