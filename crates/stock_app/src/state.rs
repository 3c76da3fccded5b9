use std::sync::Arc;

use stock_engine::MonitorManager;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<MonitorManager>,
}
