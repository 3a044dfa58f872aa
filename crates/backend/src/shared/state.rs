use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::reports::repository::{DatabaseRowSource, RowSource};
use crate::shared::config::Config;
use crate::system::auth::basic::BasicAuth;

/// Shared state handed to every handler and to the auth middleware
#[derive(Clone)]
pub struct AppState {
    pub rows: Arc<dyn RowSource>,
    /// `None` when no credentials are configured
    pub auth: Option<Arc<BasicAuth>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            rows: Arc::new(DatabaseRowSource::new(db)),
            auth: BasicAuth::from_config(&config.auth).map(Arc::new),
        }
    }
}
