use std::sync::Arc;

use crate::catalog::CatalogStore;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogStore>,
}
