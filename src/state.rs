use std::sync::Arc;

use crate::{config::Config, db::DataStore, images::ImageStore};

// Lo único compartido entre peticiones: los clientes de los servicios externos
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub images: Arc<dyn ImageStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, images: Arc<dyn ImageStore>, config: Config) -> Self {
        Self {
            store,
            images,
            config: Arc::new(config),
        }
    }
}
