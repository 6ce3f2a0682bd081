use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::Config,
    models::{
        article::{Article, ArticleInput, NewsFilter},
        comment::{Comment, NewComment},
    },
};

pub mod memory;
pub mod postgres;
pub mod rest;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use rest::RestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error de base de datos: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Falló la petición HTTP: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Error del servicio externo ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Respuesta inesperada: {0}")]
    Decode(String),
}

// Todo acceso a `news` y `comments` pasa por aquí. Los handlers no saben
// si detrás hay Postgres, la API REST de Supabase o memoria.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<Article>, StoreError>;

    async fn get_news(&self, id: i64) -> Result<Option<Article>, StoreError>;

    async fn create_news(&self, input: &ArticleInput) -> Result<Article, StoreError>;

    async fn update_news(
        &self,
        id: i64,
        input: &ArticleInput,
    ) -> Result<Option<Article>, StoreError>;

    async fn delete_news(&self, id: i64) -> Result<Option<Article>, StoreError>;

    // Solo comentarios aprobados, del más antiguo al más nuevo
    async fn approved_comments(&self, news_id: i64) -> Result<Vec<Comment>, StoreError>;

    async fn all_comments(&self) -> Result<Vec<Comment>, StoreError>;

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, StoreError>;

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError>;

    // La foto vigente es la más reciente marcada; no se exige unicidad
    async fn photo_of_week(&self) -> Result<Option<Article>, StoreError> {
        let mut rows = self
            .list_news(&NewsFilter::current_photo_of_week())
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }
}

pub async fn init_store(config: &Config) -> Result<Arc<dyn DataStore>, StoreError> {
    if let Some(url) = &config.database_url {
        let store = PgStore::connect(url).await?;
        info!("✅ Conexión a Postgres exitosa");
        return Ok(Arc::new(store));
    }

    if let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_key) {
        let store = RestStore::new(url, key)?;
        info!("✅ Usando la API REST de Supabase en {url}");
        return Ok(Arc::new(store));
    }

    warn!("Sin DATABASE_URL ni SUPABASE_URL: los datos se guardan solo en memoria");
    Ok(Arc::new(MemoryStore::default()))
}
