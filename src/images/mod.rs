use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

pub mod imagekit;

pub use imagekit::ImageKit;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("ImageKit no está configurado (faltan las claves IMAGEKIT_*)")]
    Unconfigured,

    #[error("Falló la petición HTTP: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Error del servicio externo ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Clave de firma inválida")]
    InvalidKey,
}

// Binario recibido en memoria, listo para reenviar al CDN
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadedImage {
    pub url: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "fileId")]
    pub file_id: String,
}

// Firma para que el navegador suba directo al CDN
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadAuth {
    pub token: String,
    pub expire: i64,
    pub signature: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, ImageError>;

    fn upload_auth(&self) -> Result<UploadAuth, ImageError>;
}

// Sin claves: cada llamada falla con un error estructurado
pub struct Unconfigured;

#[async_trait]
impl ImageStore for Unconfigured {
    async fn upload(&self, _image: ImageUpload) -> Result<UploadedImage, ImageError> {
        Err(ImageError::Unconfigured)
    }

    fn upload_auth(&self) -> Result<UploadAuth, ImageError> {
        Err(ImageError::Unconfigured)
    }
}

pub fn init_images(config: &Config) -> Result<Arc<dyn ImageStore>, ImageError> {
    match &config.imagekit {
        Some(keys) => Ok(Arc::new(ImageKit::new(keys.clone())?)),
        None => {
            warn!("Sin claves de ImageKit: la subida de imágenes no está disponible");
            Ok(Arc::new(Unconfigured))
        }
    }
}
