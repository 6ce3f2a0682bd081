use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::multipart::Form;
use serde::Deserialize;
use sha1::Sha1;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{ImageError, ImageStore, ImageUpload, UploadAuth, UploadedImage};
use crate::config::ImageKitConfig;

const UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
const UPLOAD_FOLDER: &str = "/news-images";
// Validez de la firma para subidas directas: 30 minutos
const AUTH_TTL_SECS: i64 = 60 * 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_id: String,
    url: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

pub struct ImageKit {
    http_client: reqwest::Client,
    keys: ImageKitConfig,
}

impl ImageKit {
    pub fn new(keys: ImageKitConfig) -> Result<Self, ImageError> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self { http_client, keys })
    }

    pub fn url_endpoint(&self) -> &str {
        &self.keys.url_endpoint
    }
}

// HMAC-SHA1(private_key, token + expire) en hexadecimal
pub(crate) fn sign(private_key: &str, token: &str, expire: i64) -> Result<String, ImageError> {
    let mut mac =
        Hmac::<Sha1>::new_from_slice(private_key.as_bytes()).map_err(|_| ImageError::InvalidKey)?;
    mac.update(token.as_bytes());
    mac.update(expire.to_string().as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[async_trait]
impl ImageStore for ImageKit {
    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, ImageError> {
        let form = Form::new()
            .text("file", STANDARD.encode(&image.bytes))
            .text("fileName", image.file_name)
            .text("folder", UPLOAD_FOLDER);

        let response = self
            .http_client
            .post(UPLOAD_URL)
            .basic_auth(&self.keys.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ImageError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response.json().await?;
        debug!("Imagen subida a {}: {}", self.url_endpoint(), uploaded.url);

        Ok(UploadedImage {
            url: uploaded.url,
            thumbnail_url: uploaded.thumbnail_url,
            file_id: uploaded.file_id,
        })
    }

    fn upload_auth(&self) -> Result<UploadAuth, ImageError> {
        let token = Uuid::new_v4().to_string();
        let expire = Utc::now().timestamp() + AUTH_TTL_SECS;
        let signature = sign(&self.keys.private_key, &token, expire)?;

        Ok(UploadAuth {
            token,
            expire,
            signature,
            public_key: self.keys.public_key.clone(),
        })
    }
}
