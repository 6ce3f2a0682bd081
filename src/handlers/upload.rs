use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use mime::Mime;
use serde_json::json;
use tracing::info;

use crate::{
    error::{image_error, AppError, UploadError},
    images::{ImageUpload, UploadAuth},
    state::AppState,
};

pub const IMAGE_FIELD: &str = "image";
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024; // 5MB

// Lee un campo de archivo del formulario y valida tamaño y tipo.
// Un campo de archivo vacío (sin archivo elegido) devuelve None.
pub async fn read_image_field(field: Field<'_>) -> Result<Option<ImageUpload>, UploadError> {
    let file_name = field.file_name().unwrap_or("unknown.jpg").to_string();
    let content_type = field.content_type().map(str::to_string);

    let data = field
        .bytes()
        .await
        .map_err(|e| UploadError::Unreadable(e.to_string()))?;

    if data.is_empty() {
        return Ok(None);
    }

    if data.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge);
    }

    // Si el navegador declara un tipo, solo aceptamos imágenes comunes
    if let Some(ct) = content_type.as_deref().and_then(|ct| ct.parse::<Mime>().ok()) {
        let allowed = matches!(
            (ct.type_().as_str(), ct.subtype().as_str()),
            ("image", "jpeg") | ("image", "png") | ("image", "webp") | ("image", "gif")
        );
        if !allowed {
            return Err(UploadError::NotAnImage);
        }
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: data.to_vec(),
    }))
}

// POST /api/news/upload (multipart, campo "image")
pub async fn upload_image_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, UploadError> {
    let mut multipart = multipart.map_err(|e| UploadError::Unreadable(e.body_text()))?;

    // Buscar el campo "image" en el formulario enviado
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Unreadable(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let image = read_image_field(field).await?.ok_or(UploadError::MissingFile)?;
        let uploaded = state
            .images
            .upload(image)
            .await
            .map_err(UploadError::Upstream)?;

        info!("✅ Imagen subida: {}", uploaded.url);

        return Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "url": uploaded.url,
                "thumbnailUrl": uploaded.thumbnail_url,
                "fileId": uploaded.file_id,
            })),
        ));
    }

    Err(UploadError::MissingFile)
}

// GET /api/news/upload-auth - firma para subir directo desde el navegador
pub async fn upload_auth_handler(
    State(state): State<AppState>,
) -> Result<Json<UploadAuth>, AppError> {
    state
        .images
        .upload_auth()
        .map(Json)
        .map_err(image_error("Error generando firma de ImageKit"))
}
