pub mod admin;
pub mod article;
pub mod comment;
pub mod site;
pub mod upload;

use axum::{http::{StatusCode, Uri}, response::IntoResponse};
use tracing::warn;

use crate::error::AppError;

// Ids de la URL: enteros positivos o 400 en JSON (nunca el rechazo en texto plano de axum)
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation("ID inválido"))
}

pub async fn ping_handler() -> &'static str {
    "pong"
}

pub async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    warn!("⚠️ Ruta no encontrada: {uri}");
    (StatusCode::NOT_FOUND, "404 - Recurso no encontrado")
}
