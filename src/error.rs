use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{db::StoreError, images::ImageError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{context}")]
    Image {
        context: &'static str,
        #[source]
        source: ImageError,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } | AppError::Image { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Texto del servicio externo, si lo hay
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::Store { source, .. } => Some(source.to_string()),
            AppError::Image { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

// Para usar con `.map_err(store_error("..."))`
pub fn store_error(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |source| AppError::Store { context, source }
}

pub fn image_error(context: &'static str) -> impl FnOnce(ImageError) -> AppError {
    move |source| AppError::Image { context, source }
}

// Un JSON mal formado es un error de validación, no un 422 en texto plano
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("JSON inválido: {}", rejection.body_text()))
    }
}

// Igual con los parámetros de la URL: mejor 400 que ignorarlos en silencio
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(format!("Parámetros inválidos: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.details();

        if let Some(details) = &details {
            tracing::error!("❌ {}: {}", self, details);
        }

        let body = match details {
            Some(details) => json!({ "error": self.to_string(), "details": details }),
            None => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

// Errores de la subida de imágenes: siempre JSON con `success: false`
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No se envió ningún archivo")]
    MissingFile,

    #[error("Error al leer el archivo")]
    Unreadable(String),

    #[error("La imagen excede el tamaño máximo de 5MB")]
    TooLarge,

    #[error("Solo se permiten imágenes (jpg, png, webp, gif)")]
    NotAnImage,

    #[error("Error subiendo imagen a ImageKit")]
    Upstream(#[source] ImageError),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            UploadError::Unreadable(reason) => Some(reason.clone()),
            UploadError::Upstream(source) => Some(source.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let details = self.details();
        if let UploadError::Upstream(source) = &self {
            tracing::error!("❌ Error subiendo imagen a ImageKit: {source}");
        }

        let mut body = json!({ "success": false, "error": self.to_string() });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (self.status(), Json(body)).into_response()
    }
}
