use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::parse_id;
use crate::{
    error::{store_error, AppError},
    models::comment::{Comment, CreateCommentSchema, MISSING_FIELDS},
    state::AppState,
};

// GET /api/comments/:newsId - solo aprobados, del más antiguo al más nuevo
pub async fn list_approved_handler(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let news_id = parse_id(&news_id)?;

    let comments = state
        .store
        .approved_comments(news_id)
        .await
        .map_err(store_error("Error al obtener comentarios"))?;

    Ok(Json(comments))
}

// POST /api/comments - nace sin aprobar; la moderación es externa
pub async fn create_comment_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateCommentSchema>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // Un cuerpo ilegible cuenta como datos faltantes
    let Json(body) = payload.map_err(|_| AppError::validation(MISSING_FIELDS))?;
    let comment = body.validate().map_err(AppError::validation)?;

    let created = state
        .store
        .create_comment(&comment)
        .await
        .map_err(store_error("Error al insertar comentario"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/comments (admin) - todos, del más nuevo al más antiguo
pub async fn list_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state
        .store
        .all_comments()
        .await
        .map_err(store_error("Error al obtener comentarios"))?;

    Ok(Json(comments))
}

// DELETE /api/comments/:id (admin, sin interfaz)
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    let deleted = state
        .store
        .delete_comment(id)
        .await
        .map_err(store_error("Error al eliminar comentario"))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Comentario no encontrado"))
    }
}
