use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
};

use super::parse_id;
use crate::{
    error::{store_error, AppError},
    models::article::{Article, ArticleInput, NewsFilter},
    state::AppState,
};

const NOT_FOUND: &str = "Noticia no encontrada";

// GET /api/news (Soporta ?photo_of_week=true&featured=true&q=texto&limit=3)
pub async fn list_news_handler(
    State(state): State<AppState>,
    opts: Result<Query<NewsFilter>, QueryRejection>,
) -> Result<Json<Vec<Article>>, AppError> {
    let Query(filter) = opts?;

    let news = state
        .store
        .list_news(&filter)
        .await
        .map_err(store_error("Error cargando noticias"))?;

    Ok(Json(news))
}

// GET /api/news/:id
pub async fn get_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    let id = parse_id(&id)?;

    state
        .store
        .get_news(id)
        .await
        .map_err(store_error("Error obteniendo la noticia"))?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

// POST /api/news - sin validación de campos: se guarda lo que envía el panel
pub async fn create_news_handler(
    State(state): State<AppState>,
    payload: Result<Json<ArticleInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;

    let article = state
        .store
        .create_news(&input)
        .await
        .map_err(store_error("Error creando noticia"))?;

    Ok((StatusCode::CREATED, Json(article)))
}

// PUT /api/news/:id - sobrescribe todos los campos
pub async fn update_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ArticleInput>, JsonRejection>,
) -> Result<Json<Article>, AppError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;

    state
        .store
        .update_news(id, &input)
        .await
        .map_err(store_error("Error actualizando noticia"))?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

// DELETE /api/news/:id - devuelve la fila borrada
pub async fn delete_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    let id = parse_id(&id)?;

    state
        .store
        .delete_news(id)
        .await
        .map_err(store_error("Error eliminando noticia"))?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}
