use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::{
    handlers::{admin, article, comment, not_found_handler, ping_handler, site, upload},
    state::AppState,
};

// Límite del cuerpo de las peticiones (la imagen en sí se limita a 5MB)
const BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn create_routes(state: AppState) -> Router {
    // 1. API JSON de noticias
    let news_routes = Router::new()
        .route(
            "/api/news",
            get(article::list_news_handler).post(article::create_news_handler),
        )
        .route("/api/news/upload-auth", get(upload::upload_auth_handler))
        .route("/api/news/upload", post(upload::upload_image_handler))
        .route(
            "/api/news/:id",
            get(article::get_news_handler)
                .put(article::update_news_handler)
                .delete(article::delete_news_handler),
        );

    // 2. API JSON de comentarios
    let comment_routes = Router::new()
        .route(
            "/api/comments",
            get(comment::list_all_handler).post(comment::create_comment_handler),
        )
        .route(
            "/api/comments/:id",
            get(comment::list_approved_handler).delete(comment::delete_comment_handler),
        );

    // 3. Páginas públicas
    let site_routes = Router::new()
        .route("/", get(site::index_handler))
        .route("/index.html", get(site::index_handler))
        .route("/article", get(site::article_handler))
        .route("/article.html", get(site::article_handler))
        .route("/article/comments", post(site::comment_form_handler))
        .route("/ping", get(ping_handler));

    // 4. Panel de administración
    let admin_routes = Router::new()
        .route("/admin", get(admin::admin_handler))
        .route("/admin/new", get(admin::new_news_handler))
        .route("/admin/edit/:id", get(admin::edit_news_handler))
        .route("/admin/save", post(admin::save_news_handler))
        .route("/admin/delete/:id", post(admin::delete_news_handler));

    // Lo que no es ruta se busca en la carpeta pública; si tampoco está, 404
    let static_files = ServeDir::new(&state.config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found_handler.into_service());

    Router::new()
        .merge(news_routes)
        .merge(comment_routes)
        .merge(site_routes)
        .merge(admin_routes)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
