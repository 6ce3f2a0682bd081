use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;
use tracing::{error, warn};

use crate::{
    models::{
        article::NewsFilter,
        comment::{CreateCommentSchema, NewComment},
    },
    render::{
        public::{
            render_article, render_index, ArticlePage, CommentFormState, COMMENT_FAILED,
            COMMENT_SENT,
        },
        Widget,
    },
    state::AppState,
    view::{FeedView, PAGE_SIZE},
};

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub q: Option<String>,
    // Texto: un valor raro no debe tirar también la búsqueda
    pub shown: Option<String>,
}

fn shown_count(raw: Option<&str>) -> usize {
    raw.and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(PAGE_SIZE)
        .max(PAGE_SIZE)
}

// GET /?q=texto&shown=6
pub async fn index_handler(
    State(state): State<AppState>,
    params: Option<Query<IndexParams>>,
) -> Markup {
    let params = params.map(|Query(p)| p).unwrap_or_default();

    let query = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let filter = match query {
        Some(q) => NewsFilter::feed().with_search(q),
        None => NewsFilter::feed(),
    };

    // Cada bloque se carga por separado: si falla uno, el otro se muestra igual
    let (news, photo) = tokio::join!(
        state.store.list_news(&filter),
        state.store.photo_of_week()
    );

    let feed = Widget::from_result(news.map(|items| FeedView::new(items, query)), "noticias");
    let photo = Widget::from_result(photo, "foto de la semana");
    let shown = shown_count(params.shown.as_deref());

    render_index(&state.config.site_name, feed, shown, &photo)
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleParams {
    pub id: Option<String>,
    pub sent: Option<String>,
}

fn article_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

async fn article_page(
    state: &AppState,
    id: Option<i64>,
    form: CommentFormState<'_>,
) -> Markup {
    let store = &state.store;

    let article = async {
        match id {
            Some(id) => store.get_news(id).await,
            None => Ok(None),
        }
    };
    let comments = async {
        match id {
            Some(id) => store.approved_comments(id).await,
            None => Ok(Vec::new()),
        }
    };
    let recent_filter = NewsFilter::feed().with_limit(PAGE_SIZE);

    let (article, comments, recent, photo) = tokio::join!(
        article,
        comments,
        store.list_news(&recent_filter),
        store.photo_of_week()
    );

    let page = ArticlePage {
        site_name: &state.config.site_name,
        article: Widget::from_result(article, "la noticia"),
        comments: Widget::from_result(comments, "los comentarios"),
        recent: Widget::from_result(recent, "noticias recientes"),
        photo: Widget::from_result(photo, "foto de la semana"),
        form,
    };

    render_article(&page)
}

// GET /article?id=5 (y /article.html?id=5)
pub async fn article_handler(
    State(state): State<AppState>,
    params: Option<Query<ArticleParams>>,
) -> Markup {
    let params = params.map(|Query(p)| p).unwrap_or_default();

    let id = article_id(params.id.as_deref());
    if id.is_none() {
        warn!("No se pasó un ID válido en la URL");
    }

    let form = CommentFormState {
        notice: params.sent.is_some().then_some(COMMENT_SENT),
        ..CommentFormState::empty()
    };

    article_page(&state, id, form).await
}

// Campos del formulario público, todos como texto
#[derive(Debug, Default, Deserialize)]
pub struct CommentFormInput {
    pub news_id: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub content: Option<String>,
}

impl From<CommentFormInput> for CreateCommentSchema {
    fn from(input: CommentFormInput) -> Self {
        Self {
            news_id: article_id(input.news_id.as_deref()),
            author_name: input.author_name,
            author_email: input.author_email,
            content: input.content,
        }
    }
}

async fn insert_comment(
    state: &AppState,
    schema: CreateCommentSchema,
) -> Result<NewComment, (StatusCode, CreateCommentSchema)> {
    let comment = match schema.clone().validate() {
        Ok(comment) => comment,
        Err(_) => return Err((StatusCode::BAD_REQUEST, schema)),
    };

    match state.store.create_comment(&comment).await {
        Ok(_) => Ok(comment),
        Err(e) => {
            error!("❌ Error al insertar comentario: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, schema))
        }
    }
}

// POST /article/comments (formulario urlencoded)
pub async fn comment_form_handler(
    State(state): State<AppState>,
    Form(input): Form<CommentFormInput>,
) -> Response {
    let schema = CreateCommentSchema::from(input);
    let id = schema.news_id;

    match insert_comment(&state, schema).await {
        Ok(comment) => {
            let target = format!("/article?id={}&sent=1#comments", comment.news_id);
            Redirect::to(&target).into_response()
        }
        Err((status, values)) => {
            let form = CommentFormState {
                error: Some(COMMENT_FAILED),
                values: Some(&values),
                ..CommentFormState::empty()
            };
            (status, article_page(&state, id, form).await).into_response()
        }
    }
}
