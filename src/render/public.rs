use maud::{html, Markup};

use super::{base_document, escaped, format_date, sanitized, site_header, Head, Widget};
use crate::{
    models::{
        article::Article,
        comment::{Comment, CreateCommentSchema},
    },
    view::{FeedView, PAGE_SIZE},
};

pub const NO_PHOTO_OF_WEEK: &str = "No hay foto de la semana todavía.";
pub const NO_FEATURED: &str = "No hay noticias destacadas para mostrar.";
pub const NO_NEWS: &str = "No hay noticias para mostrar.";
pub const NO_RECENT: &str = "No hay noticias recientes.";
pub const NO_COMMENTS: &str = "No hay comentarios aún. Sé el primero en opinar 👇";
pub const ARTICLE_UNAVAILABLE: &str = "No se pudo cargar la noticia.";
pub const COMMENT_SENT: &str =
    "Comentario enviado exitosamente. Se publicará cuando sea aprobado.";
pub const COMMENT_FAILED: &str = "No se pudo enviar el comentario. Intenta de nuevo.";

// ============================================================================
// Bloques
// ============================================================================

fn news_item(item: &Article) -> Markup {
    html! {
        article class="main-news-item fade-in visible" {
            a href=(escaped(&item.detail_href())) {
                img src=(escaped(item.image_url())) alt=(escaped(item.title()));
                div class="text" {
                    h3 { (sanitized(item.display_title())) }
                    p { (sanitized(item.encabezado())) }
                }
            }
        }
    }
}

fn recent_item(item: &Article) -> Markup {
    html! {
        a class="recent-link" href=(escaped(&item.detail_href())) {
            img class="recent-thumb" src=(escaped(item.image_url())) alt=(escaped(item.title()));
            h3 { (sanitized(item.title())) }
            p { (sanitized(item.encabezado())) }
        }
    }
}

pub fn load_more_href(query: Option<&str>, shown: usize) -> String {
    match query {
        Some(q) => format!(
            "/?q={}&shown={shown}#featured-container",
            urlencoding::encode(q)
        ),
        None => format!("/?shown={shown}#featured-container"),
    }
}

// Portada: bloques de 3 hasta `shown`, más el botón "Cargar más"
fn featured_block(feed: &mut Widget<FeedView>, shown: usize) -> Markup {
    let view = match feed {
        Widget::Ready(view) => view,
        Widget::Failed => {
            return html! {
                section id="featured-container" {
                    p class="placeholder" { "No se pudieron cargar las noticias." }
                }
            }
        }
    };

    if view.is_empty() {
        return html! {
            section id="featured-container" {
                @if let Some(query) = view.query() {
                    p class="no-results" {
                        "No se encontraron resultados para \"" (escaped(query)) "\""
                    }
                } @else {
                    p class="placeholder" { (NO_NEWS) }
                }
            }
        };
    }

    let page = view.pages_up_to(shown);
    let next = load_more_href(view.query(), view.shown() + PAGE_SIZE);

    html! {
        section id="featured-container" {
            div class="main-news-list" {
                @for item in &page {
                    (news_item(item))
                }
            }
            @if view.has_more() {
                a id="load-more-btn" class="load-more" href=(escaped(&next)) { "Cargar más" }
            }
        }
    }
}

fn sidebar(feed: &Widget<FeedView>) -> Markup {
    html! {
        div id="news-cards" class="sidebar" {
            @if let Widget::Ready(view) = feed {
                @for item in view.sidebar() {
                    article class="card recent-item" { (recent_item(item)) }
                }
            }
        }
    }
}

fn carousel(feed: &Widget<FeedView>) -> Markup {
    html! {
        div id="news-carousel" {
            @if let Widget::Ready(view) = feed {
                @if !view.is_empty() {
                    @let featured = view.carousel();
                    @if featured.is_empty() {
                        p { (NO_FEATURED) }
                    } @else {
                        div class="swiper" {
                            div class="swiper-wrapper" {
                                @for item in featured {
                                    div class="swiper-slide" {
                                        a href=(escaped(&item.detail_href())) {
                                            img src=(escaped(item.image_url())) alt=(escaped(item.title()));
                                            h3 { (sanitized(item.title())) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// Foto de la semana con su ampliación (modal por `:target`, sin JS)
pub fn photo_of_week(photo: &Widget<Option<Article>>) -> Markup {
    html! {
        div class="photo-week" {
            @match photo {
                Widget::Ready(Some(photo)) => {
                    h3 { "Foto de la Semana" }
                    a href="#photo-week-modal" {
                        img id="photo-week-img" src=(escaped(photo.image_url())) alt=(escaped(photo.title()));
                    }
                    p class="caption" { (escaped(photo.title())) }
                    div id="photo-week-modal" class="modal" {
                        a class="modal-close" href="#" { "×" }
                        img id="modal-img" class="modal-content" src=(escaped(photo.image_url())) alt=(escaped(photo.title()));
                        div id="modal-caption" { (escaped(photo.title())) }
                    }
                }
                Widget::Ready(None) => {
                    p { (NO_PHOTO_OF_WEEK) }
                }
                Widget::Failed => {
                    p class="placeholder" { "No se pudo cargar la foto de la semana." }
                }
            }
        }
    }
}

// ============================================================================
// Páginas
// ============================================================================

pub fn render_index(
    site_name: &str,
    mut feed: Widget<FeedView>,
    shown: usize,
    photo: &Widget<Option<Article>>,
) -> Markup {
    let query = match &feed {
        Widget::Ready(view) => view.query().map(str::to_string),
        Widget::Failed => None,
    };
    let featured = featured_block(&mut feed, shown);

    let content = html! {
        (site_header(site_name, query.as_deref()))
        main class="index-page" {
            section class="carousel" { (carousel(&feed)) }
            div class="layout" {
                (featured)
                aside {
                    (sidebar(&feed))
                    (photo_of_week(photo))
                }
            }
        }
    };

    base_document(Head::titled(site_name), "home", content)
}

pub struct CommentFormState<'a> {
    pub notice: Option<&'a str>,
    pub error: Option<&'a str>,
    pub values: Option<&'a CreateCommentSchema>,
}

impl CommentFormState<'_> {
    pub fn empty() -> Self {
        Self {
            notice: None,
            error: None,
            values: None,
        }
    }
}

fn comment_list(comments: &Widget<Vec<Comment>>) -> Markup {
    html! {
        ul id="comments-list" {
            @match comments {
                Widget::Ready(list) if list.is_empty() => {
                    li { (NO_COMMENTS) }
                }
                Widget::Ready(list) => {
                    @for comment in list {
                        li class="comment-item" {
                            strong { (escaped(comment.author())) }
                            p { (escaped(&comment.content)) }
                            span class="date" { (format_date(&comment.created_at)) }
                        }
                    }
                }
                Widget::Failed => {
                    li class="placeholder" { "No se pudieron cargar los comentarios." }
                }
            }
        }
    }
}

fn comments_section(
    news_id: i64,
    comments: &Widget<Vec<Comment>>,
    form: &CommentFormState<'_>,
) -> Markup {
    // Tras un error se conserva lo que escribió el lector
    let values = form.values;
    let author = values.and_then(|v| v.author_name.as_deref()).unwrap_or_default();
    let email = values.and_then(|v| v.author_email.as_deref()).unwrap_or_default();
    let text = values.and_then(|v| v.content.as_deref()).unwrap_or_default();

    html! {
        section id="comments" class="comments-section" {
            h3 { "Comentarios" }
            (comment_list(comments))
            @if let Some(notice) = form.notice {
                p class="notice" { (escaped(notice)) }
            }
            @if let Some(error) = form.error {
                p class="error" { (escaped(error)) }
            }
            form id="comment-form" method="post" action="/article/comments" {
                input type="hidden" name="news_id" value=(news_id);
                input type="text" id="comment-author" name="author_name" placeholder="Tu nombre"
                    value=(escaped(author)) required;
                input type="email" id="comment-email" name="author_email" placeholder="Tu correo (opcional)"
                    value=(escaped(email));
                textarea id="comment-content" name="content" placeholder="Escribe tu comentario..." required {
                    (escaped(text))
                }
                button type="submit" { "Enviar comentario" }
            }
        }
    }
}

fn recent_news(recent: &Widget<Vec<Article>>) -> Markup {
    html! {
        ul id="news-cards" class="recent-news" {
            @match recent {
                Widget::Ready(list) if list.is_empty() => {
                    li { (NO_RECENT) }
                }
                Widget::Ready(list) => {
                    @for item in list {
                        li class="recent-item" { (recent_item(item)) }
                    }
                }
                Widget::Failed => {
                    li class="placeholder" { "No se pudieron cargar las noticias recientes." }
                }
            }
        }
    }
}

pub struct ArticlePage<'a> {
    pub site_name: &'a str,
    pub article: Widget<Option<Article>>,
    pub comments: Widget<Vec<Comment>>,
    pub recent: Widget<Vec<Article>>,
    pub photo: Widget<Option<Article>>,
    pub form: CommentFormState<'a>,
}

pub fn render_article(page: &ArticlePage<'_>) -> Markup {
    let loaded = match &page.article {
        Widget::Ready(Some(article)) => Some(article),
        _ => None,
    };

    let title = match loaded {
        Some(article) => format!("{} | {}", article.title(), page.site_name),
        None => page.site_name.to_string(),
    };
    let description = loaded
        .map(|article| article.encabezado())
        .filter(|text| !text.is_empty());

    let content = html! {
        (site_header(page.site_name, None))
        main class="article-page" {
            section id="article-content" {
                @match loaded {
                    Some(article) => {
                        article class="article-detail" {
                            img src=(escaped(article.image_url())) alt=(escaped(article.title()));
                            h1 { (escaped(article.title())) }
                            h3 { (sanitized(article.encabezado())) }
                            div class="article-body" { (sanitized(article.description())) }
                        }
                        (comments_section(article.id, &page.comments, &page.form))
                    }
                    None => {
                        p class="placeholder" { (ARTICLE_UNAVAILABLE) }
                    }
                }
            }
            aside {
                h2 { "Noticias recientes" }
                (recent_news(&page.recent))
                (photo_of_week(&page.photo))
            }
        }
    };

    let head = Head {
        title: &title,
        description,
        extra_styles: &[],
        scripts: &[],
    };
    base_document(head, "article", content)
}
