mod common;

use axum::http::StatusCode;
use common::{app, form};
use lalupa::{
    db::DataStore,
    render::public::{
        ARTICLE_UNAVAILABLE, COMMENT_FAILED, COMMENT_SENT, NO_COMMENTS, NO_NEWS,
        NO_PHOTO_OF_WEEK, NO_RECENT,
    },
};

#[tokio::test]
async fn empty_portal_shows_placeholders() {
    let app = app();
    let (status, page) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<title>La Lupa</title>"));
    assert!(page.contains(NO_NEWS));
    assert!(page.contains(NO_PHOTO_OF_WEEK));
    assert!(!page.contains("load-more-btn"));
}

#[tokio::test]
async fn photo_of_week_is_kept_out_of_the_feed() {
    let app = app();
    app.seed("Atardecer", false, true).await;
    app.seed("Portada", true, false).await;

    let (_, page) = app.get("/").await;
    assert!(page.contains("photo-week-modal"));
    assert!(page.contains("https://cdn.test/atardecer.jpg"));
    assert!(!page.contains("article.html?id=1\""));
    assert!(page.contains("swiper-slide"));
}

#[tokio::test]
async fn load_more_until_exhausted() {
    let app = app();
    for n in 1..=7 {
        app.seed(&format!("Nota {n}"), false, false).await;
    }

    let (_, first) = app.get("/").await;
    assert!(first.contains("Nota 7"));
    assert!(first.contains("load-more-btn"));
    assert!(first.contains("/?shown=6#featured-container"));

    let (_, second) = app.get("/?shown=6").await;
    assert!(second.contains("/?shown=9#featured-container"));

    let (_, last) = app.get("/?shown=9").await;
    assert!(last.contains("Nota 1"));
    assert!(!last.contains("load-more-btn"));
}

#[tokio::test]
async fn search_round_trip_and_no_results() {
    let app = app();
    app.seed("Elecciones", false, false).await;
    app.seed("Deportes", false, false).await;

    let (_, hits) = app.get("/?q=elecc").await;
    assert!(hits.contains("article.html?id=1"));
    assert!(!hits.contains("article.html?id=2\""));
    assert!(hits.contains("value=\"elecc\""));

    let (_, none) = app.get("/?q=%3Cb%3Ezzz").await;
    assert!(none.contains("No se encontraron resultados para &quot;&lt;b&gt;zzz&quot;"));
    assert!(!none.contains("<b>zzz"));
}

#[tokio::test]
async fn bad_shown_value_keeps_the_search() {
    let app = app();
    app.seed("Elecciones", false, false).await;
    app.seed("Deportes", false, false).await;

    let (status, page) = app.get("/?q=elecc&shown=x").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("value=\"elecc\""));
    assert!(page.contains("article.html?id=1"));
    assert!(!page.contains("article.html?id=2\""));
}

#[tokio::test]
async fn article_page_renders_sanitized_content() {
    let app = app();
    let article = app.seed("Puente", false, false).await;

    let (status, page) = app.get(&format!("/article.html?id={}", article.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<title>Puente | La Lupa</title>"));
    assert!(page.contains("<p>Cuerpo de Puente</p>"));
    assert!(page.contains(NO_COMMENTS));
    assert!(page.contains("Noticias recientes"));
}

#[tokio::test]
async fn article_page_without_valid_id_degrades() {
    let app = app();

    for uri in ["/article", "/article?id=abc", "/article?id=42"] {
        let (status, page) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains(ARTICLE_UNAVAILABLE));
        assert!(page.contains(NO_RECENT));
    }
}

#[tokio::test]
async fn comment_form_redirects_and_waits_for_approval() {
    let app = app();
    let article = app.seed("Puente", false, false).await;

    let body = format!("news_id={}&author_name=Ana&author_email=&content=Excelente", article.id);
    let (status, _, location) = app.send(form("/article/comments", &body)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.unwrap();
    assert_eq!(location, format!("/article?id={}&sent=1#comments", article.id));

    let (_, page) = app.get(location.trim_end_matches("#comments")).await;
    assert!(page.contains(COMMENT_SENT));
    assert!(page.contains(NO_COMMENTS));

    let stored = app.store.all_comments().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].author_email, None);

    app.store.approve_comment(stored[0].id);
    let (_, page) = app.get(&format!("/article?id={}", article.id)).await;
    assert!(page.contains("Excelente"));
}

#[tokio::test]
async fn incomplete_comment_form_keeps_values() {
    let app = app();
    let article = app.seed("Puente", false, false).await;

    let body = format!("news_id={}&author_name=Ana&content=+++", article.id);
    let (status, page, _) = app.send(form("/article/comments", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(page.contains(COMMENT_FAILED));
    assert!(page.contains("value=\"Ana\""));
    assert!(app.store.all_comments().await.unwrap().is_empty());
}
