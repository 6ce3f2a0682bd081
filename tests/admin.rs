mod common;

use axum::http::StatusCode;
use common::{app, app_with_images, multipart, Part};
use lalupa::{db::DataStore, models::article::NewsFilter};

fn draft_parts<'a>(id: &'a str, title: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("id", id),
        Part::Text("title", title),
        Part::Text("encabezado", "<p>Encabezado</p>"),
        Part::Text("description", "<p>Cuerpo</p>"),
        Part::Text("image_url", ""),
        Part::Text("is_featured", "on"),
    ]
}

#[tokio::test]
async fn panel_lists_articles_with_flags() {
    let app = app();
    app.seed("Destacada", true, false).await;
    app.seed("Foto", false, true).await;

    let (status, page) = app.get("/admin").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("news-table"));
    assert!(page.contains("✅"));
    assert!(page.contains("📷"));
    assert!(!page.contains("news-form"));
}

#[tokio::test]
async fn add_and_edit_open_the_form() {
    let app = app();
    let article = app.seed("Puente", false, false).await;

    let (_, page) = app.get("/admin/new").await;
    assert!(page.contains("Nueva Noticia"));

    let (_, page) = app.get(&format!("/admin/edit/{}", article.id)).await;
    assert!(page.contains("Editar Noticia"));
    assert!(page.contains("value=\"Puente\""));
    assert!(page.contains("&lt;p&gt;Encabezado de Puente&lt;/p&gt;"));

    let (status, page) = app.get("/admin/edit/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("Error al obtener noticia 999"));
    assert!(!page.contains("news-form"));
}

#[tokio::test]
async fn save_creates_then_updates() {
    let app = app();

    let (status, _, location) = app
        .send(multipart("/admin/save", &draft_parts("", "Primera")))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin"));

    let all = app.store.list_news(&NewsFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_featured);
    assert!(!all[0].is_photo_of_week);
    assert_eq!(all[0].image_url, None);

    let id = all[0].id.to_string();
    let (status, _, _) = app
        .send(multipart("/admin/save", &draft_parts(&id, "Corregida")))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let all = app.store.list_news(&NewsFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title.as_deref(), Some("Corregida"));
}

#[tokio::test]
async fn uploaded_image_replaces_url() {
    let app = app();
    let mut parts = draft_parts("", "Con foto");
    parts.push(Part::File {
        name: "image_file",
        file_name: "puente.jpg",
        content_type: "image/jpeg",
        bytes: b"jpeg",
    });

    let (status, _, _) = app.send(multipart("/admin/save", &parts)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let all = app.store.list_news(&NewsFilter::default()).await.unwrap();
    assert_eq!(
        all[0].image_url.as_deref(),
        Some("https://cdn.test/news-images/puente.jpg")
    );
}

#[tokio::test]
async fn failed_upload_keeps_form_open_and_saves_nothing() {
    let app = app_with_images(true);
    let mut parts = draft_parts("", "Sin suerte");
    parts.push(Part::File {
        name: "image_file",
        file_name: "puente.jpg",
        content_type: "image/jpeg",
        bytes: b"jpeg",
    });

    let (status, page, location) = app.send(multipart("/admin/save", &parts)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(location, None);
    assert!(page.contains("news-form"));
    assert!(page.contains("No se pudo subir la imagen"));
    assert!(page.contains("value=\"Sin suerte\""));

    let all = app.store.list_news(&NewsFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn rejected_image_keeps_the_following_fields() {
    let app = app();
    let parts = vec![
        Part::Text("id", ""),
        Part::Text("title", "Con svg"),
        Part::File {
            name: "image_file",
            file_name: "dibujo.svg",
            content_type: "image/svg+xml",
            bytes: b"<svg></svg>",
        },
        Part::Text("is_featured", "on"),
        Part::Text("is_photo_of_week", "on"),
    ];

    let (status, page, _) = app.send(multipart("/admin/save", &parts)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(page.contains("Solo se permiten imágenes"));
    assert!(page.contains("value=\"Con svg\""));
    assert!(page.contains(r#"name="is_featured" checked"#));
    assert!(page.contains(r#"name="is_photo_of_week" checked"#));

    let all = app.store.list_news(&NewsFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn updating_a_missing_article_reopens_the_form() {
    let app = app();
    let (status, page, _) = app
        .send(multipart("/admin/save", &draft_parts("77", "Fantasma")))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("Editar Noticia"));
    assert!(page.contains("Error al actualizar noticia"));
}

#[tokio::test]
async fn delete_removes_and_redirects() {
    let app = app();
    let article = app.seed("Borrame", false, false).await;

    let (status, _, location) = app
        .send(common::form(&format!("/admin/delete/{}", article.id), ""))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin"));
    assert!(app.store.get_news(article.id).await.unwrap().is_none());

    let (status, page, _) = app.send(common::form("/admin/delete/999", "")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("Error al eliminar noticia 999"));
}
