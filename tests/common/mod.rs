#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use lalupa::{
    config::Config,
    db::{memory::MemoryStore, DataStore},
    images::{ImageError, ImageStore, ImageUpload, UploadAuth, UploadedImage},
    models::article::{Article, ArticleInput},
    routes::create_routes,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "lalupa-test-boundary";

// CDN de mentira: devuelve una URL fija o falla siempre
pub struct FakeImages {
    pub fail: bool,
}

#[async_trait]
impl ImageStore for FakeImages {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, ImageError> {
        if self.fail {
            return Err(ImageError::Upstream {
                status: 500,
                message: "CDN caído".to_string(),
            });
        }

        Ok(UploadedImage {
            url: format!("https://cdn.test/news-images/{}", image.file_name),
            thumbnail_url: Some(format!("https://cdn.test/tr:n-thumb/{}", image.file_name)),
            file_id: "file_123".to_string(),
        })
    }

    fn upload_auth(&self) -> Result<UploadAuth, ImageError> {
        Ok(UploadAuth {
            token: "token".to_string(),
            expire: 1_700_001_800,
            signature: "firma".to_string(),
            public_key: "public_test".to_string(),
        })
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

pub fn app() -> TestApp {
    app_with_images(false)
}

pub fn app_with_images(fail: bool) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(
        store.clone(),
        Arc::new(FakeImages { fail }),
        Config::default(),
    );

    TestApp {
        store,
        router: create_routes(state),
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String, Option<String>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(bytes.to_vec()).unwrap(), location)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let (status, body, _) = self.send(get(uri)).await;
        (status, body)
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, body, _) = self.send(request).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap()
        };
        (status, value)
    }

    pub async fn seed(&self, title: &str, featured: bool, photo: bool) -> Article {
        let input = ArticleInput {
            title: Some(title.to_string()),
            encabezado: Some(format!("<p>Encabezado de {title}</p>")),
            description: Some(format!("<p>Cuerpo de {title}</p>")),
            image_url: Some(format!("https://cdn.test/{}.jpg", title.to_lowercase())),
            is_featured: featured,
            is_photo_of_week: photo,
        };
        self.store.create_news(&input).await.unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// Partes de un multipart/form-data: texto o archivo
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
