use std::fmt::Display;

use chrono::{DateTime, Utc};
use maud::{html, Markup, DOCTYPE};

pub mod admin;
pub mod public;
pub mod text;

pub use text::{escaped, sanitized};

const STYLESHEET: &str = "/css/styles.css";

// Resultado de la carga de un bloque de la página. Un fallo solo afecta a su bloque.
#[derive(Debug)]
pub enum Widget<T> {
    Ready(T),
    Failed,
}

impl<T> Widget<T> {
    pub fn from_result<E: Display>(result: Result<T, E>, what: &str) -> Self {
        match result {
            Ok(value) => Widget::Ready(value),
            Err(e) => {
                tracing::error!("Error al cargar {what}: {e}");
                Widget::Failed
            }
        }
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub struct Head<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub extra_styles: &'a [&'a str],
    pub scripts: &'a [&'a str],
}

impl<'a> Head<'a> {
    pub fn titled(title: &'a str) -> Self {
        Self {
            title,
            description: None,
            extra_styles: &[],
            scripts: &[],
        }
    }
}

// Documento base del sitio público y del panel
pub fn base_document(head: Head<'_>, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (escaped(head.title)) }
                @if let Some(description) = head.description {
                    meta name="description" content=(escaped(description));
                }
                link rel="stylesheet" href=(STYLESHEET);
                @for href in head.extra_styles {
                    link rel="stylesheet" href=(href);
                }
            }
            body class=(body_class) {
                (content)
                @for src in head.scripts {
                    script src=(src) {}
                }
            }
        }
    }
}

// Cabecera pública con el buscador
pub fn site_header(site_name: &str, query: Option<&str>) -> Markup {
    html! {
        header class="site-header" {
            a class="brand" href="/" { (escaped(site_name)) }
            form class="search" method="get" action="/" {
                input id="search-input" type="search" name="q" placeholder="Buscar noticias..."
                    value=(escaped(query.unwrap_or_default()));
                button id="search-btn" type="submit" { "Buscar" }
            }
        }
    }
}
