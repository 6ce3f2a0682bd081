use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::null_as_false;

// 1. Una fila completa de la tabla `news`
#[derive(Debug, Clone, Deserialize, Serialize, FromRow, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: Option<String>,
    pub encabezado: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_photo_of_week: bool,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn encabezado(&self) -> &str {
        self.encabezado.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn image_url(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }

    // En los listados el título cae al encabezado si viene vacío
    pub fn display_title(&self) -> &str {
        match self.title() {
            "" => self.encabezado(),
            title => title,
        }
    }

    pub fn detail_href(&self) -> String {
        format!("article.html?id={}", self.id)
    }
}

// 2. Lo que recibimos del frontend al crear o sobrescribir una noticia.
// PUT es una sobrescritura completa: lo que no venga queda en NULL / false.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ArticleInput {
    pub title: Option<String>,
    pub encabezado: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_photo_of_week: bool,
}

impl From<&Article> for ArticleInput {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            encabezado: article.encabezado.clone(),
            description: article.description.clone(),
            image_url: article.image_url.clone(),
            is_featured: article.is_featured,
            is_photo_of_week: article.is_photo_of_week,
        }
    }
}

// Filtros de `GET /api/news` (?photo_of_week=true&limit=1, ?q=texto ...)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NewsFilter {
    pub photo_of_week: Option<bool>,
    pub featured: Option<bool>,
    #[serde(rename = "q")]
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl NewsFilter {
    // Portada: todo lo que no es foto de la semana
    pub fn feed() -> Self {
        Self {
            photo_of_week: Some(false),
            ..Self::default()
        }
    }

    pub fn current_photo_of_week() -> Self {
        Self {
            photo_of_week: Some(true),
            limit: Some(1),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, query: &str) -> Self {
        self.search = Some(query.to_string());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    // Búsqueda vacía o solo espacios equivale a no filtrar
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(flag) = self.photo_of_week {
            if article.is_photo_of_week != flag {
                return false;
            }
        }
        if let Some(flag) = self.featured {
            if article.is_featured != flag {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                let term = term.to_lowercase();
                article.title().to_lowercase().contains(&term)
                    || article.encabezado().to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}
