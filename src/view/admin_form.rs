use crate::models::article::{Article, ArticleInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing { id: i64 },
}

impl FormMode {
    // Con id se actualiza, sin id se crea
    pub fn for_id(id: Option<i64>) -> Self {
        match id {
            Some(id) => FormMode::Editing { id },
            None => FormMode::Creating,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            FormMode::Creating => None,
            FormMode::Editing { id } => Some(*id),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Creating => "Nueva Noticia",
            FormMode::Editing { .. } => "Editar Noticia",
        }
    }
}

// Valores del formulario tal como los escribe el editor (HTML en los campos enriquecidos)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDraft {
    pub title: String,
    pub encabezado: String,
    pub description: String,
    pub image_url: String,
    pub is_featured: bool,
    pub is_photo_of_week: bool,
}

impl ArticleDraft {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title().to_string(),
            encabezado: article.encabezado().to_string(),
            description: article.description().to_string(),
            image_url: article.image_url().to_string(),
            is_featured: article.is_featured,
            is_photo_of_week: article.is_photo_of_week,
        }
    }

    pub fn to_input(&self) -> ArticleInput {
        fn text(value: &str) -> Option<String> {
            Some(value.to_string()).filter(|v| !v.trim().is_empty())
        }

        ArticleInput {
            title: text(&self.title),
            encabezado: text(&self.encabezado),
            description: text(&self.description),
            image_url: text(&self.image_url),
            is_featured: self.is_featured,
            is_photo_of_week: self.is_photo_of_week,
        }
    }
}

// Formulario único del panel:
// Closed → Open → Submitting → Closed, y Submitting → Open (con el error) si falla
// la subida o el guardado. "Cancelar" es volver a /admin, que lo pinta cerrado.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminForm {
    Closed,
    Open {
        mode: FormMode,
        draft: ArticleDraft,
        error: Option<String>,
    },
    Submitting {
        mode: FormMode,
        draft: ArticleDraft,
    },
}

impl AdminForm {
    // "Agregar": formulario vacío
    pub fn add() -> Self {
        AdminForm::Open {
            mode: FormMode::Creating,
            draft: ArticleDraft::default(),
            error: None,
        }
    }

    // "Editar": formulario precargado con la noticia
    pub fn edit(article: &Article) -> Self {
        AdminForm::Open {
            mode: FormMode::Editing { id: article.id },
            draft: ArticleDraft::from_article(article),
            error: None,
        }
    }

    // Lo que el navegador envía al guardar
    pub fn posted(id: Option<i64>, draft: ArticleDraft) -> Self {
        AdminForm::Open {
            mode: FormMode::for_id(id),
            draft,
            error: None,
        }
    }

    pub fn submit(self) -> Result<Self, Self> {
        match self {
            AdminForm::Open { mode, draft, .. } => Ok(AdminForm::Submitting { mode, draft }),
            other => Err(other),
        }
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        match self {
            AdminForm::Submitting { mode, draft } => AdminForm::Open {
                mode,
                draft,
                error: Some(message.into()),
            },
            other => other,
        }
    }

    pub fn succeed(self) -> Self {
        match self {
            AdminForm::Submitting { .. } => AdminForm::Closed,
            other => other,
        }
    }

    // La URL devuelta por el CDN reemplaza la que tuviera el formulario
    pub fn use_uploaded_image(&mut self, url: &str) {
        if let AdminForm::Submitting { draft, .. } = self {
            draft.image_url = url.to_string();
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, AdminForm::Open { .. })
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            AdminForm::Open { mode, .. } | AdminForm::Submitting { mode, .. } => Some(*mode),
            AdminForm::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&ArticleDraft> {
        match self {
            AdminForm::Open { draft, .. } | AdminForm::Submitting { draft, .. } => Some(draft),
            AdminForm::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AdminForm::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}
