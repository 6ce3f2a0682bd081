use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::null_as_false;

pub const MISSING_FIELDS: &str = "Faltan datos obligatorios";

#[derive(Debug, Clone, Deserialize, Serialize, FromRow, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_name: String,
    pub author_email: Option<String>,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn author(&self) -> &str {
        match self.author_name.trim() {
            "" => "Anónimo",
            name => name,
        }
    }
}

// Lo que llega del formulario público (JSON o urlencoded)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCommentSchema {
    pub news_id: Option<i64>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub content: Option<String>,
}

// Comentario ya validado, listo para insertar (siempre sin aprobar)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewComment {
    pub news_id: i64,
    pub author_name: String,
    pub author_email: Option<String>,
    pub content: String,
}

impl CreateCommentSchema {
    pub fn validate(self) -> Result<NewComment, &'static str> {
        let news_id = self.news_id.filter(|id| *id > 0).ok_or(MISSING_FIELDS)?;
        let author_name = non_blank(self.author_name).ok_or(MISSING_FIELDS)?;
        let content = non_blank(self.content).ok_or(MISSING_FIELDS)?;

        Ok(NewComment {
            news_id,
            author_name,
            author_email: non_blank(self.author_email),
            content,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
