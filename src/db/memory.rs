use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::{DataStore, StoreError};
use crate::models::{
    article::{Article, ArticleInput, NewsFilter},
    comment::{Comment, NewComment},
};

#[derive(Default)]
struct Tables {
    news: Vec<Article>,
    comments: Vec<Comment>,
    next_news_id: i64,
    next_comment_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    // Marcas de tiempo estrictamente crecientes para que "más reciente" sea estable
    fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_created_at {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_created_at = Some(now);
        now
    }
}

// Almacén en proceso: tests y arranque sin base de datos configurada
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    // La moderación ocurre fuera del portal; aquí se simula ese paso
    pub fn approve_comment(&self, id: i64) -> bool {
        let mut tables = self.tables.write();
        match tables.comments.iter_mut().find(|c| c.id == id) {
            Some(comment) => {
                comment.is_approved = true;
                true
            }
            None => false,
        }
    }
}

fn apply(article: &mut Article, input: &ArticleInput) {
    article.title = input.title.clone();
    article.encabezado = input.encabezado.clone();
    article.description = input.description.clone();
    article.image_url = input.image_url.clone();
    article.is_featured = input.is_featured;
    article.is_photo_of_week = input.is_photo_of_week;
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<Article>, StoreError> {
        let tables = self.tables.read();
        let mut rows: Vec<Article> = tables
            .news
            .iter()
            .filter(|article| filter.matches(article))
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn get_news(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let tables = self.tables.read();
        Ok(tables.news.iter().find(|a| a.id == id).cloned())
    }

    async fn create_news(&self, input: &ArticleInput) -> Result<Article, StoreError> {
        let mut tables = self.tables.write();
        tables.next_news_id += 1;

        let mut article = Article {
            id: tables.next_news_id,
            title: None,
            encabezado: None,
            description: None,
            image_url: None,
            is_featured: false,
            is_photo_of_week: false,
            created_at: tables.now(),
        };
        apply(&mut article, input);

        tables.news.push(article.clone());
        Ok(article)
    }

    async fn update_news(
        &self,
        id: i64,
        input: &ArticleInput,
    ) -> Result<Option<Article>, StoreError> {
        let mut tables = self.tables.write();
        Ok(tables.news.iter_mut().find(|a| a.id == id).map(|article| {
            apply(article, input);
            article.clone()
        }))
    }

    async fn delete_news(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let mut tables = self.tables.write();
        let position = tables.news.iter().position(|a| a.id == id);
        Ok(position.map(|index| tables.news.remove(index)))
    }

    async fn approved_comments(&self, news_id: i64) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read();
        let mut rows: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.news_id == news_id && c.is_approved)
            .cloned()
            .collect();

        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn all_comments(&self) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read();
        let mut rows = tables.comments.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write();
        tables.next_comment_id += 1;

        let row = Comment {
            id: tables.next_comment_id,
            news_id: comment.news_id,
            author_name: comment.author_name.clone(),
            author_email: comment.author_email.clone(),
            content: comment.content.clone(),
            is_approved: false,
            created_at: tables.now(),
        };

        tables.comments.push(row.clone());
        Ok(row)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        Ok(tables.comments.len() != before)
    }
}
