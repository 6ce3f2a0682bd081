use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use super::{DataStore, StoreError};
use crate::models::{
    article::{Article, ArticleInput, NewsFilter},
    comment::{Comment, NewComment},
};

// Definimos un alias para "Pool<Postgres>"
pub type DbPool = Pool<Postgres>;

// Las banderas pueden ser NULL en la tabla; las normalizamos a false al leer
const NEWS_COLUMNS: &str = r#"
    id,
    title,
    encabezado,
    description,
    image_url,
    COALESCE(is_featured, false) AS is_featured,
    COALESCE(is_photo_of_week, false) AS is_photo_of_week,
    created_at
"#;

const COMMENT_COLUMNS: &str = r#"
    id,
    news_id,
    author_name,
    author_email,
    content,
    COALESCE(is_approved, false) AS is_approved,
    created_at
"#;

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub async fn connect(db_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<Article>, StoreError> {
        // ($1::bool IS NULL OR ...): si no envían el filtro, se ignora.
        // LIMIT NULL en Postgres equivale a sin límite.
        let sql = format!(
            r#"
            SELECT {NEWS_COLUMNS}
            FROM news
            WHERE
                ($1::bool IS NULL OR COALESCE(is_photo_of_week, false) = $1)
                AND
                ($2::bool IS NULL OR COALESCE(is_featured, false) = $2)
                AND
                ($3::text IS NULL OR (title ILIKE '%' || $3 || '%' OR encabezado ILIKE '%' || $3 || '%'))
            ORDER BY created_at DESC
            LIMIT $4
            "#
        );

        let rows = sqlx::query_as::<_, Article>(&sql)
            .bind(filter.photo_of_week)
            .bind(filter.featured)
            .bind(filter.search_term())
            .bind(filter.limit.map(|limit| limit as i64))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get_news(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = $1");

        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create_news(&self, input: &ArticleInput) -> Result<Article, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO news (title, encabezado, description, image_url, is_featured, is_photo_of_week)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {NEWS_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(&input.title)
            .bind(&input.encabezado)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.is_featured)
            .bind(input.is_photo_of_week)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_news(
        &self,
        id: i64,
        input: &ArticleInput,
    ) -> Result<Option<Article>, StoreError> {
        // Sobrescritura completa: sin COALESCE, lo que no venga queda en NULL
        let sql = format!(
            r#"
            UPDATE news SET
                title = $1,
                encabezado = $2,
                description = $3,
                image_url = $4,
                is_featured = $5,
                is_photo_of_week = $6
            WHERE id = $7
            RETURNING {NEWS_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(&input.title)
            .bind(&input.encabezado)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.is_featured)
            .bind(input.is_photo_of_week)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete_news(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let sql = format!("DELETE FROM news WHERE id = $1 RETURNING {NEWS_COLUMNS}");

        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn approved_comments(&self, news_id: i64) -> Result<Vec<Comment>, StoreError> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE news_id = $1 AND is_approved = true
            ORDER BY created_at ASC
            "#
        );

        let rows = sqlx::query_as::<_, Comment>(&sql)
            .bind(news_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn all_comments(&self) -> Result<Vec<Comment>, StoreError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at DESC");

        let rows = sqlx::query_as::<_, Comment>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        // is_approved se deja en su valor por defecto (false): la moderación es externa
        let sql = format!(
            r#"
            INSERT INTO comments (news_id, author_name, author_email, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(comment.news_id)
            .bind(&comment.author_name)
            .bind(&comment.author_email)
            .bind(&comment.content)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // rows_affected nos dice si realmente borró algo
        Ok(result.rows_affected() > 0)
    }
}
