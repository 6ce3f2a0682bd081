use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::{DataStore, StoreError};
use crate::models::{
    article::{Article, ArticleInput, NewsFilter},
    comment::{Comment, NewComment},
};

const NEWS_TABLE: &str = "news";
const COMMENTS_TABLE: &str = "comments";

// Cuerpo de error de PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl PostgrestError {
    fn describe(self) -> String {
        let mut text = self.message;
        for extra in [self.details, self.hint].into_iter().flatten() {
            text.push_str(": ");
            text.push_str(&extra);
        }
        text
    }
}

// Cliente de la API REST (PostgREST) del almacén gestionado
pub struct RestStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(project_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            http_client,
            base_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    // Escrituras que devuelven las filas afectadas
    fn write(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table)
            .header("Prefer", "return=representation")
    }

    async fn rows<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, StoreError> {
        let response = request.send().await?;
        decode(response).await
    }

    async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = Self::rows(self.write(Method::POST, table).json(body)).await?;
        if rows.is_empty() {
            return Err(StoreError::Decode(format!(
                "insert into {table} returned no rows"
            )));
        }
        Ok(rows.swap_remove(0))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<PostgrestError>(&body)
            .map(PostgrestError::describe)
            .unwrap_or(body);
        return Err(StoreError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    debug!("PostgREST {status}: {} bytes", body.len());
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

fn first<T>(mut rows: Vec<T>) -> Option<T> {
    if rows.is_empty() {
        None
    } else {
        Some(rows.swap_remove(0))
    }
}

// Valores con caracteres reservados (,.:()) van entre comillas dentro de or=()
fn quote_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

// "false" en el almacén también incluye las filas con NULL
fn flag_params(column: &str, flag: Option<bool>) -> Option<(String, String)> {
    match flag {
        Some(true) => Some((column.to_string(), "eq.true".to_string())),
        Some(false) => Some((
            "or".to_string(),
            format!("({column}.is.null,{column}.eq.false)"),
        )),
        None => None,
    }
}

// Varios `or` en la misma consulta se combinan con AND
pub(crate) fn news_params(filter: &NewsFilter) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    params.extend(flag_params("is_photo_of_week", filter.photo_of_week));
    params.extend(flag_params("is_featured", filter.featured));

    if let Some(term) = filter.search_term() {
        let pattern = quote_value(&format!("%{term}%"));
        params.push((
            "or".to_string(),
            format!("(title.ilike.{pattern},encabezado.ilike.{pattern})"),
        ));
    }

    params.push(("order".to_string(), "created_at.desc".to_string()));

    if let Some(limit) = filter.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

fn by_id(id: i64) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}

#[async_trait]
impl DataStore for RestStore {
    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<Article>, StoreError> {
        let request = self
            .request(Method::GET, NEWS_TABLE)
            .query(&news_params(filter));
        Self::rows(request).await
    }

    async fn get_news(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let request = self
            .request(Method::GET, NEWS_TABLE)
            .query(&[("select", "*")])
            .query(&by_id(id));
        Ok(first(Self::rows(request).await?))
    }

    async fn create_news(&self, input: &ArticleInput) -> Result<Article, StoreError> {
        self.insert(NEWS_TABLE, input).await
    }

    async fn update_news(
        &self,
        id: i64,
        input: &ArticleInput,
    ) -> Result<Option<Article>, StoreError> {
        let request = self
            .write(Method::PATCH, NEWS_TABLE)
            .query(&by_id(id))
            .json(input);
        Ok(first(Self::rows(request).await?))
    }

    async fn delete_news(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let request = self.write(Method::DELETE, NEWS_TABLE).query(&by_id(id));
        Ok(first(Self::rows(request).await?))
    }

    async fn approved_comments(&self, news_id: i64) -> Result<Vec<Comment>, StoreError> {
        let request = self.request(Method::GET, COMMENTS_TABLE).query(&[
            ("select", "*".to_string()),
            ("news_id", format!("eq.{news_id}")),
            ("is_approved", "eq.true".to_string()),
            ("order", "created_at.asc".to_string()),
        ]);
        Self::rows(request).await
    }

    async fn all_comments(&self) -> Result<Vec<Comment>, StoreError> {
        let request = self
            .request(Method::GET, COMMENTS_TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        Self::rows(request).await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        self.insert(COMMENTS_TABLE, comment).await
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let request = self.write(Method::DELETE, COMMENTS_TABLE).query(&by_id(id));
        let deleted: Vec<Comment> = Self::rows(request).await?;
        Ok(!deleted.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn feed_excludes_photo_of_week_including_nulls() {
        let params = news_params(&NewsFilter::feed());
        assert_eq!(
            value_of(&params, "or"),
            vec!["(is_photo_of_week.is.null,is_photo_of_week.eq.false)"]
        );
        assert_eq!(value_of(&params, "order"), vec!["created_at.desc"]);
        assert!(value_of(&params, "limit").is_empty());
    }

    #[test]
    fn photo_of_week_takes_latest_single_row() {
        let params = news_params(&NewsFilter::current_photo_of_week());
        assert_eq!(value_of(&params, "is_photo_of_week"), vec!["eq.true"]);
        assert_eq!(value_of(&params, "limit"), vec!["1"]);
    }

    #[test]
    fn search_adds_second_or_group() {
        let params = news_params(&NewsFilter::feed().with_search(" lluvia "));
        let ors = value_of(&params, "or");
        assert_eq!(ors.len(), 2);
        assert_eq!(
            ors[1],
            r#"(title.ilike."%lluvia%",encabezado.ilike."%lluvia%")"#
        );
    }

    #[test]
    fn reserved_characters_are_quoted() {
        assert_eq!(quote_value(r#"a,b"c"#), r#""a,b\"c""#);
    }

    #[test]
    fn error_body_is_described() {
        let error: PostgrestError = serde_json::from_str(
            r#"{"message":"relation does not exist","details":null,"hint":"check table","code":"42P01"}"#,
        )
        .unwrap();
        assert_eq!(error.describe(), "relation does not exist: check table");
    }
}
